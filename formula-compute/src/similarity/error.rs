use crate::error::kind::Timeout;
use std::{fmt, io};

/// Utility enum to package the errors that can end a comparison.
///
/// Each variant wraps the [`formula_error::Error`] that caused it. A comparison that fails
/// produces no partial result.
#[derive(Debug)]
pub enum Error {
    /// A formula could not be parsed.
    Parse {
        /// The formula that was given.
        input: String,

        /// The parse error, with spans into `input`.
        error: formula_error::Error,
    },

    /// The engine failed to simplify or expand an expression.
    Simplification(formula_error::Error),

    /// The comparison ran past its deadline.
    Timeout(formula_error::Error),
}

impl Error {
    /// Returns the underlying error.
    pub fn inner(&self) -> &formula_error::Error {
        match self {
            Self::Parse { error, .. } | Self::Simplification(error) | Self::Timeout(error) => error,
        }
    }

    /// Report this error to stderr. Parse errors highlight the offending part of the formula.
    pub fn report_to_stderr(&self, src_id: &str) -> io::Result<()> {
        match self {
            Self::Parse { input, error } => error.report_to_stderr(src_id, input),
            Self::Simplification(error) | Self::Timeout(error) => error.report_to_stderr(src_id, ""),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { input, error } => write!(f, "could not parse `{}`: {}", input, error),
            Self::Simplification(error) => write!(f, "could not simplify: {}", error),
            Self::Timeout(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner())
    }
}

/// Errors raised by the engine or by the deadline after parsing. Timeouts keep their own variant;
/// everything else is a simplification failure.
impl From<formula_error::Error> for Error {
    fn from(error: formula_error::Error) -> Self {
        if error.is::<Timeout>() {
            Self::Timeout(error)
        } else {
            Self::Simplification(error)
        }
    }
}
