use formula_compute::similarity;
use rustyline::error::ReadlineError;
use std::{fmt, io, path::PathBuf};

/// Utility enum to package the errors that can occur while running a command.
#[derive(Debug)]
pub enum Error {
    /// A comparison or search failed.
    Compare(similarity::Error),

    /// The engine rejected a formula, while parsing or simplifying it.
    Formula {
        /// The formula that was given.
        input: String,

        /// The error, with spans into `input`.
        error: formula_error::Error,
    },

    /// The formula store rejected a request.
    Store(formula_error::Error),

    /// A REPL command was malformed.
    Usage(String),

    /// A formula list could not be read.
    Io {
        /// The file that was being read.
        path: PathBuf,

        /// The underlying error.
        error: io::Error,
    },

    /// Results could not be serialized.
    Json(serde_json::Error),

    /// The line editor failed.
    Readline(ReadlineError),
}

impl Error {
    /// Report this error to stderr.
    ///
    /// Errors from the engine are rendered as [`ariadne`] reports, so that parse errors point at
    /// the offending part of the formula. Everything else is printed as a single line.
    ///
    /// [`ariadne`]: https://docs.rs/ariadne/latest/ariadne/
    pub fn report_to_stderr(&self, src_id: &str) -> io::Result<()> {
        match self {
            Self::Compare(err) => err.report_to_stderr(src_id),
            Self::Formula { input, error } => error.report_to_stderr(src_id, input),
            Self::Store(err) => err.report_to_stderr(src_id, ""),
            _ => {
                eprintln!("error: {}", self);
                Ok(())
            },
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare(err) => write!(f, "{}", err),
            Self::Formula { input, error } => write!(f, "`{}`: {}", input, error),
            Self::Store(err) => write!(f, "{}", err),
            Self::Usage(usage) => write!(f, "usage: {}", usage),
            Self::Io { path, error } => write!(f, "could not read `{}`: {}", path.display(), error),
            Self::Json(err) => write!(f, "could not serialize the results: {}", err),
            Self::Readline(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {}

impl From<similarity::Error> for Error {
    fn from(err: similarity::Error) -> Self {
        Self::Compare(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<ReadlineError> for Error {
    fn from(err: ReadlineError) -> Self {
        Self::Readline(err)
    }
}
