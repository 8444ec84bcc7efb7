//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the span-carrying [`Error`] type that wraps them.
//!
//! Every crate in the workspace defines its error kinds as small structs deriving [`ErrorKind`]
//! through `formula-attrs`, and returns them wrapped in an [`Error`]. The spans point into the
//! formula source, so the error can be rendered with [`ariadne`] next to the offending text.

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug, Display, Formatter}, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns the error as a [`dyn Any`], so that callers can inspect the concrete kind.
    ///
    /// [`dyn Any`]: std::any::Any
    fn as_any(&self) -> &dyn Any;

    /// The one-line message describing the error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that is not associated with any region of source code.
    pub fn spanless(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns the kind of this error as `K`, if it is one.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Report this error to stderr, highlighting its spans in the given input.
    ///
    /// The [`Report`] type does not implement [`Display`], so this is the only way to print it.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }

    /// Writes the report for this error to the given writer.
    pub fn write_report<W: io::Write>(&self, src_id: &str, input: &str, writer: W) -> io::Result<()> {
        self.build_report(src_id).write((src_id, Source::from(input)), writer)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}
