use ariadne::Fmt;
use formula_attrs::ErrorKind;
use formula_error::EXPR;

pub use formula_error::Error;

/// A field that is required to create a formula was not given.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is required to create a formula", field),
    labels = [""],
    help = "a formula needs both a legend and a description",
)]
pub struct MissingField {
    /// The name of the missing field.
    pub field: &'static str,
}

/// An author ID that is not a positive integer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a valid author ID", author_id),
    labels = [""],
    help = "author IDs are positive integers",
)]
pub struct InvalidAuthor {
    /// The ID that was given.
    pub author_id: i64,
}

/// No formula is stored under the given ID.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("no formula with ID {}", id),
    labels = [""],
)]
pub struct FormulaNotFound {
    /// The ID that was looked up.
    pub id: u64,
}

/// The formula text is empty.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the formula is empty",
    labels = [""],
    help = format!("write a formula, such as {}", "E = mc^2".fg(EXPR)),
)]
pub struct EmptyFormula;
