use ariadne::Fmt;
use formula_attrs::ErrorKind;
use formula_error::EXPR;
use std::time::Duration;

/// A number literal could not be represented.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a valid number", literal),
    labels = ["this number"],
)]
pub struct InvalidNumber {
    /// The text of the literal.
    pub literal: String,
}

/// A relation such as `=` appeared somewhere other than the top level of a formula.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "relations can only appear at the top level of a formula",
    labels = ["this relation is nested inside another expression"],
    help = format!("write the formula as a single relation, such as {}", "a = b".fg(EXPR)),
)]
pub struct NestedRelation;

/// An expression divides by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["this expression"],
    help = format!("{} is undefined for negative powers", "0".fg(EXPR)),
)]
pub struct DivisionByZero;

/// The simplifier applied more rewrite rules than it is allowed to.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("simplification did not finish within {} steps", limit),
    labels = ["this expression"],
    help = "the expression may be too large to simplify, or the rewrite rules may be cycling",
)]
pub struct StepLimitExceeded {
    /// The maximum number of steps that were allowed.
    pub limit: usize,
}

/// An assumption name that the engine does not know about.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown assumption `{}`", name),
    labels = [""],
    help = format!(
        "supported assumptions are {}",
        "real, positive, negative, nonnegative, integer, nonzero".fg(EXPR),
    ),
)]
pub struct UnknownAssumption {
    /// The name that was given.
    pub name: String,
}

/// A comparison ran past its deadline.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("comparison exceeded its time limit of {:?} during {}", limit, stage),
    labels = [""],
    help = "try a longer timeout, or compare smaller formulas",
)]
pub struct Timeout {
    /// The pipeline stage that was running when the deadline passed.
    pub stage: &'static str,

    /// The time limit that was exceeded.
    pub limit: Duration,
}
