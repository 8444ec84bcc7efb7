use ariadne::Fmt;
use formula_attrs::ErrorKind;
use formula_error::EXPR;
use crate::tokenizer::TokenKind;

/// An intentionally useless error. This should only be used for non-fatal errors, as it contains
/// no useful information.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "an internal non-fatal error occurred while parsing",
    labels = ["here"],
    help = "you should never see this error; please report this as a bug"
)]
pub struct NonFatal;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of formula",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of formula",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A control sequence that is not part of the supported LaTeX subset.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `{}`", name),
    labels = ["this command is not supported"],
    help = format!("supported commands include {}, {}, and the Greek letters", "\\frac".fg(EXPR), "\\sqrt".fg(EXPR)),
)]
pub struct UnknownCommand {
    /// The command, including its leading backslash.
    pub name: String,
}

/// A group was opened but never closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed group",
    labels = ["this group is never closed", "expected the group to close here"],
    help = format!("add a closing {}", closing.fg(EXPR)),
)]
pub struct UnclosedGroup {
    /// The delimiter that would close the group.
    pub closing: &'static str,
}

/// A group contains nothing.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty group",
    labels = [format!("add an {} inside this group", "expression".fg(EXPR))],
)]
pub struct EmptyGroup;

/// A command that takes arguments was not given one.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument for `{}`", command),
    labels = ["this command needs an argument", "expected a group or a single token here"],
    help = format!("wrap the argument in braces: {}", format!("{}{{...}}", command).fg(EXPR)),
)]
pub struct MissingArgument {
    /// The command that is missing an argument.
    pub command: String,
}

/// A decoration such as `\vec` was applied to something other than a single symbol.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` can only decorate a single symbol", command),
    labels = ["this decoration", "is not a single symbol"],
)]
pub struct InvalidDecoration {
    /// The decorating command.
    pub command: String,
}
