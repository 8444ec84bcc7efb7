//! The abstract syntax tree of a formula.
//!
//! Every node records the byte span of the source it was parsed from, so that errors raised
//! while converting the tree can point back at the formula.

pub mod binary;
pub mod call;
pub mod expr;
pub mod frac;
pub mod literal;
pub mod paren;
pub mod root;
pub mod unary;

pub use binary::Binary;
pub use call::Call;
pub use expr::Expr;
pub use frac::Frac;
pub use literal::{ConstantKind, LitConst, LitFloat, LitInt, LitSym, Literal};
pub use paren::{Paren, ParenKind};
pub use root::Root;
pub use unary::Unary;

use crate::{
    parser::{error::{kind, Error}, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Parses the argument of a command like `\frac` or `\sqrt`.
///
/// The argument is either a braced group, whose contents are returned without the braces, or a
/// single token, as in `\frac1x` or `\sqrt x`.
pub(crate) fn parse_argument(
    input: &mut Parser,
    command: &str,
    command_span: Range<usize>,
) -> Result<Expr, Error> {
    if input.peek_is(TokenKind::OpenCurly) {
        let paren = Paren::parse_braced(input)?;
        return Ok(*paren.expr);
    }

    match input.peek_token().map(|token| token.kind) {
        Some(TokenKind::Int | TokenKind::Float | TokenKind::Letter | TokenKind::Command) => {
            input.try_parse::<Literal>().map(Expr::Literal)
        },
        _ => {
            let found = input.peek_token().map_or(input.eof_span(), |token| token.span.clone());
            Err(Error::new(vec![command_span, found], kind::MissingArgument {
                command: command.to_string(),
            }))
        },
    }
}
