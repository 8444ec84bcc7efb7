use crate::{
    parser::{
        ast::{
            binary::Binary,
            call::{Call, FUNCTIONS},
            frac::Frac,
            literal::{is_literal_command, Literal},
            paren::{Paren, ParenKind},
            root::Root,
            unary::Unary,
        },
        error::{kind, Error},
        fmt::Latex,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a general expression in a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    Literal(Literal),
    Paren(Paren),
    Call(Call),
    Frac(Frac),
    Root(Root),
    Unary(Unary),
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Frac(frac) => frac.span(),
            Expr::Root(root) => root.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// If this expression is an [`Expr::Paren`] that is not an absolute value, returns the
    /// innermost expression in the parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        match self {
            Expr::Paren(paren) if paren.kind != ParenKind::Abs => paren.innermost(),
            _ => self,
        }
    }

    /// Returns true if this expression is a relation, such as `a = b`, at its top level.
    pub fn is_relation(&self) -> bool {
        matches!(self, Expr::Binary(binary) if binary.op.kind.is_relation())
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = Unary::parse_or_lower(input)?;
        Ok(Binary::parse_expr(input, lhs, Precedence::Any)?.0)
    }
}

/// The most basic building blocks of an expression: literals, groups, and commands like `\frac`.
/// These are the operands of unary and binary operators.
pub struct Primary;

impl Primary {
    /// Parses a primary expression, choosing the parser from the next token.
    pub fn parse(input: &mut Parser) -> Result<Expr, Error> {
        let Some((token_kind, lexeme, span)) = input.peek_token()
            .map(|token| (token.kind, token.lexeme, token.span.clone()))
        else {
            return Err(Error::new(vec![input.eof_span()], kind::UnexpectedEof));
        };

        match token_kind {
            TokenKind::Int | TokenKind::Float | TokenKind::Letter => {
                input.try_parse::<Literal>().map(Expr::Literal)
            },
            TokenKind::OpenParen | TokenKind::OpenSquare | TokenKind::OpenCurly | TokenKind::Pipe => {
                input.try_parse::<Paren>().map(Expr::Paren)
            },
            TokenKind::Command => match lexeme {
                "\\frac" | "\\dfrac" | "\\tfrac" => input.try_parse::<Frac>().map(Expr::Frac),
                "\\sqrt" => input.try_parse::<Root>().map(Expr::Root),
                "\\left" => input.try_parse::<Paren>().map(Expr::Paren),
                name if FUNCTIONS.contains(&name) => input.try_parse::<Call>().map(Expr::Call),
                name if is_literal_command(name) => input.try_parse::<Literal>().map(Expr::Literal),
                name => Err(Error::new(vec![span], kind::UnknownCommand {
                    name: name.to_string(),
                })),
            },
            found => Err(Error::new(vec![span], kind::UnexpectedToken {
                expected: &[
                    TokenKind::Int,
                    TokenKind::Float,
                    TokenKind::Letter,
                    TokenKind::Command,
                    TokenKind::OpenParen,
                    TokenKind::OpenSquare,
                    TokenKind::OpenCurly,
                    TokenKind::Pipe,
                ],
                found,
            })),
        }
    }

    /// Returns true if the next token starts a function call, such as `\sin`.
    pub fn starts_call(input: &Parser) -> bool {
        input.peek_command(&FUNCTIONS)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Frac(frac) => frac.fmt(f),
            Expr::Root(root) => root.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}

impl Latex for Expr {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt_latex(f),
            Expr::Paren(paren) => paren.fmt_latex(f),
            Expr::Call(call) => call.fmt_latex(f),
            Expr::Frac(frac) => frac.fmt_latex(f),
            Expr::Root(root) => root.fmt_latex(f),
            Expr::Unary(unary) => unary.fmt_latex(f),
            Expr::Binary(binary) => binary.fmt_latex(f),
        }
    }
}
