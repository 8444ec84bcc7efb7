use crate::{
    parser::{
        ast::{binary::Binary, expr::{Expr, Primary}},
        error::Error,
        fmt::Latex,
        token::op::UnaryOp,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A prefix unary expression, such as `-x` or `+2`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or a primary expression if there is no unary operator.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        if input.peek_is(TokenKind::Sub) || input.peek_is(TokenKind::Add) {
            input.try_parse::<Unary>().map(Expr::Unary)
        } else {
            Primary::parse(input)
        }
    }
}

impl Parse for Unary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let op = input.try_parse::<UnaryOp>()?;
        let operand = Unary::parse_or_lower(input)?;

        // the operand extends over any operators that bind tighter than the unary operator, so
        // that `-x^2` is `-(x^2)`
        let (operand, _) = Binary::parse_expr(input, operand, op.precedence())?;
        let span = op.span.start..operand.span().end;

        Ok(Self {
            operand: Box::new(operand),
            op,
            span,
        })
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.op, self.operand)
    }
}

impl Latex for Unary {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.op)?;
        self.operand.fmt_latex(f)
    }
}
