use crate::{
    parser::{
        ast::{expr::Expr, parse_argument},
        error::{kind, Error},
        fmt::{fmt_group, Latex},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fraction, `\frac{numerator}{denominator}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frac {
    /// The numerator of the fraction.
    pub numerator: Box<Expr>,

    /// The denominator of the fraction.
    pub denominator: Box<Expr>,

    /// The region of the source code that this fraction was parsed from.
    pub span: Range<usize>,
}

impl Frac {
    /// Returns the span of the fraction.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Frac {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        if token.kind != TokenKind::Command || !matches!(token.lexeme, "\\frac" | "\\dfrac" | "\\tfrac") {
            return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Command],
                found: token.kind,
            }));
        }

        let numerator = parse_argument(input, token.lexeme, token.span.clone())?;
        let denominator = parse_argument(input, token.lexeme, token.span.clone())?;

        Ok(Self {
            numerator: Box::new(numerator),
            denominator: Box::new(denominator),
            span: token.span.start..input.prev_end(),
        })
    }
}

impl fmt::Display for Frac {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})/({})", self.numerator, self.denominator)
    }
}

impl Latex for Frac {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\frac")?;
        fmt_group(f, &*self.numerator)?;
        fmt_group(f, &*self.denominator)
    }
}
