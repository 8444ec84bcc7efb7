use crate::{
    parser::{
        ast::{expr::Expr, parse_argument},
        error::{kind, Error},
        fmt::{fmt_group, Latex},
        token::{CloseSquare, OpenSquare},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A root, `\sqrt{radicand}` or `\sqrt[index]{radicand}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Root {
    /// The expression under the root.
    pub radicand: Box<Expr>,

    /// The index of the root, if it is not a square root.
    pub index: Option<Box<Expr>>,

    /// The region of the source code that this root was parsed from.
    pub span: Range<usize>,
}

impl Root {
    /// Returns the span of the root.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Root {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        if token.kind != TokenKind::Command || token.lexeme != "\\sqrt" {
            return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Command],
                found: token.kind,
            }));
        }

        let index = if input.peek_is(TokenKind::OpenSquare) {
            let open = input.try_parse::<OpenSquare>()?;
            let index = input.try_parse::<Expr>()?;
            input.try_parse::<CloseSquare>().map_err(|_| {
                let found = input.peek_token().map_or(input.eof_span(), |token| token.span.clone());
                Error::new(vec![open.span.clone(), found], kind::UnclosedGroup { closing: "]" })
            })?;
            Some(Box::new(index))
        } else {
            None
        };
        let radicand = parse_argument(input, token.lexeme, token.span.clone())?;

        Ok(Self {
            radicand: Box::new(radicand),
            index,
            span: token.span.start..input.prev_end(),
        })
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.index {
            Some(index) => write!(f, "root({}, {})", self.radicand, index),
            None => write!(f, "sqrt({})", self.radicand),
        }
    }
}

impl Latex for Root {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\sqrt")?;
        if let Some(index) = &self.index {
            write!(f, "[")?;
            index.fmt_latex(f)?;
            write!(f, "]")?;
        }
        fmt_group(f, &*self.radicand)
    }
}
