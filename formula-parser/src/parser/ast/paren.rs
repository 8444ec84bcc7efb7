use crate::{
    parser::{
        ast::expr::Expr,
        error::{kind, Error},
        fmt::{fmt_group, Latex},
        token::parse_command,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The delimiters surrounding a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParenKind {
    /// `( ... )`
    Round,

    /// `[ ... ]`
    Square,

    /// `{ ... }`, LaTeX's invisible grouping.
    Curly,

    /// `| ... |`, the absolute value.
    Abs,
}

impl ParenKind {
    /// Returns the token that closes a group of this kind.
    fn closing(self) -> &'static [TokenKind] {
        match self {
            Self::Round => &[TokenKind::CloseParen],
            Self::Square => &[TokenKind::CloseSquare],
            Self::Curly => &[TokenKind::CloseCurly],
            Self::Abs => &[TokenKind::Pipe],
        }
    }

    /// Returns the source text of the closing delimiter.
    fn closing_str(self) -> &'static str {
        match self {
            Self::Round => ")",
            Self::Square => "]",
            Self::Curly => "}",
            Self::Abs => "|",
        }
    }

    /// Returns the group kind opened by the given token.
    fn from_opening(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::OpenParen => Some(Self::Round),
            TokenKind::OpenSquare => Some(Self::Square),
            TokenKind::OpenCurly => Some(Self::Curly),
            TokenKind::Pipe => Some(Self::Abs),
            _ => None,
        }
    }
}

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The delimiters surrounding the expression.
    pub kind: ParenKind,

    /// Whether the delimiters were sized with `\left` and `\right`.
    pub sized: bool,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression.
    pub fn innermost(&self) -> &Expr {
        let mut inner = &*self.expr;
        while let Expr::Paren(paren) = inner {
            if paren.kind == ParenKind::Abs {
                break;
            }
            inner = &paren.expr;
        }
        inner
    }

    /// Parses a braced group, `{ ... }`.
    pub(crate) fn parse_braced(input: &mut Parser) -> Result<Self, Error> {
        let open = input.expect(&[TokenKind::OpenCurly])?;
        Self::parse_rest(input, ParenKind::Curly, false, open.span)
    }

    /// Parses the expression and closing delimiter of a group whose opening delimiter has been
    /// consumed.
    fn parse_rest(
        input: &mut Parser,
        paren_kind: ParenKind,
        sized: bool,
        open_span: Range<usize>,
    ) -> Result<Self, Error> {
        // an empty group is reported at the group itself, not at the closing delimiter
        if let Some(token) = input.peek_token() {
            let closes = if sized {
                token.kind == TokenKind::Command && token.lexeme == "\\right"
            } else {
                paren_kind.closing().contains(&token.kind)
            };
            if closes {
                let span = open_span.start..token.span.end;
                return Err(Error::new(vec![span], kind::EmptyGroup));
            }
        }

        let expr = input.try_parse::<Expr>()?;
        let unclosed = |input: &Parser| {
            let found = input.peek_token().map_or(input.eof_span(), |token| token.span.clone());
            Error::new(vec![open_span.clone(), found], kind::UnclosedGroup {
                closing: if sized { "\\right" } else { paren_kind.closing_str() },
            })
        };

        if sized {
            input.try_parse_with_fn(|input| parse_command(input, "\\right"))
                .map_err(|_| unclosed(input))?;
        }
        let close = input.try_parse_with_fn(|input| input.expect(paren_kind.closing()))
            .map_err(|_| unclosed(input))?;

        Ok(Self {
            expr: Box::new(expr),
            kind: paren_kind,
            sized,
            span: open_span.start..close.span.end,
        })
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        if token.kind == TokenKind::Command && token.lexeme == "\\left" {
            let delimiter = input.next_token()?;
            let paren_kind = ParenKind::from_opening(delimiter.kind)
                .filter(|paren_kind| *paren_kind != ParenKind::Curly)
                .ok_or_else(|| Error::new(vec![delimiter.span.clone()], kind::UnexpectedToken {
                    expected: &[TokenKind::OpenParen, TokenKind::OpenSquare, TokenKind::Pipe],
                    found: delimiter.kind,
                }))?;
            return Self::parse_rest(input, paren_kind, true, token.span);
        }

        match ParenKind::from_opening(token.kind) {
            Some(kind) => Self::parse_rest(input, kind, false, token.span),
            None => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[
                    TokenKind::OpenParen,
                    TokenKind::OpenSquare,
                    TokenKind::OpenCurly,
                    TokenKind::Pipe,
                ],
                found: token.kind,
            })),
        }
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ParenKind::Abs => write!(f, "|{}|", self.expr),
            _ => write!(f, "({})", self.expr),
        }
    }
}

impl Latex for Paren {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ParenKind::Round => {
                write!(f, "\\left(")?;
                self.expr.fmt_latex(f)?;
                write!(f, "\\right)")
            },
            ParenKind::Square => {
                write!(f, "\\left[")?;
                self.expr.fmt_latex(f)?;
                write!(f, "\\right]")
            },
            ParenKind::Curly => fmt_group(f, &*self.expr),
            ParenKind::Abs => {
                write!(f, "\\left|")?;
                self.expr.fmt_latex(f)?;
                write!(f, "\\right|")
            },
        }
    }
}
