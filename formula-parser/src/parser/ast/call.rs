use crate::{
    parser::{
        ast::{binary::Binary, expr::{Expr, Primary}, paren::Paren, unary::Unary},
        error::{kind, Error},
        fmt::{fmt_group, fmt_paren, Latex},
        token::op::BinOp,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The function commands that are recognized.
pub const FUNCTIONS: [&str; 16] = [
    "\\sin", "\\cos", "\\tan", "\\cot", "\\sec", "\\csc",
    "\\arcsin", "\\arccos", "\\arctan",
    "\\sinh", "\\cosh", "\\tanh", "\\coth",
    "\\ln", "\\log", "\\exp",
];

/// A function application, such as `\sin x`, `\sin^2(x)`, or `\log_2 8`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function, without the leading backslash.
    pub name: String,

    /// The power written directly after the function name, as in `\sin^2 x`.
    pub power: Option<Box<Expr>>,

    /// The base of a logarithm, as in `\log_2 x`.
    pub base: Option<Box<Expr>>,

    /// The argument of the function.
    pub arg: Box<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a superscript or subscript attached to the function name.
    fn parse_script(input: &mut Parser) -> Result<Box<Expr>, Error> {
        input.next_token()?;
        Unary::parse_or_lower(input).map(Box::new)
    }

    /// Parses an argument that is not delimited, as in `\sin 2x`. The argument extends over
    /// implicitly multiplied factors, up to the next explicit operator or function.
    fn parse_implicit_argument(input: &mut Parser) -> Result<Expr, Error> {
        let first = Unary::parse_or_lower(input)?;
        let (mut arg, _) = Binary::parse_expr(input, first, Precedence::Exp)?;

        loop {
            if Primary::starts_call(input) {
                break;
            }

            let mut input_ahead = input.clone();
            if input_ahead.try_parse::<BinOp>().is_ok() {
                break;
            }

            let Ok(factor) = input.try_parse_with_fn(|input| {
                let factor = Primary::parse(input)?;
                Binary::parse_expr(input, factor, Precedence::Exp).map(|(expr, _)| expr)
            }) else {
                break;
            };
            arg = Binary::implicit(arg, factor);
        }

        Ok(arg)
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        if token.kind != TokenKind::Command || !FUNCTIONS.contains(&token.lexeme) {
            return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Command],
                found: token.kind,
            }));
        }

        let mut power = None;
        let mut base = None;
        loop {
            if power.is_none() && input.peek_is(TokenKind::Exp) {
                power = Some(Self::parse_script(input)?);
            } else if base.is_none() && token.lexeme == "\\log" && input.peek_is(TokenKind::Underscore) {
                base = Some(Self::parse_script(input)?);
            } else {
                break;
            }
        }

        let delimited = input.peek_is(TokenKind::OpenParen)
            || input.peek_is(TokenKind::OpenSquare)
            || input.peek_is(TokenKind::OpenCurly)
            || input.peek_command(&["\\left"]);
        let arg = if delimited {
            Expr::Paren(input.try_parse::<Paren>()?)
        } else {
            Self::parse_implicit_argument(input)?
        };

        let span = token.span.start..arg.span().end;
        Ok(Self {
            name: token.lexeme[1..].to_string(),
            power,
            base,
            arg: Box::new(arg),
            span,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(power) = &self.power {
            write!(f, "^{}", power)?;
        }
        if let Some(base) = &self.base {
            write!(f, "_{}", base)?;
        }
        write!(f, "({})", self.arg.innermost())
    }
}

impl Latex for Call {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\{}", self.name)?;
        if let Some(power) = &self.power {
            write!(f, "^")?;
            fmt_group(f, power.innermost())?;
        }
        if let Some(base) = &self.base {
            write!(f, "_")?;
            fmt_group(f, base.innermost())?;
        }
        fmt_paren(f, self.arg.innermost())
    }
}
