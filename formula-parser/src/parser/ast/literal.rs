use crate::{
    parser::{
        error::{kind, Error},
        fmt::Latex,
        Parse,
        Parser,
    },
    tokenizer::{Token, TokenKind},
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Greek letters (and a few letter-like commands) that denote variables.
pub const GREEK: [&str; 41] = [
    "\\alpha", "\\beta", "\\gamma", "\\delta", "\\epsilon", "\\varepsilon", "\\zeta", "\\eta",
    "\\theta", "\\vartheta", "\\iota", "\\kappa", "\\lambda", "\\mu", "\\nu", "\\xi", "\\rho",
    "\\varrho", "\\sigma", "\\varsigma", "\\tau", "\\upsilon", "\\phi", "\\varphi", "\\chi",
    "\\psi", "\\omega", "\\Gamma", "\\Delta", "\\Theta", "\\Lambda", "\\Xi", "\\Pi", "\\Sigma",
    "\\Upsilon", "\\Phi", "\\Psi", "\\Omega", "\\ell", "\\hbar", "\\nabla",
];

/// Commands that decorate a symbol, producing a new, distinct symbol.
pub const DECORATIONS: [&str; 9] = [
    "\\vec", "\\hat", "\\bar", "\\dot", "\\ddot", "\\tilde", "\\boldsymbol", "\\mathbf",
    "\\mathrm",
];

/// Returns true if the command denotes a literal: a variable, a decorated variable, or a
/// constant.
pub fn is_literal_command(name: &str) -> bool {
    GREEK.contains(&name) || DECORATIONS.contains(&name) || ConstantKind::from_command(name).is_some()
}

/// An integer literal, such as `42`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitInt {
    /// The digits of the integer.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

/// A decimal literal, such as `3.14`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitFloat {
    /// The digits of the number, including the decimal point.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

/// A variable, such as `x`, `x_{1}`, `\alpha`, or `\vec{F}`.
///
/// The name is stored in normalized LaTeX form, so that `x_1` and `x_{1}` are the same variable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The normalized LaTeX name of the variable.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

/// A named mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConstantKind {
    /// `\pi`
    Pi,

    /// `\infty`
    Infinity,
}

impl ConstantKind {
    /// Maps a command to the constant it denotes.
    pub fn from_command(name: &str) -> Option<Self> {
        match name {
            "\\pi" => Some(Self::Pi),
            "\\infty" => Some(Self::Infinity),
            _ => None,
        }
    }

    /// Returns the LaTeX command for this constant.
    pub fn latex(&self) -> &'static str {
        match self {
            Self::Pi => "\\pi",
            Self::Infinity => "\\infty",
        }
    }
}

/// A constant, such as `\pi`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitConst {
    /// The constant.
    pub kind: ConstantKind,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    Integer(LitInt),
    Float(LitFloat),
    Symbol(LitSym),
    Constant(LitConst),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Integer(int) => int.span.clone(),
            Literal::Float(float) => float.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
            Literal::Constant(constant) => constant.span.clone(),
        }
    }
}

/// Parses the braced argument of a decoration like `\vec`, returning its text and the end of its
/// span. Only letters, digits, and Greek letters may appear inside.
fn parse_decorated(input: &mut Parser, command: &Token) -> Result<(String, usize), Error> {
    let invalid = |token: &Token| Error::new(
        vec![command.span.clone(), token.span.clone()],
        kind::InvalidDecoration { command: command.lexeme.to_string() },
    );
    let is_plain = |token: &Token| match token.kind {
        TokenKind::Letter | TokenKind::Int => true,
        TokenKind::Command => GREEK.contains(&token.lexeme),
        _ => false,
    };

    let first = input.next_token()?;
    if first.kind != TokenKind::OpenCurly {
        return if is_plain(&first) {
            Ok((first.lexeme.to_string(), first.span.end))
        } else {
            Err(invalid(&first))
        };
    }

    let mut text = String::new();
    loop {
        let token = input.next_token().map_err(|_| Error::new(
            vec![first.span.clone(), input.eof_span()],
            kind::UnclosedGroup { closing: "}" },
        ))?;
        match token.kind {
            TokenKind::CloseCurly if text.is_empty() => {
                return Err(Error::new(vec![first.span.start..token.span.end], kind::EmptyGroup));
            },
            TokenKind::CloseCurly => return Ok((text, token.span.end)),
            _ if is_plain(&token) => text.push_str(token.lexeme),
            _ => return Err(invalid(&token)),
        }
    }
}

/// Parses an optional subscript, such as the `_{1}` in `x_{1}`. Returns the normalized text of
/// the subscript and the end of its span.
fn parse_subscript(input: &mut Parser) -> Result<Option<(String, usize)>, Error> {
    if !input.peek_is(TokenKind::Underscore) {
        return Ok(None);
    }
    input.next_token()?;

    let first = input.next_token()?;
    match first.kind {
        TokenKind::Int | TokenKind::Letter => Ok(Some((first.lexeme.to_string(), first.span.end))),
        TokenKind::Command if GREEK.contains(&first.lexeme) => {
            Ok(Some((first.lexeme.to_string(), first.span.end)))
        },
        TokenKind::OpenCurly => {
            let mut depth = 0usize;
            let mut text = String::new();
            loop {
                let token = input.next_token().map_err(|_| Error::new(
                    vec![first.span.clone(), input.eof_span()],
                    kind::UnclosedGroup { closing: "}" },
                ))?;
                match token.kind {
                    TokenKind::CloseCurly if depth == 0 => {
                        if text.is_empty() {
                            return Err(Error::new(vec![first.span.start..token.span.end], kind::EmptyGroup));
                        }
                        return Ok(Some((text, token.span.end)));
                    },
                    TokenKind::CloseCurly => depth -= 1,
                    TokenKind::OpenCurly => depth += 1,
                    _ => (),
                }
                text.push_str(token.lexeme);
            }
        },
        _ => Err(Error::new(vec![first.span], kind::UnexpectedToken {
            expected: &[TokenKind::Int, TokenKind::Letter, TokenKind::OpenCurly],
            found: first.kind,
        })),
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let (base, span) = match token.kind {
            TokenKind::Int => return Ok(Literal::Integer(LitInt {
                value: token.lexeme.to_string(),
                span: token.span,
            })),
            TokenKind::Float => return Ok(Literal::Float(LitFloat {
                value: token.lexeme.to_string(),
                span: token.span,
            })),
            TokenKind::Letter => (token.lexeme.to_string(), token.span.clone()),
            TokenKind::Command => {
                if let Some(kind) = ConstantKind::from_command(token.lexeme) {
                    return Ok(Literal::Constant(LitConst { kind, span: token.span }));
                } else if GREEK.contains(&token.lexeme) {
                    (token.lexeme.to_string(), token.span.clone())
                } else if DECORATIONS.contains(&token.lexeme) {
                    let (inner, end) = parse_decorated(input, &token)?;
                    (format!("{}{{{}}}", token.lexeme, inner), token.span.start..end)
                } else {
                    return Err(Error::new(vec![token.span], kind::UnknownCommand {
                        name: token.lexeme.to_string(),
                    }));
                }
            },
            _ => return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Int, TokenKind::Float, TokenKind::Letter, TokenKind::Command],
                found: token.kind,
            })),
        };

        match parse_subscript(input)? {
            Some((subscript, end)) => Ok(Literal::Symbol(LitSym {
                name: format!("{}_{{{}}}", base, subscript),
                span: span.start..end,
            })),
            None => Ok(Literal::Symbol(LitSym { name: base, span })),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Integer(int) => write!(f, "{}", int.value),
            Literal::Float(float) => write!(f, "{}", float.value),
            Literal::Symbol(sym) => write!(f, "{}", sym.name),
            Literal::Constant(constant) => match constant.kind {
                ConstantKind::Pi => write!(f, "pi"),
                ConstantKind::Infinity => write!(f, "oo"),
            },
        }
    }
}

impl Latex for Literal {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Integer(int) => write!(f, "{}", int.value),
            Literal::Float(float) => write!(f, "{}", float.value),
            Literal::Symbol(sym) => write!(f, "{}", sym.name),
            Literal::Constant(constant) => write!(f, "{}", constant.kind.latex()),
        }
    }
}
