//! Structs to help parse binary and unary operators.

use crate::{
    parser::{
        error::{kind, Error},
        Associativity,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The unary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOpKind {
    Neg,
    Pos,
}

impl UnaryOpKind {
    /// Returns the precedence of the unary operation.
    pub fn precedence(&self) -> Precedence {
        Precedence::Neg
    }

    /// Returns the associativity of the unary operation.
    pub fn associativity(&self) -> Associativity {
        Associativity::Right
    }
}

/// A unary operator that takes one operand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryOp {
    /// The kind of unary operator.
    pub kind: UnaryOpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

impl UnaryOp {
    /// Returns the precedence of the unary operator.
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    /// Returns the associativity of the unary operator.
    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse for UnaryOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = match token.kind {
            TokenKind::Sub => Ok(UnaryOpKind::Neg),
            TokenKind::Add => Ok(UnaryOpKind::Pos),
            _ => Err(Error::new(vec![token.span.clone()], kind::UnexpectedToken {
                expected: &[TokenKind::Sub, TokenKind::Add],
                found: token.kind,
            })),
        }?;

        Ok(Self {
            kind,
            span: token.span,
        })
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            UnaryOpKind::Neg => write!(f, "-"),
            UnaryOpKind::Pos => write!(f, "+"),
        }
    }
}

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Add,
    Sub,
    Greater,
    GreaterEq,
    Less,
    LessEq,
    Eq,
    NotEq,
}

impl BinOpKind {
    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
            Self::Greater | Self::GreaterEq | Self::Less | Self::LessEq
                | Self::Eq | Self::NotEq => Precedence::Compare,
        }
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Exp => Associativity::Right,
            Self::Mul | Self::Div
                | Self::Add | Self::Sub
                | Self::Greater | Self::GreaterEq | Self::Less | Self::LessEq
                | Self::Eq | Self::NotEq => Associativity::Left,
        }
    }

    /// Returns true if the operation is a relation, such as `=` or `\leq`.
    pub fn is_relation(&self) -> bool {
        self.precedence() == Precedence::Compare
    }

    /// Returns the LaTeX source for this operation.
    pub fn latex(&self) -> &'static str {
        match self {
            Self::Exp => "^",
            Self::Mul => "\\cdot",
            Self::Div => "/",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Greater => ">",
            Self::GreaterEq => "\\geq",
            Self::Less => "<",
            Self::LessEq => "\\leq",
            Self::Eq => "=",
            Self::NotEq => "\\neq",
        }
    }

    /// Maps a command such as `\cdot` or `\leq` to the operation it denotes.
    fn from_command(name: &str) -> Option<Self> {
        match name {
            "\\cdot" | "\\times" => Some(Self::Mul),
            "\\div" => Some(Self::Div),
            "\\leq" | "\\le" => Some(Self::LessEq),
            "\\geq" | "\\ge" => Some(Self::GreaterEq),
            "\\neq" | "\\ne" => Some(Self::NotEq),
            "\\lt" => Some(Self::Less),
            "\\gt" => Some(Self::Greater),
            _ => None,
        }
    }
}

impl fmt::Display for BinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            Self::Exp => "^",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::Eq => "=",
            Self::NotEq => "!=",
        };
        write!(f, "{}", symbol)
    }
}

/// A binary operator that takes two operands.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinOp {
    /// The kind of binary operator.
    pub kind: BinOpKind,

    /// Whether this binary operator was implicitly inserted by the parser.
    pub implicit: bool,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

impl BinOp {
    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse for BinOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = match token.kind {
            TokenKind::Exp => Some(BinOpKind::Exp),
            TokenKind::Mul => Some(BinOpKind::Mul),
            TokenKind::Div => Some(BinOpKind::Div),
            TokenKind::Add => Some(BinOpKind::Add),
            TokenKind::Sub => Some(BinOpKind::Sub),
            TokenKind::Greater => Some(BinOpKind::Greater),
            TokenKind::Less => Some(BinOpKind::Less),
            TokenKind::Eq => Some(BinOpKind::Eq),
            TokenKind::Command => BinOpKind::from_command(token.lexeme),
            _ => None,
        };

        match kind {
            Some(kind) => Ok(Self {
                kind,
                implicit: false,
                span: token.span,
            }),
            None => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[
                    TokenKind::Exp,
                    TokenKind::Mul,
                    TokenKind::Div,
                    TokenKind::Add,
                    TokenKind::Sub,
                    TokenKind::Greater,
                    TokenKind::Less,
                    TokenKind::Eq,
                    TokenKind::Command,
                ],
                found: token.kind,
            })),
        }
    }
}
