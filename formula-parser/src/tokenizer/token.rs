use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\n\r\f]+")]
    Whitespace,

    /// Explicit LaTeX spacing, such as `\,` or `\quad`.
    #[regex(r"\\[,;:! ]")]
    #[token("\\quad")]
    #[token("\\qquad")]
    Spacing,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("^")]
    Exp,

    #[token("_")]
    Underscore,

    #[token("=")]
    Eq,

    #[token("<")]
    Less,

    #[token(">")]
    Greater,

    #[token(",")]
    Comma,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token("[")]
    OpenSquare,

    #[token("]")]
    CloseSquare,

    #[token("{")]
    OpenCurly,

    #[token("}")]
    CloseCurly,

    #[token("|")]
    Pipe,

    /// A control sequence, such as `\frac` or `\alpha`.
    #[regex(r"\\[a-zA-Z]+")]
    Command,

    /// A single letter. In LaTeX math mode, `ab` is the product of `a` and `b`.
    #[regex(r"[a-zA-Z]")]
    Letter,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]+|\.[0-9]+")]
    Float,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Spacing)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}
