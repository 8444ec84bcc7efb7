pub mod ast;
pub mod error;
pub mod fmt;
pub mod token;

use error::{kind, Error};
use formula_error::ErrorKind;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A high-level parser for LaTeX formulas. This is the type to use to parse an arbitrary formula
/// into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Set the cursor of this parser to the cursor of another parser. Both parsers must be
    /// parsing the same source.
    pub fn set_cursor(&mut self, other: &Parser) {
        self.cursor = other.cursor;
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the previous token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Returns the end of the span of the previously consumed token.
    pub fn prev_end(&self) -> usize {
        self.prev_token().map_or(0, |token| token.span.end)
    }

    /// Returns the next non-whitespace token without advancing the cursor. Returns [`None`] if
    /// there are no more tokens.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns true if the next non-whitespace token is of the given kind.
    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek_token().map_or(false, |token| token.kind == kind)
    }

    /// Returns true if the next non-whitespace token is a command with one of the given names.
    pub fn peek_command(&self, names: &[&str]) -> bool {
        self.peek_token().map_or(false, |token| {
            token.kind == TokenKind::Command && names.contains(&token.lexeme)
        })
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Returns the next token, or an [`kind::UnexpectedToken`] error pointing at it if it is not
    /// of the given kind. The cursor is advanced either way.
    pub fn expect(&mut self, expected: &'static [TokenKind]) -> Result<Token<'source>, Error> {
        let token = self.next_token()?;
        if expected.contains(&token.kind) {
            Ok(token)
        } else {
            Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected,
                found: token.kind,
            }))
        }
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value. This function can be used in the [`Parse::parse`]
    /// implementation of a type with the given [`Parser`], as it will automatically backtrack the
    /// cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`Ok`] for this
    /// function to return successfully.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        let start = self.cursor;

        // closure workaround allows us to use `?` in the closure
        let compute = || {
            let value = T::parse(self)?;
            predicate(&value, self)?;
            Ok(value)
        };

        match compute() {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;

        // trailing whitespace is fine
        if self.peek_token().is_none() {
            self.cursor = self.tokens.len();
            Ok(value)
        } else {
            let start = self.peek_token().map_or(self.eof_span(), |token| token.span.clone()).start;
            Err(Error::new(vec![start..self.eof_span().end], kind::ExpectedEof))
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)` (the operators appear to the
    /// left of the operand).
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of relations (`=`, `<`, `>`, `\leq`, `\geq`, and `\neq`).
    Compare,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`, `\cdot`, `\times`, and implicit multiplication) and
    /// division (`/` and `\div`), which separate factors.
    Factor,

    /// Precedence of unary negation (`-`) and unary plus (`+`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{
        binary::Binary,
        call::Call,
        expr::Expr,
        frac::Frac,
        literal::{ConstantKind, LitConst, LitInt, LitSym, Literal},
        paren::{Paren, ParenKind},
        root::Root,
        unary::Unary,
    };
    use fmt::Latex;
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn parse(source: &str) -> Expr {
        Parser::new(source).try_parse_full::<Expr>().unwrap()
    }

    fn latex(source: &str) -> String {
        parse(source).as_display().to_string()
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn int(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Integer(LitInt { value: value.to_string(), span }))
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16"), int("16", 0..2));
    }

    #[test]
    fn literal_symbol_with_subscript() {
        assert_eq!(parse("x_1"), sym("x_{1}", 0..3));
        assert_eq!(parse("m_{12}"), sym("m_{12}", 0..6));
        assert_eq!(parse("\\alpha_{i}"), sym("\\alpha_{i}", 0..10));
    }

    #[test]
    fn decorated_symbol() {
        assert_eq!(parse("\\vec{F}"), sym("\\vec{F}", 0..7));
        assert_eq!(parse("\\hat x"), sym("\\hat{x}", 0..6));
    }

    #[test]
    fn constants() {
        assert_eq!(parse("\\pi"), Expr::Literal(Literal::Constant(LitConst {
            kind: ConstantKind::Pi,
            span: 0..3,
        })));
    }

    #[test]
    fn binary_precedence() {
        assert_eq!(parse("a + b * c"), Expr::Binary(Binary {
            lhs: Box::new(sym("a", 0..1)),
            op: BinOp { kind: BinOpKind::Add, implicit: false, span: 2..3 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(sym("b", 4..5)),
                op: BinOp { kind: BinOpKind::Mul, implicit: false, span: 6..7 },
                rhs: Box::new(sym("c", 8..9)),
                span: 4..9,
            })),
            span: 0..9,
        }));
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(parse("2x"), Expr::Binary(Binary {
            lhs: Box::new(int("2", 0..1)),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..1 },
            rhs: Box::new(sym("x", 1..2)),
            span: 0..2,
        }));
    }

    #[test]
    fn negation_binds_looser_than_power() {
        assert_eq!(parse("-x^2"), Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: Box::new(sym("x", 1..2)),
                op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 2..3 },
                rhs: Box::new(int("2", 3..4)),
                span: 1..4,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn frac_and_sqrt() {
        assert_eq!(parse("\\frac{1}{x}"), Expr::Frac(Frac {
            numerator: Box::new(int("1", 6..7)),
            denominator: Box::new(sym("x", 9..10)),
            span: 0..11,
        }));
        assert_eq!(parse("\\sqrt[3]{y}"), Expr::Root(Root {
            radicand: Box::new(sym("y", 9..10)),
            index: Some(Box::new(int("3", 6..7))),
            span: 0..11,
        }));
    }

    #[test]
    fn function_call_with_group() {
        assert_eq!(parse("\\sin(x)"), Expr::Call(Call {
            name: "sin".to_string(),
            power: None,
            base: None,
            arg: Box::new(Expr::Paren(Paren {
                expr: Box::new(sym("x", 5..6)),
                kind: ParenKind::Round,
                sized: false,
                span: 4..7,
            })),
            span: 0..7,
        }));
    }

    #[test]
    fn function_call_implicit_argument() {
        assert_eq!(latex("\\sin 2x + 1"), "\\sin\\left(2 x\\right) + 1");
        assert_eq!(latex("\\cos x \\sin y"), "\\cos\\left(x\\right) \\sin\\left(y\\right)");
        assert_eq!(latex("\\sin^2 x"), "\\sin^{2}\\left(x\\right)");
        assert_eq!(latex("\\log_{2} 8"), "\\log_{2}\\left(8\\right)");
    }

    #[test]
    fn relations() {
        assert_eq!(latex("E = mc^2"), "E = m c^{2}");
        assert_eq!(latex("a \\leq b"), "a \\leq b");
        assert_eq!(latex("x \\ne 0"), "x \\neq 0");
    }

    #[test]
    fn sized_delimiters() {
        assert_eq!(latex("\\left( a + b \\right) c"), "\\left(a + b\\right) c");
        assert_eq!(latex("\\left| x \\right|"), "\\left|x\\right|");
        assert_eq!(latex("|x - 1|"), "\\left|x - 1\\right|");
    }

    #[test]
    fn explicit_operators() {
        assert_eq!(latex("a \\cdot b \\times c"), "a \\cdot b \\cdot c");
        assert_eq!(latex("a \\div b"), "a / b");
        assert_eq!(latex("x^{n+1}"), "x^{n + 1}");
    }

    #[test]
    fn spacing_is_ignored() {
        assert_eq!(latex("a\\,b \\quad + \\; c"), "a b + c");
    }

    #[test]
    fn display_plain() {
        assert_eq!(parse("\\frac{a}{b} + \\sqrt{x}").to_string(), "(a)/(b) + sqrt(x)");
        assert_eq!(parse("2\\sin x").to_string(), "2sin(x)");
    }

    #[test]
    fn error_unknown_command() {
        let err = Parser::new("\\foo + 1").try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<kind::UnknownCommand>());
        assert_eq!(err.spans, vec![0..4]);
    }

    #[test]
    fn error_unclosed_group() {
        let err = Parser::new("(a + b").try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<kind::UnclosedGroup>());
    }

    #[test]
    fn error_empty_group() {
        let err = Parser::new("\\frac{}{2}").try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<kind::EmptyGroup>());
    }

    #[test]
    fn error_trailing_tokens() {
        let err = Parser::new("a + b )").try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<kind::ExpectedEof>());
        assert_eq!(err.spans, vec![6..7]);
    }

    #[test]
    fn error_dangling_operator() {
        let err = Parser::new("a +").try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<kind::UnexpectedEof>());
    }
}
