//! Tokenizer and parser for the LaTeX subset in which formulas are written.
//!
//! The [`tokenizer`] turns the source into [`Token`](tokenizer::Token)s with [`logos`], and the
//! [`parser`] builds a spanned abstract syntax tree from them. The tree can be turned back into
//! normalized LaTeX with the [`Latex`](parser::fmt::Latex) trait.
//!
//! ```
//! use formula_parser::parser::{ast::Expr, fmt::Latex, Parser};
//!
//! let expr = Parser::new("\\frac{a}{b} + \\sin 2x").try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.as_display().to_string(), "\\frac{a}{b} + \\sin\\left(2 x\\right)");
//! ```

pub mod parser;
pub mod tokenizer;
