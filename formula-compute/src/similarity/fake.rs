//! A purely structural [`Engine`], so that the similarity core can be tested without depending on
//! what the simplification rules do.

use crate::error::Error;
use crate::symbolic::{expr::{Formula, SymExpr}, Engine};
use formula_parser::parser::{ast::Expr as AstExpr, Parser};

/// Parses like the real engine, but never rewrites anything. Equality is strict equality, and
/// rendering is the plain-text [`Display`](std::fmt::Display) form.
pub struct StructuralEngine;

impl StructuralEngine {
    /// Parses the input and reduces it to a single expression.
    pub fn expr(&self, input: &str) -> SymExpr {
        self.parse(input).unwrap().into_zeroed()
    }
}

impl Engine for StructuralEngine {
    fn parse(&self, input: &str) -> Result<Formula, Error> {
        let ast = Parser::new(input).try_parse_full::<AstExpr>()?;
        Formula::try_from(ast)
    }

    fn simplify(&self, expr: &SymExpr) -> Result<SymExpr, Error> {
        Ok(expr.clone())
    }

    fn expand(&self, expr: &SymExpr) -> Result<SymExpr, Error> {
        Ok(expr.clone())
    }

    fn equals(&self, lhs: &SymExpr, rhs: &SymExpr) -> bool {
        lhs == rhs
    }

    fn render(&self, expr: &SymExpr) -> String {
        expr.to_string()
    }
}
