//! The interface between the similarity core and the symbolic engine.

use crate::deadline::Deadline;
use crate::error::Error;
use crate::symbolic::{
    expr::{Formula, Symbol, SymExpr},
    simplify::{self, RuleSet, Step, DEFAULT_MAX_EXPAND_EXPONENT, DEFAULT_MAX_STEPS},
};
use formula_parser::parser::{ast::Expr as AstExpr, Parser};
use std::collections::HashMap;

/// The operations the similarity core needs from an expression engine.
///
/// Node introspection (kinds, children, free symbols, and structural keys) is available directly
/// on [`SymExpr`]; this trait covers the operations that depend on the engine's rules.
pub trait Engine {
    /// Parses a formula written in LaTeX.
    fn parse(&self, input: &str) -> Result<Formula, Error>;

    /// Simplifies the expression, without expanding products of sums.
    fn simplify(&self, expr: &SymExpr) -> Result<SymExpr, Error>;

    /// Fully expands the expression, distributing products over sums and resolving integer powers
    /// of sums.
    fn expand(&self, expr: &SymExpr) -> Result<SymExpr, Error>;

    /// Simplifies the expression, giving up with a [`Timeout`](crate::error::kind::Timeout) error
    /// once the deadline has passed.
    ///
    /// The default implementation only checks the deadline before starting. Engines whose
    /// simplification can run long should check it while they work.
    fn simplify_within(&self, expr: &SymExpr, deadline: &Deadline) -> Result<SymExpr, Error> {
        deadline.check("simplification")?;
        self.simplify(expr)
    }

    /// Expands the expression, giving up with a [`Timeout`](crate::error::kind::Timeout) error
    /// once the deadline has passed. See [`Engine::simplify_within`].
    fn expand_within(&self, expr: &SymExpr, deadline: &Deadline) -> Result<SymExpr, Error> {
        deadline.check("expansion")?;
        self.expand(expr)
    }

    /// Returns true if the two expressions are known to be mathematically equal.
    ///
    /// A `false` result means equality could not be shown, not that the expressions differ.
    fn equals(&self, lhs: &SymExpr, rhs: &SymExpr) -> bool;

    /// Renders the expression as LaTeX.
    fn render(&self, expr: &SymExpr) -> String;

    /// Replaces symbols with expressions, simultaneously.
    fn substitute(&self, expr: &SymExpr, substitutions: &HashMap<Symbol, SymExpr>) -> SymExpr {
        expr.substitute(substitutions)
    }
}

/// Limits for [`CasEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// The number of rule applications a single simplification may use.
    pub max_steps: usize,

    /// The largest exponent `n` for which `(a+b)^n` is expanded.
    pub max_expand_exponent: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            max_expand_exponent: DEFAULT_MAX_EXPAND_EXPONENT,
        }
    }
}

/// The rule-based engine implemented by this crate.
#[derive(Debug, Clone, Default)]
pub struct CasEngine {
    config: EngineConfig,
}

impl CasEngine {
    /// Creates an engine with the given limits.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the limits of this engine.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Simplifies the expression, returning the rewrite steps that were applied.
    pub fn simplify_with_steps(&self, expr: &SymExpr) -> Result<(SymExpr, Vec<Step>), Error> {
        let mut steps = Vec::new();
        let simplified = simplify::simplify_with(expr, RuleSet::simplify(), self.config.max_steps, &mut steps)?;
        Ok((simplified, steps))
    }
}

impl Engine for CasEngine {
    fn parse(&self, input: &str) -> Result<Formula, Error> {
        let ast = Parser::new(input).try_parse_full::<AstExpr>()?;
        Formula::try_from(ast)
    }

    fn simplify(&self, expr: &SymExpr) -> Result<SymExpr, Error> {
        self.simplify_within(expr, &Deadline::none())
    }

    fn expand(&self, expr: &SymExpr) -> Result<SymExpr, Error> {
        self.expand_within(expr, &Deadline::none())
    }

    fn simplify_within(&self, expr: &SymExpr, deadline: &Deadline) -> Result<SymExpr, Error> {
        simplify::simplify_within(expr, RuleSet::simplify(), self.config.max_steps, deadline, &mut ())
    }

    fn expand_within(&self, expr: &SymExpr, deadline: &Deadline) -> Result<SymExpr, Error> {
        let rule_set = RuleSet::expand(self.config.max_expand_exponent);
        simplify::simplify_within(expr, rule_set, self.config.max_steps, deadline, &mut ())
    }

    fn equals(&self, lhs: &SymExpr, rhs: &SymExpr) -> bool {
        lhs == rhs || self.expand(&(lhs.clone() - rhs.clone()))
            .map_or(false, |difference| difference.is_zero())
    }

    fn render(&self, expr: &SymExpr) -> String {
        expr.to_latex()
    }
}
