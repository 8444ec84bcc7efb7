//! Simplification and expansion of [`SymExpr`]s.
//!
//! The simplifier is a bottom-up, fixpoint rewrite engine. The children of a node are simplified
//! first; then every rule in [`rules`] is tried on the node itself until none of them applies.
//! Whenever a rule rewrites a node, the children of the new node are simplified again, since the
//! rule may have produced children that are not yet in simplified form.
//!
//! Each successful rule application is a _step_. Steps are counted against a budget, and the
//! simplifier gives up with [`StepLimitExceeded`] when the budget runs out, which turns a rule
//! set that would rewrite forever into an error. A [`Deadline`] bounds the wall-clock time in
//! the same way: it is checked before every node is visited and after every step. The steps can
//! also be recorded with a [`StepCollector`], which is how `--steps` output is produced.
//!
//! [`expand`] applies the same rules plus the distributive property and expansion of integer
//! powers of sums, so that polynomials end up as sums of monomials. Two polynomials that are
//! equal as functions expand to strictly equal expressions, which is what
//! [`Engine::equals`](super::Engine::equals) relies on.
//!
//! ```
//! use formula_compute::symbolic::{simplify::simplify, CasEngine, Engine};
//!
//! let engine = CasEngine::default();
//! let expr = engine.parse("x + x + x").unwrap().into_zeroed();
//! assert_eq!(engine.render(&simplify(&expr).unwrap()), "3 x");
//! ```

mod coefficient;
pub mod rules;
pub mod step;

use crate::deadline::Deadline;
use crate::error::{kind::{DivisionByZero, StepLimitExceeded}, Error};
use crate::symbolic::{
    expr::{Primary, SymExpr},
    step_collector::StepCollector,
};
pub use rules::RuleSet;
pub use step::Step;

/// The default number of rule applications the simplifier is allowed.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// The default largest exponent `n` for which `(a+b)^n` is expanded.
pub const DEFAULT_MAX_EXPAND_EXPONENT: u32 = 8;

/// Applies rules bottom-up until a fixpoint, counting steps against the budget.
struct Rewriter<'a, 'd> {
    rule_set: RuleSet,
    max_steps: usize,
    steps: usize,
    deadline: &'d Deadline,
    step_collector: &'a mut dyn StepCollector<Step>,
}

impl Rewriter<'_, '_> {
    /// The name reported in a timeout.
    fn stage(&self) -> &'static str {
        if self.rule_set.expand {
            "expansion"
        } else {
            "simplification"
        }
    }

    fn rewrite(&mut self, expr: SymExpr) -> Result<SymExpr, Error> {
        self.deadline.check(self.stage())?;
        let mut expr = expr.try_map_children(|child| self.rewrite(child))?;

        while let Some(next) = rules::all(&expr, &self.rule_set, &mut *self.step_collector) {
            self.steps += 1;
            if self.steps > self.max_steps {
                return Err(Error::spanless(StepLimitExceeded { limit: self.max_steps }));
            }
            self.deadline.check(self.stage())?;
            expr = next.try_map_children(|child| self.rewrite(child))?;
        }

        Ok(expr)
    }
}

/// Returns true if the expression raises zero to a negative power anywhere.
fn divides_by_zero(expr: &SymExpr) -> bool {
    expr.pre_order_iter().any(|node| match node {
        SymExpr::Exp(base, exp) => base.is_zero() && match &**exp {
            SymExpr::Primary(Primary::Integer(n)) => *n < 0,
            SymExpr::Primary(Primary::Float(n)) => n.is_sign_negative() && !n.is_zero(),
            _ => false,
        },
        _ => false,
    })
}

/// Simplifies the given expression with the given rule set and step budget, reporting each step
/// to the step collector.
pub fn simplify_with(
    expr: &SymExpr,
    rule_set: RuleSet,
    max_steps: usize,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<SymExpr, Error> {
    simplify_within(expr, rule_set, max_steps, &Deadline::none(), step_collector)
}

/// Like [`simplify_with`], but gives up with a [`Timeout`](crate::error::kind::Timeout) error
/// once the deadline has passed.
pub fn simplify_within(
    expr: &SymExpr,
    rule_set: RuleSet,
    max_steps: usize,
    deadline: &Deadline,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<SymExpr, Error> {
    let mut rewriter = Rewriter { rule_set, max_steps, steps: 0, deadline, step_collector };
    let simplified = rewriter.rewrite(expr.clone())?;
    if divides_by_zero(&simplified) {
        return Err(Error::spanless(DivisionByZero));
    }

    Ok(simplified)
}

/// Simplifies the given expression with the default step budget.
pub fn simplify(expr: &SymExpr) -> Result<SymExpr, Error> {
    simplify_with(expr, RuleSet::simplify(), DEFAULT_MAX_STEPS, &mut ())
}

/// Simplifies the given expression, returning the simplified expression along with the steps
/// taken to simplify it.
pub fn simplify_with_steps(expr: &SymExpr) -> Result<(SymExpr, Vec<Step>), Error> {
    let mut steps = Vec::new();
    let simplified = simplify_with(expr, RuleSet::simplify(), DEFAULT_MAX_STEPS, &mut steps)?;
    Ok((simplified, steps))
}

/// Fully expands the given expression with the default step budget.
pub fn expand(expr: &SymExpr) -> Result<SymExpr, Error> {
    simplify_with(expr, RuleSet::expand(DEFAULT_MAX_EXPAND_EXPONENT), DEFAULT_MAX_STEPS, &mut ())
}

#[cfg(test)]
mod tests {
    use crate::error::kind::Timeout;
    use crate::primitive::int;
    use crate::symbolic::expr::{Constant, Formula, Symbol};
    use formula_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use super::*;

    fn sym(name: &str) -> SymExpr {
        SymExpr::from(Symbol::new(name))
    }

    fn num(n: i32) -> SymExpr {
        SymExpr::from(int(n))
    }

    fn parse(input: &str) -> SymExpr {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        Formula::try_from(ast).unwrap().into_zeroed()
    }

    #[test]
    fn combine_like_terms() {
        assert_eq!(simplify(&parse("x + x + x")).unwrap(), SymExpr::Mul(vec![num(3), sym("x")]));
    }

    #[test]
    fn subtract_self() {
        assert_eq!(simplify(&parse("2xy - yx \\cdot 2")).unwrap(), num(0));
    }

    #[test]
    fn add_fractions() {
        assert_eq!(
            simplify(&parse("\\frac{1}{2} + \\frac{1}{3}")).unwrap(),
            SymExpr::Mul(vec![num(5), SymExpr::pow(num(6), num(-1))]),
        );
    }

    #[test]
    fn cancel_factors() {
        assert_eq!(simplify(&parse("\\frac{x^3 y}{x y}")).unwrap(), SymExpr::pow(sym("x"), num(2)));
    }

    #[test]
    fn simplify_keeps_products_of_sums() {
        let simplified = simplify(&parse("(x+2)(x+3)")).unwrap();
        assert!(matches!(simplified, SymExpr::Mul(ref factors) if factors.len() == 2));
    }

    #[test]
    fn expand_product_of_sums() {
        assert_eq!(expand(&parse("(x+2)(x+3)")).unwrap(), SymExpr::Add(vec![
            SymExpr::pow(sym("x"), num(2)),
            SymExpr::Mul(vec![num(5), sym("x")]),
            num(6),
        ]));
    }

    #[test]
    fn expand_square() {
        assert_eq!(expand(&parse("(a+b)^2 - a^2 - b^2")).unwrap(), SymExpr::Mul(vec![
            num(2),
            sym("a"),
            sym("b"),
        ]));
    }

    #[test]
    fn trig_identities() {
        assert_eq!(simplify(&parse("\\sin^2 x + \\cos^2 x")).unwrap(), num(1));
        assert_eq!(
            simplify(&parse("\\frac{\\sin x}{\\cos x}")).unwrap(),
            SymExpr::call("tan", vec![sym("x")]),
        );
        assert_eq!(simplify(&parse("\\cos(\\pi) + \\sin(0)")).unwrap(), num(-1));
    }

    #[test]
    fn roots_and_logs() {
        assert_eq!(simplify(&parse("\\sqrt{16} + \\sqrt[3]{27}")).unwrap(), num(7));
        assert_eq!(simplify(&parse("\\ln(e^{x})")).unwrap(), sym("x"));
        assert_eq!(simplify(&parse("\\exp(0)")).unwrap(), num(1));
        assert_eq!(simplify(&parse("e")).unwrap(), SymExpr::from(Constant::E));
    }

    #[test]
    fn record_steps() {
        let (simplified, steps) = simplify_with_steps(&parse("x + 0")).unwrap();
        assert_eq!(simplified, sym("x"));
        assert_eq!(steps, vec![Step::AddZero]);
    }

    #[test]
    fn division_by_zero() {
        let err = simplify(&parse("\\frac{1}{x - x}")).unwrap_err();
        assert!(err.is::<DivisionByZero>());
    }

    #[test]
    fn step_limit() {
        let err = simplify_with(&parse("x + 0 + x"), RuleSet::simplify(), 1, &mut ()).unwrap_err();
        assert!(err.is::<StepLimitExceeded>());
    }

    #[test]
    fn expired_deadline() {
        let expired = Deadline::new(Some(Duration::ZERO));
        let expr = parse("(a+b+c+d)^{4}");

        let err = simplify_within(&expr, RuleSet::expand(8), DEFAULT_MAX_STEPS, &expired, &mut ())
            .unwrap_err();
        assert_eq!(err.downcast_ref::<Timeout>().unwrap().stage, "expansion");

        let err = simplify_within(&expr, RuleSet::simplify(), DEFAULT_MAX_STEPS, &expired, &mut ())
            .unwrap_err();
        assert_eq!(err.downcast_ref::<Timeout>().unwrap().stage, "simplification");
    }

    #[test]
    fn deadline_not_reached() {
        let deadline = Deadline::new(Some(Duration::from_secs(3600)));
        let expanded = simplify_within(
            &parse("(x+2)(x+3)"),
            RuleSet::expand(8),
            DEFAULT_MAX_STEPS,
            &deadline,
            &mut (),
        ).unwrap();
        assert_eq!(expanded, expand(&parse("(x+2)(x+3)")).unwrap());
    }
}
