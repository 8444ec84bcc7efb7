//! Implementation of many simplification rules.
//!
//! Each rule in this module is a function that takes the expression to simplify as an argument,
//! and returns `Some(expr)` with the simplified expression if the rule applies, or `None` if the
//! rule does not apply. Rules only look at the node they are given; the driver in
//! [`super::simplify_with`] takes care of visiting every node and re-simplifying the output.

pub mod abs;
pub mod add;
pub mod distribute;
pub mod log;
pub mod multiply;
pub mod power;
pub mod trigonometry;

use crate::symbolic::step_collector::StepCollector;
use super::{step::Step, Primary, SymExpr};

/// The set of rules to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    /// Whether to apply the expansion rules: the distributive property, and expansion of integer
    /// powers of sums.
    pub expand: bool,

    /// The largest exponent `n` for which `(a+b)^n` is expanded.
    pub max_expand_exponent: u32,
}

impl RuleSet {
    /// Rules that reduce the expression without expanding products of sums.
    pub fn simplify() -> Self {
        Self { expand: false, max_expand_exponent: 8 }
    }

    /// Rules that additionally expand products and powers of sums.
    pub fn expand(max_expand_exponent: u32) -> Self {
        Self { expand: true, max_expand_exponent }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::simplify()
    }
}

/// If the expression is a function call with the given function name, calls the given
/// transformation function with the arguments.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_call(
    expr: &SymExpr,
    name: &str,
    f: impl Copy + Fn(&[SymExpr]) -> Option<SymExpr>,
) -> Option<SymExpr> {
    if let SymExpr::Primary(Primary::Call(target_name, args)) = expr {
        if target_name == name {
            return f(args);
        }
    }

    None
}

/// If the expression is an add expression, calls the given transformation function with the terms.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_add(expr: &SymExpr, f: impl Copy + Fn(&[SymExpr]) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Add(terms) = expr {
        f(terms)
    } else {
        None
    }
}

/// If the expression is a multiplication expression, calls the given transformation function with
/// the factors.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_multiply(expr: &SymExpr, f: impl Copy + Fn(&[SymExpr]) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Mul(factors) = expr {
        f(factors)
    } else {
        None
    }
}

/// If the expression is a power expression, calls the given transformation function with the left
/// and right-hand-side of the power.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_power(expr: &SymExpr, f: impl Copy + Fn(&SymExpr, &SymExpr) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Exp(lhs, rhs) = expr {
        f(lhs, rhs)
    } else {
        None
    }
}

/// Returns the base and exponent of an expression. If the expression is not [`SymExpr::Exp`], the
/// exponent is `1`.
///
/// - `a^b` -> `(a, b)`
/// - `a` -> `(a, 1)`
pub(crate) fn base_and_exp(expr: &SymExpr) -> (SymExpr, SymExpr) {
    match expr {
        SymExpr::Exp(lhs, rhs) => ((**lhs).clone(), (**rhs).clone()),
        expr => (expr.clone(), SymExpr::from(crate::primitive::int(1))),
    }
}

/// Applies all rules in the rule set.
pub fn all(expr: &SymExpr, rule_set: &RuleSet, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    add::all(expr, step_collector)
        .or_else(|| multiply::all(expr, step_collector))
        .or_else(|| power::all(expr, step_collector))
        .or_else(|| trigonometry::all(expr, step_collector))
        .or_else(|| log::all(expr, step_collector))
        .or_else(|| abs::all(expr, step_collector))
        .or_else(|| if rule_set.expand {
            distribute::all(expr, rule_set.max_expand_exponent, step_collector)
        } else {
            None
        })
}
