//! Simplification rules for the absolute value.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_call, step::Step},
    step_collector::StepCollector,
};

/// `|-3| = 3`
/// `|x| = x`, `x >= 0`
/// `|x| = -x`, `x < 0`
pub fn abs(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "abs", |args| {
        let [arg] = args else {
            return None;
        };

        if arg.is_nonnegative() {
            Some(arg.clone())
        } else if arg.is_number() || arg.as_symbol().map_or(false, |sym| sym.assumptions.is_negative()) {
            Some(-arg.clone())
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AbsoluteValue);
    Some(opt)
}

/// Applies all absolute value rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    abs(expr, step_collector)
}
