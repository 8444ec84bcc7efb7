//! Simplification rules for logarithms.

use crate::primitive::int;
use crate::symbolic::{
    expr::{Constant, SymExpr},
    simplify::{rules::do_call, step::Step},
    step_collector::StepCollector,
};

/// `log(1) = 0`
/// `log(e) = 1`
/// `log(e^x) = x`
pub fn log(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "log", |args| {
        let e = SymExpr::from(Constant::E);
        match args {
            [arg] if arg.is_one() => Some(SymExpr::from(int(0))),
            [arg] if *arg == e => Some(SymExpr::from(int(1))),
            [SymExpr::Exp(base, exp)] if **base == e => Some((**exp).clone()),
            _ => None,
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Logarithm);
    Some(opt)
}

/// Applies all logarithm rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    log(expr, step_collector)
}

#[cfg(test)]
mod tests {
    use crate::symbolic::expr::Symbol;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn inverse_of_exponential() {
        let x = SymExpr::from(Symbol::new("x"));
        let expr = SymExpr::call("log", vec![SymExpr::pow(SymExpr::from(Constant::E), x.clone())]);
        assert_eq!(log(&expr, &mut ()), Some(x.clone()));

        let expr = SymExpr::call("log", vec![SymExpr::from(int(1))]);
        assert_eq!(log(&expr, &mut ()), Some(SymExpr::from(int(0))));

        let expr = SymExpr::call("log", vec![x]);
        assert_eq!(log(&expr, &mut ()), None);
    }
}
