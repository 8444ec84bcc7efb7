//! Simplification rules related to the distributive property. These are only applied when
//! expanding.

use crate::primitive::int;
use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::{do_multiply, do_power}, step::Step},
    step_collector::StepCollector,
};

/// The largest number of terms that expanding a power of a sum may produce, before like terms are
/// combined.
const MAX_EXPANDED_TERMS: usize = 4096;

/// `a*(b+c) = a*b + a*c`
pub fn distributive_property(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        // find the first `SymExpr::Add`, and distribute every other factor over it
        let mut factors_to_distribute = factors.to_vec();
        let idx = factors_to_distribute.iter()
            .position(|factor| matches!(factor, SymExpr::Add(_)))?;
        let SymExpr::Add(add_factor_terms) = factors_to_distribute.swap_remove(idx) else {
            return None;
        };

        let new_terms = add_factor_terms.into_iter()
            .map(|term| SymExpr::Mul(factors_to_distribute.clone()) * term)
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::DistributiveProperty);
    Some(opt)
}

/// `(a+b)^2 = a*a + a*b + b*a + b*b`
/// `(a+b)^-2 = (a*a + a*b + b*a + b*b)^-1`
///
/// Only exponents with a magnitude from 2 to `max_exponent` are expanded.
pub fn expand_power(
    expr: &SymExpr,
    max_exponent: u32,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<SymExpr> {
    let opt = do_power(expr, move |lhs, rhs| {
        let SymExpr::Add(terms) = lhs else {
            return None;
        };
        let exp = rhs.as_integer()?;
        let magnitude = exp.clone().abs().to_u32()?;
        if magnitude < 2 || magnitude > max_exponent {
            return None;
        }
        if terms.len().checked_pow(magnitude).map_or(true, |count| count > MAX_EXPANDED_TERMS) {
            return None;
        }

        let mut product = terms.to_vec();
        for _ in 1..magnitude {
            product = product.iter()
                .flat_map(|lhs_term| terms.iter().map(move |rhs_term| lhs_term.clone() * rhs_term.clone()))
                .collect();
        }

        let expanded = SymExpr::Add(product);
        if *exp < 0 {
            Some(SymExpr::pow(expanded, SymExpr::from(int(-1))))
        } else {
            Some(expanded)
        }
    })?;

    step_collector.push(Step::ExpandPower);
    Some(opt)
}

/// Applies all distribution rules.
///
/// The distributive property may or may not reduce the complexity of the expression, since it can
/// introduce additional operations. However, it is what brings a polynomial into a sum of
/// monomials, where like terms can be combined.
pub fn all(expr: &SymExpr, max_exponent: u32, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    distributive_property(expr, step_collector)
        .or_else(|| expand_power(expr, max_exponent, step_collector))
}

#[cfg(test)]
mod tests {
    use crate::symbolic::expr::Symbol;
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> SymExpr {
        SymExpr::from(Symbol::new(name))
    }

    #[test]
    fn distribute_over_sum() {
        let expr = SymExpr::Mul(vec![
            sym("a"),
            SymExpr::Add(vec![sym("b"), sym("c")]),
        ]);
        assert_eq!(distributive_property(&expr, &mut ()), Some(SymExpr::Add(vec![
            SymExpr::Mul(vec![sym("a"), sym("b")]),
            SymExpr::Mul(vec![sym("a"), sym("c")]),
        ])));
    }

    #[test]
    fn square_of_sum() {
        let expr = SymExpr::pow(SymExpr::Add(vec![sym("a"), sym("b")]), SymExpr::from(int(2)));
        let mut steps = Vec::new();
        assert_eq!(expand_power(&expr, 8, &mut steps), Some(SymExpr::Add(vec![
            SymExpr::Mul(vec![sym("a"), sym("a")]),
            SymExpr::Mul(vec![sym("a"), sym("b")]),
            SymExpr::Mul(vec![sym("b"), sym("a")]),
            SymExpr::Mul(vec![sym("b"), sym("b")]),
        ])));
        assert_eq!(steps, vec![Step::ExpandPower]);
    }

    #[test]
    fn large_exponents_are_kept() {
        let expr = SymExpr::pow(SymExpr::Add(vec![sym("a"), sym("b")]), SymExpr::from(int(9)));
        assert_eq!(expand_power(&expr, 8, &mut ()), None);
    }
}
