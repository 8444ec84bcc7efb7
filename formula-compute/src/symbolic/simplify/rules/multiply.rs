//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::primitive::int;
use crate::symbolic::{
    expr::SymExpr,
    simplify::{coefficient::Number, rules::{base_and_exp, do_multiply}, step::Step},
    step_collector::StepCollector,
};

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(SymExpr::is_zero) {
            Some(SymExpr::from(int(0)))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| !factor.is_one())
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// `a*(b*c) = a*b*c`
pub fn flatten(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.len() >= 2 && !factors.iter().any(|factor| matches!(factor, SymExpr::Mul(_))) {
            return None;
        }

        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor {
                SymExpr::Mul(inner) => new_factors.extend(inner.iter().cloned()),
                factor => new_factors.push(factor.clone()),
            }
        }
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::Flatten);
    Some(opt)
}

/// Multiplies the numeric factors of a product into one normalized coefficient.
///
/// `2*3*x = 6x`
/// `6*4^-1 = 3*2^-1`
/// `0.5*4 = 2.0`
pub fn fold_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut product = Number::one();
        let mut found = false;
        let mut rest = Vec::with_capacity(factors.len());
        for factor in factors {
            match Number::from_expr(factor) {
                Some(number) => {
                    product = product * number;
                    found = true;
                },
                None => rest.push(factor.clone()),
            }
        }

        if !found {
            return None;
        }

        let mut new_factors = Vec::with_capacity(rest.len() + 2);
        if !product.is_one() || rest.is_empty() {
            match product.into_expr() {
                SymExpr::Mul(parts) => new_factors.extend(parts),
                number => new_factors.push(number),
            }
        }
        new_factors.extend(rest);

        // the numbers may already be in normalized form
        let new_expr = SymExpr::Mul(new_factors).downgrade();
        if new_expr == SymExpr::Mul(factors.to_vec()) {
            None
        } else {
            Some(new_expr)
        }
    })?;

    step_collector.push(Step::FoldNumbers);
    Some(opt)
}

/// Combines like factors.
///
/// `a*a = a^2`
/// `a^b*a^c = a^(b+c)`
/// etc.
///
/// Numeric bases with integer exponents are left to [`fold_numbers`], since they are how
/// fractions are written.
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = factors.to_vec();
        let mut current_factor_idx = 0;

        // this is O(n^2) worst case, due to scanning the whole vec for each factor
        while current_factor_idx < new_factors.len() {
            let (current_factor, mut current_factor_exp) = base_and_exp(&new_factors[current_factor_idx]);
            let mut combined = false;

            // look at every factor after `current_factor`
            let mut next_factor_idx = current_factor_idx + 1;
            while next_factor_idx < new_factors.len() {
                let (next_factor, next_factor_exp) = base_and_exp(&new_factors[next_factor_idx]);
                let numeric = current_factor.is_number()
                    && current_factor_exp.is_integer()
                    && next_factor_exp.is_integer();

                // bases must be strictly equal
                if current_factor == next_factor && !numeric {
                    // if they are, apply a^b*a^c = a^(b+c)
                    current_factor_exp += next_factor_exp;
                    new_factors.swap_remove(next_factor_idx);
                    combined = true;
                } else {
                    next_factor_idx += 1;
                }
            }

            if combined {
                new_factors[current_factor_idx] = SymExpr::pow(current_factor, current_factor_exp);
            }

            current_factor_idx += 1;
        }

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// All multiplication rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten(expr, step_collector)
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| fold_numbers(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use crate::symbolic::expr::Symbol;
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> SymExpr {
        SymExpr::from(Symbol::new(name))
    }

    fn recip(n: i32) -> SymExpr {
        SymExpr::pow(SymExpr::from(int(n)), SymExpr::from(int(-1)))
    }

    #[test]
    fn fold_to_reduced_fraction() {
        let expr = SymExpr::Mul(vec![SymExpr::from(int(6)), sym("x"), recip(4)]);
        assert_eq!(
            fold_numbers(&expr, &mut ()),
            Some(SymExpr::Mul(vec![SymExpr::from(int(3)), recip(2), sym("x")])),
        );
    }

    #[test]
    fn normalized_numbers_are_kept() {
        let expr = SymExpr::Mul(vec![sym("x"), SymExpr::from(int(3)), recip(2)]);
        assert_eq!(fold_numbers(&expr, &mut ()), None);
    }

    #[test]
    fn fold_cancels_to_one() {
        let expr = SymExpr::Mul(vec![SymExpr::from(int(2)), sym("x"), recip(2)]);
        assert_eq!(fold_numbers(&expr, &mut ()), Some(sym("x")));
    }

    #[test]
    fn combine_powers() {
        let expr = SymExpr::Mul(vec![
            sym("x"),
            sym("y"),
            SymExpr::pow(sym("x"), SymExpr::from(int(2))),
        ]);
        let mut steps = Vec::new();
        let combined = combine_like_factors(&expr, &mut steps).unwrap();
        assert_eq!(combined, SymExpr::Mul(vec![
            SymExpr::pow(sym("x"), SymExpr::from(int(3))),
            sym("y"),
        ]));
        assert_eq!(steps, vec![Step::CombineLikeFactors]);
    }

    #[test]
    fn numeric_bases_are_not_combined() {
        let expr = SymExpr::Mul(vec![SymExpr::from(int(2)), recip(2)]);
        assert_eq!(combine_like_factors(&expr, &mut ()), None);
    }

    #[test]
    fn zero_and_one() {
        let expr = SymExpr::Mul(vec![sym("x"), SymExpr::from(int(0))]);
        assert_eq!(multiply_zero(&expr, &mut ()), Some(SymExpr::from(int(0))));

        let expr = SymExpr::Mul(vec![SymExpr::from(int(1)), sym("x")]);
        assert_eq!(multiply_one(&expr, &mut ()), Some(sym("x")));
    }
}
