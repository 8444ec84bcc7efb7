//! Simplification rules for powers, including numeric powers and exact roots.

use crate::primitive::{float, int};
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{coefficient::as_rational, rules::do_power, step::Step},
    step_collector::StepCollector,
};
use rug::{ops::Pow, Float, Integer};

/// The largest number of bits an integer power is allowed to produce. Larger powers are left
/// unevaluated.
const MAX_POWER_BITS: u64 = 1 << 16;

/// Computes `base^exp` for a nonnegative `exp`, if the result is not too large.
fn integer_pow(base: &Integer, exp: &Integer) -> Option<Integer> {
    let exp = exp.to_u32()?;
    let bits = u64::from(base.significant_bits()) * u64::from(exp);
    if bits > MAX_POWER_BITS {
        return None;
    }
    Some(base.clone().pow(exp))
}

fn to_float(expr: &SymExpr) -> Option<Float> {
    match expr {
        SymExpr::Primary(Primary::Integer(n)) => Some(float(n)),
        SymExpr::Primary(Primary::Float(n)) => Some(n.clone()),
        _ => None,
    }
}

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, rhs| {
        if rhs.is_integer() && rhs.is_zero() {
            Some(SymExpr::from(int(1)))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if rhs.is_one() {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `1^a = 1`
pub fn one_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, _| {
        if lhs.is_one() {
            Some(SymExpr::from(int(1)))
        } else {
            None
        }
    })?;

    step_collector.push(Step::OnePower);
    Some(opt)
}

/// `0^a = 0`, `a > 0`
pub fn zero_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if lhs.is_zero() && rhs.is_positive() {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::ZeroPower);
    Some(opt)
}

/// Evaluates integer powers of integers, and powers involving floats.
///
/// `2^3 = 8`
/// `2^-2 = 4^-1`
/// `(-3)^-1 = -1 * 3^-1`
/// `4^0.5 = 2.0`
///
/// An integer raised to `-1` is how fractions are written, so `3^-1` is left as is.
pub fn numeric_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if lhs.is_float() || rhs.is_float() {
            let result = to_float(lhs)?.pow(&to_float(rhs)?);
            return result.is_finite().then(|| SymExpr::from(result));
        }

        let base = lhs.as_integer()?;
        let exp = rhs.as_integer()?;
        if *exp >= 2 {
            integer_pow(base, exp).map(SymExpr::from)
        } else if *exp == -1 {
            if *base < 0 {
                Some(SymExpr::Mul(vec![
                    SymExpr::from(int(-1)),
                    SymExpr::pow(SymExpr::from(Integer::from(-base)), SymExpr::from(int(-1))),
                ]))
            } else {
                None
            }
        } else if *exp <= -2 && !base.is_zero() {
            let magnitude = integer_pow(base, &Integer::from(-exp))?;
            Some(SymExpr::pow(SymExpr::from(magnitude), SymExpr::from(int(-1))))
        } else {
            None
        }
    })?;

    step_collector.push(Step::NumericPower);
    Some(opt)
}

/// Evaluates rational powers of integers that are perfect powers.
///
/// `8^(1/3) = 2`
/// `4^(3/2) = 2^3`
pub fn exact_root(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let base = lhs.as_integer().filter(|n| **n > 0)?;
        let exp = as_rational(rhs)?;
        let degree = exp.denom().to_u32().filter(|q| *q >= 2)?;

        let root = base.clone().root(degree);
        if root.clone().pow(degree) != *base {
            return None;
        }

        if *exp.numer() == 1 {
            Some(SymExpr::from(root))
        } else {
            Some(SymExpr::pow(SymExpr::from(root), SymExpr::from(exp.numer().clone())))
        }
    })?;

    step_collector.push(Step::ExactRoot);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)`, if `c` is an integer or `a > 0`
pub fn power_of_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if let SymExpr::Exp(base, exp) = lhs {
            if rhs.is_integer() || base.is_positive() {
                return Some(SymExpr::pow((**base).clone(), (**exp).clone() * rhs.clone()));
            }
        }

        None
    })?;

    step_collector.push(Step::PowerOfPower);
    Some(opt)
}

/// `(a*b)^c = a^c * b^c`, if `c` is an integer or every factor is positive
pub fn distribute_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if let SymExpr::Mul(factors) = lhs {
            if rhs.is_integer() || factors.iter().all(SymExpr::is_positive) {
                let new_factors = factors.iter()
                    .map(|factor| SymExpr::pow(factor.clone(), rhs.clone()))
                    .collect::<Vec<_>>();
                return Some(SymExpr::Mul(new_factors));
            }
        }

        None
    })?;

    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// Applies all power rules.
///
/// All power rules will reduce the complexity of the expression, or move it closer to the
/// normalized form of a fraction.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| one_power(expr, step_collector))
        .or_else(|| zero_power(expr, step_collector))
        .or_else(|| numeric_power(expr, step_collector))
        .or_else(|| exact_root(expr, step_collector))
        .or_else(|| power_of_power(expr, step_collector))
        .or_else(|| distribute_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use crate::symbolic::expr::{Assumption, Assumptions, Symbol};
    use pretty_assertions::assert_eq;
    use super::*;

    fn num(n: i32) -> SymExpr {
        SymExpr::from(int(n))
    }

    fn sym(name: &str) -> SymExpr {
        SymExpr::from(Symbol::new(name))
    }

    #[test]
    fn integer_powers() {
        assert_eq!(numeric_power(&SymExpr::pow(num(2), num(10)), &mut ()), Some(num(1024)));
        assert_eq!(
            numeric_power(&SymExpr::pow(num(3), num(-2)), &mut ()),
            Some(SymExpr::pow(num(9), num(-1))),
        );
        assert_eq!(numeric_power(&SymExpr::pow(num(3), num(-1)), &mut ()), None);
        assert_eq!(
            numeric_power(&SymExpr::pow(num(-3), num(-1)), &mut ()),
            Some(SymExpr::Mul(vec![num(-1), SymExpr::pow(num(3), num(-1))])),
        );
    }

    #[test]
    fn huge_powers_are_left_alone() {
        assert_eq!(numeric_power(&SymExpr::pow(num(10), num(1_000_000)), &mut ()), None);
    }

    #[test]
    fn float_powers() {
        let expr = SymExpr::pow(num(4), SymExpr::from(float(0.5)));
        match numeric_power(&expr, &mut ()) {
            Some(SymExpr::Primary(Primary::Float(f))) => assert_eq!(f.to_f64(), 2.0),
            other => panic!("expected a float, got {:?}", other),
        }

        // complex result
        let expr = SymExpr::pow(num(-4), SymExpr::from(float(0.5)));
        assert_eq!(numeric_power(&expr, &mut ()), None);
    }

    #[test]
    fn roots() {
        let cube_root = SymExpr::pow(num(27), SymExpr::pow(num(3), num(-1)));
        assert_eq!(exact_root(&cube_root, &mut ()), Some(num(3)));

        let three_halves = SymExpr::Mul(vec![num(3), SymExpr::pow(num(2), num(-1))]);
        assert_eq!(
            exact_root(&SymExpr::pow(num(4), three_halves), &mut ()),
            Some(SymExpr::pow(num(2), num(3))),
        );

        let sqrt_two = SymExpr::pow(num(2), SymExpr::pow(num(2), num(-1)));
        assert_eq!(exact_root(&sqrt_two, &mut ()), None);
    }

    #[test]
    fn nested_powers_need_integer_exponent_or_positive_base() {
        let half = SymExpr::pow(num(2), num(-1));
        let square_root_of_square = SymExpr::pow(SymExpr::pow(sym("x"), num(2)), half.clone());
        assert_eq!(power_of_power(&square_root_of_square, &mut ()), None);

        let x = SymExpr::from(Symbol::with_assumptions(
            "x",
            Assumptions::new().with(Assumption::Positive),
        ));
        let expr = SymExpr::pow(SymExpr::pow(x.clone(), num(2)), half.clone());
        assert_eq!(
            power_of_power(&expr, &mut ()),
            Some(SymExpr::pow(x, SymExpr::Mul(vec![num(2), half]))),
        );
    }

    #[test]
    fn trivial_powers() {
        assert_eq!(power_zero(&SymExpr::pow(sym("x"), num(0)), &mut ()), Some(num(1)));
        assert_eq!(power_one(&SymExpr::pow(sym("x"), num(1)), &mut ()), Some(sym("x")));
        assert_eq!(one_power(&SymExpr::pow(num(1), sym("x")), &mut ()), Some(num(1)));
        assert_eq!(zero_power(&SymExpr::pow(num(0), num(2)), &mut ()), Some(num(0)));
        assert_eq!(zero_power(&SymExpr::pow(num(0), num(-2)), &mut ()), None);
    }
}
