//! Simplification rules for trigonometric functions.

use crate::primitive::int;
use crate::symbolic::{
    expr::{Constant, Primary, SymExpr},
    simplify::{rules::{base_and_exp, do_add, do_multiply}, step::Step},
    step_collector::StepCollector,
};

/// If the expression is a call to the function `name` with one argument, returns the argument.
fn unary_arg<'a>(expr: &'a SymExpr, name: &str) -> Option<&'a SymExpr> {
    match expr.as_call(name)? {
        [arg] => Some(arg),
        _ => None,
    }
}

/// Returns true if the expression is `pi*2^-1`.
fn is_half_pi(expr: &SymExpr) -> bool {
    *expr == SymExpr::Mul(vec![
        SymExpr::from(Constant::Pi),
        SymExpr::pow(SymExpr::from(int(2)), SymExpr::from(int(-1))),
    ])
}

/// Looks up the value of a function at one of the angles it is known at.
fn known_value(name: &str, arg: &SymExpr) -> Option<i32> {
    let is_pi = *arg == SymExpr::from(Constant::Pi);
    match name {
        "sin" | "tan" if arg.is_zero() || is_pi => Some(0),
        "sin" if is_half_pi(arg) => Some(1),
        "cos" if arg.is_zero() => Some(1),
        "cos" if is_pi => Some(-1),
        "cos" if is_half_pi(arg) => Some(0),
        "sinh" | "tanh" | "arcsin" | "arctan" if arg.is_zero() => Some(0),
        "cosh" if arg.is_zero() => Some(1),
        "arccos" if arg.is_one() => Some(0),
        _ => None,
    }
}

/// `sin(0) = 0`
/// `cos(pi) = -1`
/// `sin(pi/2) = 1`
/// etc.
pub fn trig_value(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = match expr {
        SymExpr::Primary(Primary::Call(name, args)) => match args.as_slice() {
            [arg] => known_value(name, arg).map(|value| SymExpr::from(int(value))),
            _ => None,
        },
        _ => None,
    }?;

    step_collector.push(Step::TrigValue);
    Some(opt)
}

/// `sin(x)^n * cos(x)^-n = tan(x)^n`
/// `cos(x)^n * sin(x)^-n = cot(x)^n`
pub fn trig_quotient(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        for (current_idx, current) in factors.iter().enumerate() {
            let (base, exp) = base_and_exp(current);
            let (arg, other_name, quotient) = if let Some(arg) = unary_arg(&base, "sin") {
                (arg.clone(), "cos", "tan")
            } else if let Some(arg) = unary_arg(&base, "cos") {
                (arg.clone(), "sin", "cot")
            } else {
                continue;
            };

            let target_exp = -exp.clone();
            for (other_idx, other) in factors.iter().enumerate() {
                if other_idx == current_idx {
                    continue;
                }

                let (other_base, other_exp) = base_and_exp(other);
                if other_exp == target_exp && unary_arg(&other_base, other_name) == Some(&arg) {
                    let mut new_factors = factors.to_vec();
                    new_factors.remove(current_idx.max(other_idx));
                    new_factors.remove(current_idx.min(other_idx));
                    new_factors.push(SymExpr::pow(SymExpr::call(quotient, vec![arg]), exp));
                    return Some(SymExpr::Mul(new_factors).downgrade());
                }
            }
        }

        None
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::TrigQuotient);
    Some(opt)
}

/// If the term is `rest * f(x)^2` for the function `name`, returns `x` and `rest`.
fn squared_call(term: &SymExpr, name: &str) -> Option<(SymExpr, SymExpr)> {
    let factors = match term {
        SymExpr::Mul(factors) => factors.as_slice(),
        term => std::slice::from_ref(term),
    };

    factors.iter().enumerate().find_map(|(idx, factor)| {
        let SymExpr::Exp(base, exp) = factor else {
            return None;
        };
        if exp.as_integer().map_or(true, |n| *n != 2) {
            return None;
        }

        let arg = unary_arg(base, name)?;
        let rest = factors.iter()
            .enumerate()
            .filter(|(other_idx, _)| *other_idx != idx)
            .map(|(_, other)| other.clone())
            .collect::<Vec<_>>();
        Some((arg.clone(), SymExpr::Mul(rest).downgrade()))
    })
}

/// `a*sin(x)^2 + a*cos(x)^2 = a`
pub fn pythagorean(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        for (sin_idx, sin_term) in terms.iter().enumerate() {
            let Some((sin_arg, sin_rest)) = squared_call(sin_term, "sin") else {
                continue;
            };

            for (cos_idx, cos_term) in terms.iter().enumerate() {
                if cos_idx == sin_idx {
                    continue;
                }

                let Some((cos_arg, cos_rest)) = squared_call(cos_term, "cos") else {
                    continue;
                };
                if sin_arg == cos_arg && sin_rest == cos_rest {
                    let mut new_terms = terms.to_vec();
                    new_terms.remove(sin_idx.max(cos_idx));
                    new_terms.remove(sin_idx.min(cos_idx));
                    new_terms.push(sin_rest);
                    return Some(SymExpr::Add(new_terms).downgrade());
                }
            }
        }

        None
    })?;

    step_collector.push(Step::Pythagorean);
    Some(opt)
}

/// Applies all trigonometric rules.
///
/// All trigonometric rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    trig_value(expr, step_collector)
        .or_else(|| trig_quotient(expr, step_collector))
        .or_else(|| pythagorean(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use crate::symbolic::expr::Symbol;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::from(Symbol::new("x"))
    }

    fn num(n: i32) -> SymExpr {
        SymExpr::from(int(n))
    }

    #[test]
    fn values_at_known_angles() {
        let sin_pi = SymExpr::call("sin", vec![SymExpr::from(Constant::Pi)]);
        assert_eq!(trig_value(&sin_pi, &mut ()), Some(num(0)));

        let cos_pi = SymExpr::call("cos", vec![SymExpr::from(Constant::Pi)]);
        assert_eq!(trig_value(&cos_pi, &mut ()), Some(num(-1)));

        let cos_x = SymExpr::call("cos", vec![x()]);
        assert_eq!(trig_value(&cos_x, &mut ()), None);
    }

    #[test]
    fn sine_over_cosine() {
        let expr = SymExpr::Mul(vec![
            SymExpr::call("sin", vec![x()]),
            SymExpr::pow(SymExpr::call("cos", vec![x()]), num(-1)),
        ]);
        assert_eq!(
            trig_quotient(&expr, &mut ()),
            Some(SymExpr::pow(SymExpr::call("tan", vec![x()]), num(1))),
        );
    }

    #[test]
    fn scaled_identity() {
        let sin2 = SymExpr::pow(SymExpr::call("sin", vec![x()]), num(2));
        let cos2 = SymExpr::pow(SymExpr::call("cos", vec![x()]), num(2));
        let expr = SymExpr::Add(vec![
            SymExpr::Mul(vec![num(3), cos2]),
            SymExpr::Mul(vec![num(3), sin2]),
            num(1),
        ]);
        let mut steps = Vec::new();
        assert_eq!(pythagorean(&expr, &mut steps), Some(SymExpr::Add(vec![num(1), num(3)])));
        assert_eq!(steps, vec![Step::Pythagorean]);
    }
}
