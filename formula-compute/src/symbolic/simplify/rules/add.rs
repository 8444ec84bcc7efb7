//! Simplification rules for expressions involving addition, including combining like terms.

use crate::primitive::int;
use crate::symbolic::{
    expr::SymExpr,
    simplify::{coefficient::split_coefficient, rules::do_add, step::Step},
    step_collector::StepCollector,
};

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_zero())
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// `a+(b+c) = a+b+c`
pub fn flatten(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        if terms.len() >= 2 && !terms.iter().any(|term| matches!(term, SymExpr::Add(_))) {
            return None;
        }

        let mut new_terms = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                SymExpr::Add(inner) => new_terms.extend(inner.iter().cloned()),
                term => new_terms.push(term.clone()),
            }
        }
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::Flatten);
    Some(opt)
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `2a+3a = 5a`
/// `1/2 + 0.25 = 0.75`
/// etc.
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let mut new_terms = terms.to_vec();
        let mut current_term_idx = 0;

        // this is O(n^2) worst case, due to scanning the whole vec for each term
        while current_term_idx < new_terms.len() {
            let (mut current_term_coeff, current_term_factors) = split_coefficient(&new_terms[current_term_idx]);
            let mut combined = false;

            // look at every term after `current_term`
            let mut next_term_idx = current_term_idx + 1;
            while next_term_idx < new_terms.len() {
                let (next_term_coeff, next_term_factors) = split_coefficient(&new_terms[next_term_idx]);

                // factors must be strictly equal
                if current_term_factors == next_term_factors {
                    // if so, apply a*n + a*m = (n+m)*a
                    current_term_coeff = current_term_coeff + next_term_coeff;
                    new_terms.swap_remove(next_term_idx);
                    combined = true;
                } else {
                    next_term_idx += 1;
                }
            }

            if combined {
                new_terms[current_term_idx] = if current_term_coeff.is_zero() {
                    SymExpr::from(int(0))
                } else if current_term_coeff.is_one() {
                    current_term_factors
                } else if current_term_factors.is_one() {
                    current_term_coeff.into_expr()
                } else {
                    current_term_coeff.into_expr() * current_term_factors
                };
            }

            current_term_idx += 1;
        }

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten(expr, step_collector)
        .or_else(|| add_zero(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
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
    fn combine_symbols_and_numbers() {
        let expr = SymExpr::Add(vec![
            sym("x"),
            SymExpr::from(int(2)),
            SymExpr::Mul(vec![SymExpr::from(int(3)), sym("x")]),
            SymExpr::from(int(5)),
        ]);
        let mut steps = Vec::new();
        let combined = combine_like_terms(&expr, &mut steps).unwrap();
        assert_eq!(combined, SymExpr::Add(vec![
            SymExpr::Mul(vec![SymExpr::from(int(4)), sym("x")]),
            SymExpr::from(int(7)),
        ]));
        assert_eq!(steps, vec![Step::CombineLikeTerms]);
    }

    #[test]
    fn cancel_to_zero() {
        let expr = SymExpr::Add(vec![
            sym("x"),
            SymExpr::Mul(vec![SymExpr::from(int(-1)), sym("x")]),
        ]);
        let combined = combine_like_terms(&expr, &mut ()).unwrap();
        assert_eq!(combined, SymExpr::from(int(0)));
    }

    #[test]
    fn unlike_terms_are_kept() {
        let expr = SymExpr::Add(vec![sym("x"), sym("y")]);
        assert_eq!(combine_like_terms(&expr, &mut ()), None);
        assert_eq!(add_zero(&expr, &mut ()), None);
    }

    #[test]
    fn flatten_nested_sums() {
        let expr = SymExpr::Add(vec![sym("a"), SymExpr::Add(vec![sym("b"), sym("c")])]);
        assert_eq!(flatten(&expr, &mut ()), Some(SymExpr::Add(vec![sym("a"), sym("b"), sym("c")])));
    }
}
