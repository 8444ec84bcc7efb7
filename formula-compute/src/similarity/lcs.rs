//! Search for the largest common subexpression of two trees.

use crate::deadline::Deadline;
use crate::error::Error;
use crate::similarity::matcher::{matches, VariableMapping};
use crate::symbolic::{expr::SymExpr, Engine};
use log::trace;

/// Returns the size of the largest subexpression of `a` that matches a subexpression of `b` up to
/// a consistent renaming of variables, or 0 if nothing matches.
///
/// Matches smaller than `min_size` nodes are not counted. The deadline is checked for every
/// candidate pair.
pub fn largest_common_within<E: Engine + ?Sized>(
    engine: &E,
    a: &SymExpr,
    b: &SymExpr,
    min_size: usize,
    deadline: &Deadline,
) -> Result<usize, Error> {
    let mut a_candidates = a.pre_order_iter()
        .map(|node| (node.size(), node))
        .collect::<Vec<_>>();
    a_candidates.sort_by(|(lhs, _), (rhs, _)| rhs.cmp(lhs));
    let b_candidates = b.pre_order_iter()
        .map(|node| (node.size(), node))
        .collect::<Vec<_>>();

    let mut best = min_size.saturating_sub(1);
    for (a_size, a_node) in a_candidates {
        deadline.check("common subexpression search")?;

        // candidates are sorted, so nothing after this one can improve on the best match either
        if a_size <= best {
            break;
        }

        for (b_size, b_node) in &b_candidates {
            deadline.check("common subexpression search")?;

            // matching trees always have the same size
            if *b_size != a_size {
                continue;
            }

            let mut mapping = VariableMapping::new();
            if matches(engine, a_node, b_node, &mut mapping) {
                trace!("common subexpression of size {}: {} ~ {}", a_size, a_node, b_node);
                best = a_size;
                break;
            }
        }
    }

    Ok(if best >= min_size { best } else { 0 })
}

/// Returns the size of the largest subexpression of `a` that matches a subexpression of `b` up to
/// a consistent renaming of variables, or 0 if nothing matches. Single atoms count as matches.
pub fn largest_common<E: Engine + ?Sized>(engine: &E, a: &SymExpr, b: &SymExpr) -> usize {
    largest_common_within(engine, a, b, 1, &Deadline::none()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use crate::error::kind::Timeout;
    use crate::similarity::fake::StructuralEngine;
    use std::time::Duration;
    use super::*;

    #[test]
    fn identical_trees() {
        let engine = StructuralEngine;
        let expr = engine.expr("a b + c");
        assert_eq!(largest_common(&engine, &expr, &expr), 5);
    }

    #[test]
    fn renamed_subtree() {
        let engine = StructuralEngine;
        let a = engine.expr("x^2 + \\sin y");
        let b = engine.expr("\\cos(t) - u^2");
        // x^2 ~ u^2
        assert_eq!(largest_common(&engine, &a, &b), 3);
    }

    #[test]
    fn only_atoms_in_common() {
        let engine = StructuralEngine;
        let a = engine.expr("a + b");
        let b = engine.expr("a - b");
        assert_eq!(largest_common(&engine, &a, &b), 1);
        assert_eq!(largest_common_within(&engine, &a, &b, 2, &Deadline::none()).unwrap(), 0);
    }

    #[test]
    fn nothing_in_common() {
        let engine = StructuralEngine;
        let a = engine.expr("2");
        let b = engine.expr("x");
        assert_eq!(largest_common(&engine, &a, &b), 0);
    }

    #[test]
    fn min_size_is_inclusive() {
        let engine = StructuralEngine;
        let a = engine.expr("x y + 1");
        let b = engine.expr("a b - 1");
        assert_eq!(largest_common_within(&engine, &a, &b, 3, &Deadline::none()).unwrap(), 3);
        assert_eq!(largest_common_within(&engine, &a, &b, 4, &Deadline::none()).unwrap(), 0);
    }

    #[test]
    fn deadline() {
        let engine = StructuralEngine;
        let expr = engine.expr("a b + c");
        let err = largest_common_within(&engine, &expr, &expr, 1, &Deadline::new(Some(Duration::ZERO)))
            .unwrap_err();
        assert!(err.is::<Timeout>());
    }
}
