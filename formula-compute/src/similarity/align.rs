//! Positional alignment of free variables.
//!
//! Before two expressions are compared, their free symbols are renamed onto a shared scheme of
//! placeholders, `x_{0}`, `x_{1}`, ..., assigned in sorted order of the original names on each
//! side. This makes `a + b` and `p + q` the same expression. The assignment is positional, so it
//! is a heuristic: `a + 2b` and `p + 2q` align, but `a + 2b` and `2p + q` do not.

use crate::deadline::Deadline;
use crate::error::Error;
use crate::symbolic::{expr::{Symbol, SymExpr}, Engine};
use log::debug;
use std::collections::HashMap;

/// The result of [`align`].
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// The first expression, with its symbols renamed.
    pub lhs: SymExpr,

    /// The second expression, with its symbols renamed.
    pub rhs: SymExpr,

    /// Whether the symbols were renamed. When the expressions have different numbers of free
    /// symbols, they are returned unchanged and can only be compared by size.
    pub comparable: bool,
}

/// Returns the placeholder for the `idx`-th symbol, keeping the symbol's assumptions.
fn placeholder(idx: usize, original: &Symbol) -> SymExpr {
    SymExpr::from(Symbol::with_assumptions(format!("x_{{{}}}", idx), original.assumptions.clone()))
}

/// Maps each symbol to the placeholder for its position in `symbols`.
fn placeholders(symbols: &[Symbol]) -> HashMap<Symbol, SymExpr> {
    symbols.iter()
        .enumerate()
        .map(|(idx, sym)| (sym.clone(), placeholder(idx, sym)))
        .collect()
}

/// Maps the free symbols of both expressions onto the placeholders `x_{0}`, `x_{1}`, ..., and
/// simplifies the results.
///
/// If the expressions do not have the same number of free symbols, alignment is skipped and both
/// are returned unchanged with [`Alignment::comparable`] set to false. This is not an error.
pub fn align<E: Engine + ?Sized>(engine: &E, a: &SymExpr, b: &SymExpr) -> Result<Alignment, Error> {
    align_within(engine, a, b, &Deadline::none())
}

/// [`align`], but the re-simplification of both sides gives up once the deadline has passed.
pub fn align_within<E: Engine + ?Sized>(
    engine: &E,
    a: &SymExpr,
    b: &SymExpr,
    deadline: &Deadline,
) -> Result<Alignment, Error> {
    let a_symbols = a.free_symbols().into_iter().cloned().collect::<Vec<_>>();
    let b_symbols = b.free_symbols().into_iter().cloned().collect::<Vec<_>>();

    if a_symbols.len() != b_symbols.len() {
        debug!(
            "variable alignment skipped: {} free symbols against {}",
            a_symbols.len(),
            b_symbols.len(),
        );
        return Ok(Alignment { lhs: a.clone(), rhs: b.clone(), comparable: false });
    }

    let lhs = engine.simplify_within(&engine.substitute(a, &placeholders(&a_symbols)), deadline)?;
    let rhs = engine.simplify_within(&engine.substitute(b, &placeholders(&b_symbols)), deadline)?;
    Ok(Alignment { lhs, rhs, comparable: true })
}

#[cfg(test)]
mod tests {
    use crate::similarity::fake::StructuralEngine;
    use crate::error::kind::Timeout;
    use crate::symbolic::{expr::{Assumption, Assumptions}, CasEngine};
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use super::*;

    #[test]
    fn renamed_in_sorted_order() {
        let engine = StructuralEngine;
        let alignment = align(&engine, &engine.expr("b^a"), &engine.expr("q^p")).unwrap();
        assert!(alignment.comparable);
        assert_eq!(alignment.lhs, engine.expr("x_{1}^{x_{0}}"));
        assert_eq!(alignment.rhs, engine.expr("x_{1}^{x_{0}}"));
    }

    #[test]
    fn alignment_is_positional() {
        let engine = StructuralEngine;
        let alignment = align(&engine, &engine.expr("a + 2b"), &engine.expr("2p + q")).unwrap();
        assert!(alignment.comparable);
        assert_ne!(alignment.lhs, alignment.rhs);
    }

    #[test]
    fn skipped_on_count_mismatch() {
        let engine = StructuralEngine;
        let a = engine.expr("a b + c");
        let b = engine.expr("a b + c d");
        let alignment = align(&engine, &a, &b).unwrap();
        assert!(!alignment.comparable);
        assert_eq!(alignment.lhs, a);
        assert_eq!(alignment.rhs, b);
    }

    #[test]
    fn assumptions_are_kept() {
        let engine = CasEngine::default();
        let positive = Assumptions::new().with(Assumption::Positive);
        let y = SymExpr::from(Symbol::with_assumptions("y", positive.clone()));
        let a = SymExpr::call("abs", vec![y]);
        let b = engine.parse("\\left|t\\right|").unwrap().into_zeroed();

        let alignment = align(&engine, &a, &b).unwrap();
        assert_eq!(alignment.lhs, SymExpr::from(Symbol::with_assumptions("x_{0}", positive)));
        assert_eq!(alignment.rhs, SymExpr::call("abs", vec![SymExpr::from(Symbol::new("x_{0}"))]));
    }

    #[test]
    fn constants_are_not_variables() {
        let engine = StructuralEngine;
        let alignment = align(&engine, &engine.expr("\\pi r^2"), &engine.expr("\\pi s^2")).unwrap();
        assert!(alignment.comparable);
        assert_eq!(alignment.lhs, alignment.rhs);
    }

    #[test]
    fn resimplification_times_out() {
        let engine = CasEngine::default();
        let a = engine.parse("a + b").unwrap().into_zeroed();
        let b = engine.parse("p + q").unwrap().into_zeroed();
        let err = align_within(&engine, &a, &b, &Deadline::new(Some(Duration::ZERO))).unwrap_err();
        assert_eq!(err.downcast_ref::<Timeout>().unwrap().stage, "simplification");
    }
}
