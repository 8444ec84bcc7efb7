//! Order-invariant canonical forms.
//!
//! Strict equality already ignores the order of terms and factors, but the structural matcher
//! walks children pairwise, so two trees have to agree on an order before they can be matched.
//! The canonical form fixes that order: every sum and product lists its children sorted by
//! [`SymExpr::structural_key`].

use crate::deadline::Deadline;
use crate::error::Error;
use crate::symbolic::{expr::SymExpr, Engine};
use std::convert::Infallible;

/// Fully expands the expression, then sorts the children of every sum and product by their
/// structural keys, bottom-up.
///
/// Canonicalizing a canonical form returns it unchanged.
pub fn canonicalize<E: Engine + ?Sized>(engine: &E, expr: &SymExpr) -> Result<SymExpr, Error> {
    canonicalize_within(engine, expr, &Deadline::none())
}

/// [`canonicalize`], but the expansion gives up once the deadline has passed.
pub fn canonicalize_within<E: Engine + ?Sized>(
    engine: &E,
    expr: &SymExpr,
    deadline: &Deadline,
) -> Result<SymExpr, Error> {
    let expanded = engine.expand_within(expr, deadline)?;
    Ok(sort_children(expanded))
}

/// Rebuilds the tree with the children of sums and products sorted. No simplification is done.
pub(crate) fn sort_children(expr: SymExpr) -> SymExpr {
    let rebuilt = match expr.try_map_children(|child| Ok::<_, Infallible>(sort_children(child))) {
        Ok(rebuilt) => rebuilt,
        Err(never) => match never {},
    };

    match rebuilt {
        SymExpr::Add(mut terms) if terms.len() >= 2 => {
            terms.sort_by_cached_key(SymExpr::structural_key);
            SymExpr::Add(terms)
        },
        SymExpr::Mul(mut factors) if factors.len() >= 2 => {
            factors.sort_by_cached_key(SymExpr::structural_key);
            SymExpr::Mul(factors)
        },
        other => other,
    }
}
