//! Similarity scores.

use crate::deadline::Deadline;
use crate::error::Error;
use crate::similarity::lcs::largest_common_within;
use crate::symbolic::{expr::SymExpr, Engine};

/// The outcome of scoring two canonical forms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// Whether the expressions are mathematically equivalent.
    pub equivalent: bool,

    /// The similarity, from 0 to 100.
    pub similarity: f64,
}

/// The Dice coefficient of a common subexpression of `common` nodes shared by trees of `a_size`
/// and `b_size` nodes, scaled to 0-100.
pub fn dice_similarity(common: usize, a_size: usize, b_size: usize) -> f64 {
    let total = a_size + b_size;
    if total == 0 {
        return 0.0;
    }

    200.0 * common as f64 / total as f64
}

/// Scores two canonical forms.
///
/// Aligned expressions that the engine considers equal are equivalent, with a similarity of 100.
/// Otherwise, the similarity is the [`dice_similarity`] of their largest common subexpression,
/// counting only matches of at least `min_size` nodes.
pub fn score_within<E: Engine + ?Sized>(
    engine: &E,
    a: &SymExpr,
    b: &SymExpr,
    comparable: bool,
    min_size: usize,
    deadline: &Deadline,
) -> Result<Score, Error> {
    if comparable && engine.equals(a, b) {
        return Ok(Score { equivalent: true, similarity: 100.0 });
    }

    let common = largest_common_within(engine, a, b, min_size, deadline)?;
    Ok(Score {
        equivalent: false,
        similarity: dice_similarity(common, a.size(), b.size()),
    })
}
