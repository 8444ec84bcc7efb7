//! Similarity of formulas.
//!
//! [`compare`] decides whether two formulas are mathematically equivalent, scores how similar they
//! are from 0 to 100, and reports the subexpressions they share. It runs the following pipeline:
//!
//! 1. Both formulas are parsed. A relation such as `E = mc^2` is compared as `E - mc^2`.
//! 2. Symbols named in [`CompareOptions::assumptions`] are given their assumptions, and both
//!    expressions are simplified.
//! 3. [`align`] renames the free symbols of both sides onto the same placeholders, so that `a + b`
//!    and `p + q` are the same expression.
//! 4. [`canonicalize`] expands both sides and sorts the terms of every sum and product.
//! 5. Aligned canonical forms that the engine considers equal are equivalent, with a similarity of
//!    100. Otherwise, the similarity is the Dice coefficient of their [largest common
//!    subexpression](lcs), found by [structural matching](matcher) up to a renaming of
//!    variables: `200 * L / (size1 + size2)`, where sizes count nodes.
//! 6. The subexpressions of both canonical forms are [indexed](index), and every subexpression
//!    they share is rendered and located in the rendering of the second formula.
//!
//! Every step goes through the [`Engine`](crate::symbolic::Engine) trait, so the pipeline does not
//! depend on how the engine simplifies. A comparison shares no state with other comparisons.
//!
//! ```
//! use formula_compute::similarity::{compare, CompareOptions};
//! use formula_compute::symbolic::CasEngine;
//!
//! let engine = CasEngine::default();
//! let result = compare(&engine, "ab + c", "ab + cd", &CompareOptions::default()).unwrap();
//! assert!(!result.equivalent);
//! assert_eq!(result.similarity, 50.0);
//! assert_eq!(result.common_subexpressions[0], "a b");
//! ```

pub mod align;
pub mod canonical;
pub mod error;
pub mod index;
pub mod lcs;
pub mod matcher;
pub mod score;
pub mod service;

#[cfg(test)]
pub(crate) mod fake;

pub use crate::deadline::Deadline;
pub use align::{align, align_within, Alignment};
pub use canonical::{canonicalize, canonicalize_within};
pub use error::Error;
pub use index::{locate_occurrences, SubexpressionIndex};
pub use lcs::largest_common;
pub use matcher::{matches, VariableMapping};
pub use score::{dice_similarity, Score};
pub use service::{compare, compare_exprs, parse_formula};

use crate::symbolic::expr::Assumptions;
use std::{collections::{BTreeMap, HashMap}, time::Duration};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default smallest common subexpression, in nodes, that counts towards the similarity.
pub const DEFAULT_MIN_MATCH_SIZE: usize = 2;

/// Options for a single comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareOptions {
    /// Assumptions to attach to symbols, by symbol name. Symbols that are not named here are left
    /// as they are.
    pub assumptions: HashMap<String, Assumptions>,

    /// The time limit for the comparison, if any.
    pub timeout: Option<Duration>,

    /// The smallest common subexpression, in nodes, that counts towards the similarity. With the
    /// default of 2, a single shared variable or number is not a match.
    pub min_match_size: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            assumptions: HashMap::new(),
            timeout: None,
            min_match_size: DEFAULT_MIN_MATCH_SIZE,
        }
    }
}

impl CompareOptions {
    /// Attaches assumptions to the symbol with the given name.
    pub fn with_assumptions(mut self, name: impl Into<String>, assumptions: Assumptions) -> Self {
        self.assumptions.insert(name.into(), assumptions);
        self
    }

    /// Sets the time limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the smallest common subexpression that counts towards the similarity.
    pub fn with_min_match_size(mut self, min_match_size: usize) -> Self {
        self.min_match_size = min_match_size;
        self
    }
}

/// The outcome of [`compare`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComparisonResult {
    /// Whether the formulas are mathematically equivalent.
    pub equivalent: bool,

    /// How similar the formulas are, from 0 to 100.
    pub similarity: f64,

    /// The canonical form of the first formula, rendered as LaTeX.
    pub simplified1: String,

    /// The canonical form of the second formula, rendered as LaTeX.
    pub simplified2: String,

    /// The rendered subexpressions shared by both canonical forms, in the order they first appear
    /// in the second one.
    pub common_subexpressions: Vec<String>,

    /// For each shared subexpression, its preorder positions in the second canonical form.
    pub indices_in_expr2: BTreeMap<String, Vec<usize>>,

    /// For each shared subexpression, the `(start, length)` character ranges where its rendering
    /// occurs in [`ComparisonResult::simplified2`].
    pub occurrences_in_simplified2: BTreeMap<String, Vec<(usize, usize)>>,
}
