//! Ranked search for the stored formulas most similar to a query.

use crate::store::{FormulaRecord, FormulaStore};
use formula_compute::similarity::{compare_exprs, parse_formula, CompareOptions, ComparisonResult, Error};
use formula_compute::symbolic::Engine;
use log::{debug, warn};
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::Serialize;

/// The number of results returned by default.
pub const DEFAULT_TOP_K: usize = 10;

/// Options for [`find_similar`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// The maximum number of results.
    pub top_k: usize,

    /// Options for each comparison.
    pub compare: CompareOptions,

    /// Whether to compare against the stored formulas in parallel.
    pub parallel: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            compare: CompareOptions::default(),
            parallel: true,
        }
    }
}

impl SearchOptions {
    /// Sets the maximum number of results.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Sets the options for each comparison.
    pub fn with_compare(mut self, compare: CompareOptions) -> Self {
        self.compare = compare;
        self
    }

    /// Compares against the stored formulas one at a time, on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// A stored formula, and how it compares to the query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SimilarFormula {
    /// The stored formula.
    pub record: FormulaRecord,

    /// The comparison of the query (first) against the stored formula (second).
    pub result: ComparisonResult,
}

/// A subexpression that the query shares with a stored formula, with where it appears in the
/// stored formula.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CommonSubexpression<'a> {
    /// The rendered subexpression.
    pub subexpression: &'a str,

    /// Its preorder positions in the canonical form of the stored formula.
    pub indices_in_expr2: &'a [usize],

    /// The `(start, length)` character ranges where it occurs in the rendered canonical form of the
    /// stored formula.
    pub occurrences_in_simplified2: &'a [(usize, usize)],
}

impl SimilarFormula {
    /// How similar the stored formula is to the query, from 0 to 100.
    pub fn similarity(&self) -> f64 {
        self.result.similarity
    }

    /// Returns each shared subexpression together with its positions, in the order they first
    /// appear in the stored formula.
    pub fn common_subexpressions(&self) -> Vec<CommonSubexpression<'_>> {
        self.result.common_subexpressions.iter()
            .map(|subexpression| CommonSubexpression {
                subexpression,
                indices_in_expr2: self.result.indices_in_expr2
                    .get(subexpression)
                    .map(Vec::as_slice)
                    .unwrap_or_default(),
                occurrences_in_simplified2: self.result.occurrences_in_simplified2
                    .get(subexpression)
                    .map(Vec::as_slice)
                    .unwrap_or_default(),
            })
            .collect()
    }
}

/// Compares the query against every formula in the store, returning the [`SearchOptions::top_k`]
/// most similar ones, most similar first. Formulas that are equally similar are ordered by ID.
///
/// The query is parsed once, and a malformed query is an error. A stored formula that cannot be
/// compared, because it does not parse, does not simplify, or runs out of time, is logged and
/// left out of the results.
pub fn find_similar<E: Engine + Sync + ?Sized>(
    engine: &E,
    store: &FormulaStore,
    query: &str,
    options: &SearchOptions,
) -> Result<Vec<SimilarFormula>, Error> {
    let query_expr = parse_formula(engine, query)?;
    let records = store.list().collect::<Vec<_>>();
    debug!("comparing `{}` against {} stored formulas", query, records.len());

    let compare_record = |record: &FormulaRecord| {
        let result = parse_formula(engine, &record.latex)
            .and_then(|expr| compare_exprs(engine, &query_expr, &expr, &options.compare));
        match result {
            Ok(result) => Some(SimilarFormula { record: record.clone(), result }),
            Err(err) => {
                warn!("skipping formula {} (`{}`): {}", record.id, record.latex, err);
                None
            },
        }
    };

    let mut results = if options.parallel {
        records.par_iter().filter_map(|record| compare_record(record)).collect::<Vec<_>>()
    } else {
        records.iter().filter_map(|record| compare_record(record)).collect::<Vec<_>>()
    };
    debug!("{} of {} stored formulas compared", results.len(), records.len());

    results.sort_by(|a, b| {
        b.result.similarity.total_cmp(&a.result.similarity)
            .then_with(|| a.record.id.cmp(&b.record.id))
    });
    results.truncate(options.top_k);
    Ok(results)
}
