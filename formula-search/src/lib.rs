//! Storage of formulas, and ranked search for the stored formulas most similar to a query.
//!
//! A [`FormulaStore`] holds the formulas along with who wrote them and what they describe.
//! [`find_similar`] compares a query against every stored formula with
//! [`formula_compute::similarity::compare`], and returns the best matches first.
//!
//! ```
//! use formula_compute::symbolic::CasEngine;
//! use formula_search::{find_similar, FormulaStore, NewFormula, SearchOptions};
//!
//! let mut store = FormulaStore::new();
//! store.create(NewFormula::new("E = m c^2", 1).with_legend("energy").with_description("mass-energy equivalence")).unwrap();
//! store.create(NewFormula::new("F = m a", 1).with_legend("force").with_description("Newton's second law")).unwrap();
//!
//! let results = find_similar(&CasEngine::default(), &store, "U = k v^2", &SearchOptions::default()).unwrap();
//! assert_eq!(results[0].record.legend, "energy");
//! ```

pub mod error;
pub mod search;
pub mod store;

pub use search::{find_similar, CommonSubexpression, SearchOptions, SimilarFormula, DEFAULT_TOP_K};
pub use store::{FormulaId, FormulaRecord, FormulaStore, FormulaUpdate, NewFormula};
