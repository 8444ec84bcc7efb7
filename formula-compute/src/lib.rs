//! Symbolic manipulation and similarity scoring of LaTeX formulas.
//!
//! The [`symbolic`] module holds the expression engine: the [`SymExpr`](symbolic::SymExpr) tree,
//! the rule-based simplifier, and the [`Engine`](symbolic::Engine) trait through which the rest of
//! the crate talks to it. The [`similarity`] module is built on top of that trait, and decides how
//! alike two formulas are.
//!
//! ```
//! use formula_compute::similarity::{compare, CompareOptions};
//! use formula_compute::symbolic::CasEngine;
//!
//! let result = compare(&CasEngine::default(), "x^2 + 5x + 6", "(x+2)(x+3)", &CompareOptions::default())
//!     .unwrap();
//! assert!(result.equivalent);
//! assert_eq!(result.similarity, 100.0);
//! ```

pub mod deadline;
pub mod error;
pub mod primitive;
pub mod similarity;
pub mod symbolic;
