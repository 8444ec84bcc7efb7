//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the [`formula_parser::parser::ast::Expr`] nodes produced by [`formula_parser`], with
//! the main difference being that [`SymExpr`] nodes **flatten** out the tree structure.
//!
//! For example, the expression `x + (y + z)` would be represented internally as a single
//! [`SymExpr::Add`] node with _three_ children, `x`, `y`, and `z`, where as the
//! [`formula_parser::parser::ast::Expr`] node would have two children, `x` and `(y + z)`.
//!
//! This makes algebraic manipulation easier. Combining like terms (e.g. `x + x = 2x`) only has to
//! look at the children of one node, and so does comparing two sums regardless of the order their
//! terms were written in.
//!
//! Conversion from the AST is done with [`Formula::try_from`](expr::Formula), which also splits
//! off a top-level relation such as `E = mc^2`. It is lossy: [`SymExpr`] does not store spans or
//! grouping, and normalizes notation (`a - b` becomes `a + -1*b`, `\frac{a}{b}` becomes
//! `a * b^-1`).
//!
//! ```
//! use formula_compute::symbolic::expr::{Formula, Symbol, SymExpr};
//! use formula_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("x + (y + z)");
//! let ast_expr = parser.try_parse_full::<Expr>().unwrap();
//!
//! let expr = Formula::try_from(ast_expr).unwrap().into_zeroed();
//! assert_eq!(expr, SymExpr::Add(vec![
//!     SymExpr::from(Symbol::new("x")),
//!     SymExpr::from(Symbol::new("y")),
//!     SymExpr::from(Symbol::new("z")),
//! ]));
//! ```
//!
//! # Simplification
//!
//! Expressions are reduced to a normal form with the [`simplify()`] function, which applies the
//! rules in [`simplify::rules`] until none of them applies. [`expand()`] additionally multiplies
//! out products and powers of sums. For more information, see the [`mod@simplify`] module.
//!
//! # Engine
//!
//! The rest of the crate does not call these functions directly. It goes through the [`Engine`]
//! trait, which bundles parsing, simplification, semantic equality, and rendering, and is
//! implemented by [`CasEngine`].

pub mod engine;
pub mod expr;
pub mod simplify;
pub mod step_collector;

pub use engine::{CasEngine, Engine, EngineConfig};
pub use expr::SymExpr;
pub use simplify::{expand, simplify, simplify_with, simplify_with_steps, simplify_within};
pub use step_collector::StepCollector;
