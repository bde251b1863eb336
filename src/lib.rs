// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # seshat
//!
//! Rule-quality evaluation for knowledge-graph rule mining: given a set of
//! (subject, predicate, object) triples and rules of the form
//! `Head(a,b) <= Body1(a,b) & Body2(a,b) & …`, measure each rule's
//! **support**, **head coverage**, and **PCA confidence** (under the Partial
//! Completeness Assumption, with two interchangeable denominator strategies).
//!
//! ## Architecture
//!
//! - **Graph** (`graph`): by-predicate triple dict, per-rule views, and the
//!   read-only per-relation [`TripleStore`](graph::index::TripleStore)
//! - **Evaluation** (`eval`): atom projection, conjunctive join, metrics,
//!   and the rayon-parallel batch evaluator
//! - **Rules** (`rule`): atoms, rules, and threshold filtering
//! - **I/O** (`io`): triple/rule file loaders and result records
//!
//! ## Library usage
//!
//! ```
//! use seshat::eval::{BatchEvaluator, EvalConfig};
//! use seshat::graph::{Triple, TripleDict};
//! use seshat::ident::{EntityId, RelationId};
//! use seshat::rule::{Atom, Rule, Var};
//!
//! let dict = TripleDict::from_triples([
//!     Triple::new(EntityId(1), RelationId(0), EntityId(2)),
//!     Triple::new(EntityId(1), RelationId(1), EntityId(2)),
//! ]);
//! let rule = Rule::new(
//!     Atom::forward(RelationId(1)),
//!     vec![Atom::forward(RelationId(0))],
//!     Var::A,
//! )
//! .unwrap();
//!
//! let evaluator = BatchEvaluator::new(&dict, EvalConfig::default());
//! let outcome = evaluator.evaluate_rule(&rule);
//! assert_eq!(outcome.metrics.support, 1);
//! ```

pub mod error;
pub mod eval;
pub mod graph;
pub mod ident;
pub mod io;
pub mod rule;
