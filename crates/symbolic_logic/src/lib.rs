//! Symbolic Logic - predicates, unification and forward chaining
//!
//! This crate represents facts and rules over first-order-like predicates and
//! computes what they entail. It is the inference half of a small planning
//! agent: the planner in `symbolic_planner` uses the forward-chaining closure
//! as its goal test.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Inference Engine                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │                   Data Model                          │   │
//! │  │  Term │ Predicate │ Sentence │ KnowledgeBase          │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! │                           │                                  │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │                   Matching                            │   │
//! │  │  Unifier │ Conjunctive Solver (join, NAF, =, !=)      │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! │                           │                                  │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │                   Forward Chaining                    │   │
//! │  │  Fixed-point saturation over ground facts             │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use symbolic_logic::{forward_chain, KnowledgeBase, Predicate};
//!
//! let kb = KnowledgeBase::from_lines([
//!     "bird(tweety)",
//!     "bird(X) & !caged(X) > flies(X)",
//! ])
//! .unwrap();
//!
//! let closure = forward_chain(&kb).unwrap();
//! assert!(closure.contains_fact(&Predicate::parse("flies(tweety)").unwrap()));
//! ```

pub mod engine;
pub mod error;
pub mod predicate;
pub mod rule;
pub mod solver;
pub mod substitution;
pub mod term;
pub mod unify;

// Re-exports
pub use engine::{forward_chain, ForwardChainResult, InferenceEngine};
pub use error::{Error, Result};
pub use predicate::{Operator, Predicate, PredicateKind};
pub use rule::{KnowledgeBase, Sentence, SentenceBuilder, Signature};
pub use solver::{solve, FactIndex};
pub use substitution::Substitution;
pub use term::Term;
pub use unify::unifies_with;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
