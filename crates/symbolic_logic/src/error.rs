//! Error types for the symbolic logic engine.

use thiserror::Error;

/// A specialized `Result` type for logic engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Structural errors raised while building or evaluating a knowledge base.
///
/// A failed unification is not an error: it is reported as `None` (or an empty
/// result set) and handled by the caller trying the next candidate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Predicate text could not be parsed into its canonical form.
    #[error("Invalid predicate: {0}")]
    InvalidPredicate(String),

    /// Sentence text could not be split into conditions and conclusions.
    #[error("Invalid sentence: {0}")]
    InvalidSentence(String),

    /// The same predicate name was used with two different arities.
    #[error("Arity mismatch for {name}: expected {expected} terms, found {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// A fact was required to be ground but still contains variables.
    #[error("Predicate is not ground: {0}")]
    NotGround(String),

    /// Forward chaining ran out of its configured pass budget.
    #[error("Fixpoint not reached after {passes} passes")]
    FixpointNotReached { passes: usize },

    /// An error occurred during data serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
