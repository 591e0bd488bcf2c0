//! Error handling logic

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Failures surfaced by the amplitude engine and the level sequencer.
///
/// Out-of-range configuration is never an error: qubit counts and marked
/// indices are clamped into range (see [`crate::core::SearchConfig`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)] // Eq useful for testing error variants
pub enum SearchError {
    /// The engine was used before `initialize`, or a sequencer call arrived
    /// in a state that does not accept it. Nothing was mutated.
    #[error("Invalid State: {message}")]
    InvalidState {
        /// InvalidState failure message
        message: String,
    },

    /// Total probability drifted away from 1 beyond tolerance.
    #[error("Incoherence Violation: {message}")]
    Incoherence {
        /// Incoherence failure message
        message: String,
    },

    /// An operator was applied with arguments inconsistent with the state
    /// it acts on.
    #[error("Invalid Operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// A hint was requested after the level's iteration budget was spent.
    #[error("Iteration budget of {budget} exhausted")]
    BudgetExhausted {
        /// Budget configured for the level
        budget: u32,
    },
}

impl SearchError {
    /// Shorthand for the error returned by engine calls made before `initialize`.
    pub(crate) fn not_initialized(operation: &str) -> Self {
        SearchError::InvalidState {
            message: format!("`{}` called before the engine was initialized", operation),
        }
    }
}
