// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod config;
pub mod state;

// Re-export public types for convenient access via `qsearch::core::TypeName`
pub use error::{Result, SearchError};
pub use config::SearchConfig;
pub use state::AmplitudeVector;

pub mod constants;
pub use constants::{MAX_QUBITS, MIN_QUBITS, NORM_TOLERANCE};
