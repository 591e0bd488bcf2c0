// src/simulation/mod.rs

//! The amplitude engine: owns the state vector of one Grover search, applies
//! the oracle and diffusion operators, and answers probability queries.

mod results;
mod engine;

pub use results::ProbabilitySnapshot;
pub use engine::{AmplitudeEngine, EngineEvent, Observer, Phase};
