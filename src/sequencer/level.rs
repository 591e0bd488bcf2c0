// src/sequencer/level.rs

use crate::core::{SearchConfig, MAX_QUBITS, MIN_QUBITS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of a level table: register width and how many Grover
/// iterations (oracle trigger plus hints) the player may spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Register width, `1..=8` after normalization.
    pub qubits: u32,
    /// Maximum Grover iterations for the level, at least 1.
    pub iteration_budget: u32,
}

impl LevelConfig {
    /// Builds a normalized level.
    pub fn new(qubits: u32, iteration_budget: u32) -> Self {
        Self { qubits, iteration_budget }.normalized()
    }

    /// A level whose budget is one more than the optimal iteration count,
    /// leaving room to overshoot once.
    pub fn for_qubits(qubits: u32) -> Self {
        let optimal = SearchConfig::new(qubits, 0).optimal_iterations();
        Self::new(qubits, optimal + 1)
    }

    /// Clamps `qubits` into the engine's range and forces a budget of at
    /// least one iteration. Apply after deserializing a table.
    pub fn normalized(self) -> Self {
        Self {
            qubits: self.qubits.clamp(MIN_QUBITS, MAX_QUBITS),
            iteration_budget: self.iteration_budget.max(1),
        }
    }

    /// `2^qubits`.
    pub fn dimension(&self) -> usize {
        1usize << self.qubits.clamp(MIN_QUBITS, MAX_QUBITS)
    }

    /// Levels for 2 through 6 qubits with [`LevelConfig::for_qubits`] budgets.
    pub fn default_table() -> Vec<LevelConfig> {
        (2..=6).map(Self::for_qubits).collect()
    }
}

impl fmt::Display for LevelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level({} qubits, budget {})", self.qubits, self.iteration_budget)
    }
}
