// src/core/config.rs

use super::constants::{FRAC_PI_4, MAX_QUBITS, MIN_QUBITS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Register width and marked index for one simulation run.
///
/// Construction clamps both values instead of rejecting them: a qubit count
/// outside `1..=8` is pulled to the nearest bound, and a marked index past the
/// end of the state space becomes the last index. Callers that need to know
/// whether their input was adjusted can ask [`SearchConfig::was_clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchConfig {
    qubits: u32,
    marked: usize,
}

impl SearchConfig {
    /// Builds a configuration, clamping `qubits` into `1..=8` and `marked`
    /// into `0..2^qubits`.
    pub fn new(qubits: u32, marked: usize) -> Self {
        let qubits = qubits.clamp(MIN_QUBITS, MAX_QUBITS);
        let marked = marked.min((1usize << qubits) - 1);
        Self { qubits, marked }
    }

    /// Re-applies clamping, for values that bypassed [`SearchConfig::new`]
    /// (e.g. deserialized ones).
    pub fn normalized(self) -> Self {
        Self::new(self.qubits, self.marked)
    }

    /// True if `new(qubits, marked)` would change either argument.
    pub fn was_clamped(qubits: u32, marked: usize) -> bool {
        let effective = Self::new(qubits, marked);
        effective.qubits != qubits || effective.marked != marked
    }

    /// Number of qubits `n`.
    pub fn qubits(&self) -> u32 {
        self.qubits
    }

    /// Index whose phase the oracle flips.
    pub fn marked(&self) -> usize {
        self.marked
    }

    /// Size of the state space, `N = 2^n`.
    pub fn dimension(&self) -> usize {
        1usize << self.qubits
    }

    /// `k* = max(1, round(π/4 · √N))`.
    pub fn optimal_iterations(&self) -> u32 {
        let k = (FRAC_PI_4 * (self.dimension() as f64).sqrt()).round();
        (k as u32).max(1)
    }
}

impl fmt::Display for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Search(n={}, N={}, marked={})", self.qubits, self.dimension(), self.marked)
    }
}
