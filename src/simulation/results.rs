// src/simulation/results.rs
use std::fmt;

/// Per-index probabilities derived from the engine's amplitudes at one point
/// in time.
///
/// Owned and detached: later engine operations never change a snapshot that
/// was already handed out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProbabilitySnapshot {
    probabilities: Vec<f64>,
    /// Completed Grover iterations when the snapshot was taken.
    iteration: u32,
}

impl ProbabilitySnapshot {
    pub(crate) fn new(probabilities: Vec<f64>, iteration: u32) -> Self {
        Self { probabilities, iteration }
    }

    /// Wraps an arbitrary probability array (iteration 0). Useful for
    /// presentation code and tests that need a snapshot without an engine.
    pub fn from_probabilities(probabilities: Vec<f64>) -> Self {
        Self::new(probabilities, 0)
    }

    /// The probabilities, indexed by basis state.
    pub fn as_slice(&self) -> &[f64] {
        &self.probabilities
    }

    /// Consumes the snapshot, returning the underlying array.
    pub fn into_vec(self) -> Vec<f64> {
        self.probabilities
    }

    /// Probability of `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.probabilities.get(index).copied()
    }

    /// Number of basis states covered.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// True for the snapshot of an unconfigured engine.
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Iteration count at the time the snapshot was taken.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Sum of all probabilities (1 within tolerance for engine snapshots).
    pub fn total(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Index of the largest probability. Ties go to the lowest index.
    /// `None` for an empty snapshot.
    pub fn max_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &p) in self.probabilities.iter().enumerate() {
            match best {
                Some((_, best_p)) if p <= best_p => {}
                _ => best = Some((i, p)),
            }
        }
        best.map(|(i, _)| i)
    }
}

impl fmt::Display for ProbabilitySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Probabilities after {} iteration(s):", self.iteration)?;
        if self.probabilities.is_empty() {
            writeln!(f, "  Engine not initialized.")?;
        } else {
            for (i, p) in self.probabilities.iter().enumerate() {
                writeln!(f, "  [{:>3}] {:.6}", i, p)?;
            }
        }
        Ok(())
    }
}
