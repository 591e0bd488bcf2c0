// src/operations/mod.rs

//! The two operators of a Grover iteration.
//!
//! Both act in place on an amplitude slice. They are exposed individually so
//! a caller can step through an iteration one operator at a time, and bundled
//! as [`Operation`] so the engine can dispatch and log them uniformly.

use crate::core::{Result, SearchError};
use num_complex::Complex;
use std::fmt;

/// A single operator of Grover's algorithm.
///
/// Analogy: `Oracle` is a multi-controlled Z restricted to one basis state,
/// `Diffusion` is the reflection `2|s⟩⟨s| − I` about the uniform state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Phase flip: `O|x⟩ = −|x⟩` iff `x == marked`, identity otherwise.
    Oracle {
        /// Basis index whose amplitude is negated.
        marked: usize,
    },

    /// Inversion about the mean: every `a_i` becomes `2·mean − a_i`.
    Diffusion,
}

impl Operation {
    /// Applies the operator to `amplitudes`.
    ///
    /// # Errors
    /// * `SearchError::InvalidOperation` if the oracle's marked index lies
    ///   outside the vector, or the vector is empty.
    pub fn apply(&self, amplitudes: &mut [Complex<f64>]) -> Result<()> {
        if amplitudes.is_empty() {
            return Err(SearchError::InvalidOperation {
                message: format!("{} applied to an empty amplitude vector", self),
            });
        }
        match *self {
            Operation::Oracle { marked } => {
                if marked >= amplitudes.len() {
                    return Err(SearchError::InvalidOperation {
                        message: format!(
                            "Oracle marked index {} outside state space of dimension {}",
                            marked,
                            amplitudes.len()
                        ),
                    });
                }
                apply_oracle(amplitudes, marked);
            }
            Operation::Diffusion => apply_diffusion(amplitudes),
        }
        Ok(())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Oracle { marked } => write!(f, "Oracle({})", marked),
            Operation::Diffusion => write!(f, "Diffusion"),
        }
    }
}

/// Negates the real and imaginary parts of `amplitudes[marked]`.
/// No other entry is read or written.
///
/// Panics if `marked` is out of bounds; [`Operation::apply`] checks first.
pub fn apply_oracle(amplitudes: &mut [Complex<f64>], marked: usize) {
    let a = &mut amplitudes[marked];
    *a = Complex::new(-a.re, -a.im);
}

/// Reflects every amplitude about the mean of the whole vector.
///
/// The mean is accumulated over all entries before the first write; folding
/// the update into the same loop would mix pre- and post-reflection values.
pub fn apply_diffusion(amplitudes: &mut [Complex<f64>]) {
    if amplitudes.is_empty() {
        return;
    }
    let n = amplitudes.len() as f64;
    let (sum_re, sum_im) = amplitudes
        .iter()
        .fold((0.0, 0.0), |(re, im), c| (re + c.re, im + c.im));
    let mean = Complex::new(sum_re / n, sum_im / n);

    for a in amplitudes.iter_mut() {
        *a = Complex::new(2.0 * mean.re - a.re, 2.0 * mean.im - a.im);
    }
}
