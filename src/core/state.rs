// src/core/state.rs

use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// The amplitude vector of an `n`-qubit register, one `Complex<f64>` per
/// basis index `0..2^n`.
///
/// The engine owns the only instance; callers see it through
/// [`AmplitudeVector::as_slice`] or through derived probability snapshots.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct AmplitudeVector {
    amplitudes: Vec<Complex<f64>>,
}

impl AmplitudeVector {
    /// The equal superposition over `dim` basis states: every entry `(1/√dim, 0)`.
    pub(crate) fn uniform(dim: usize) -> Self {
        let amp = Complex::new(1.0 / (dim as f64).sqrt(), 0.0);
        Self { amplitudes: vec![amp; dim] }
    }

    /// Zero-length vector held by an unconfigured engine.
    pub(crate) fn empty() -> Self {
        Self { amplitudes: Vec::new() }
    }

    #[cfg(test)]
    pub(crate) fn from_vec(amplitudes: Vec<Complex<f64>>) -> Self {
        Self { amplitudes }
    }

    /// Read-only view of the amplitudes.
    pub fn as_slice(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Mutable view for the engine's operators.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// True before the engine has been configured.
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// `|a_i|^2` for every index.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Amplitude at `index`, or zero if out of range.
    pub fn get(&self, index: usize) -> Complex<f64> {
        self.amplitudes.get(index).copied().unwrap_or_else(Complex::zero)
    }
}

impl fmt::Display for AmplitudeVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amplitudes[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_has_equal_real_entries() {
        let v = AmplitudeVector::uniform(8);
        assert_eq!(v.dim(), 8);
        for c in v.as_slice() {
            assert!((c.re - 1.0 / 8f64.sqrt()).abs() < 1e-15);
            assert_eq!(c.im, 0.0);
        }
    }

    #[test]
    fn display_lists_entries() {
        let v = AmplitudeVector::from_vec(vec![Complex::new(1.0, 0.0), Complex::zero()]);
        assert_eq!(v.to_string(), "Amplitudes[1.0000+0.0000i, 0.0000+0.0000i]");
    }

    #[test]
    fn get_out_of_range_is_zero() {
        let v = AmplitudeVector::uniform(2);
        assert_eq!(v.get(5), Complex::zero());
    }
}
