// src/validation/mod.rs

//! Provides functions to validate amplitude vectors and probability snapshots.

use crate::core::{Result, SearchError, NORM_TOLERANCE};
use num_complex::Complex;

/// Sum of `|c_i|^2` over the vector.
pub fn total_probability(amplitudes: &[Complex<f64>]) -> f64 {
    amplitudes.iter().map(|c| c.norm_sqr()).sum()
}

/// Checks if the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `amplitudes` - The vector to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to 1e-9.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(SearchError::Incoherence)` if normalization fails.
pub fn check_normalization(amplitudes: &[Complex<f64>], tolerance: Option<f64>) -> Result<()> {
    check_mass(total_probability(amplitudes), tolerance, "Sum(|c_i|^2)")
}

/// Same check as [`check_normalization`] for an already-derived probability array.
pub fn check_probability_mass(probabilities: &[f64], tolerance: Option<f64>) -> Result<()> {
    check_mass(probabilities.iter().sum(), tolerance, "Sum(p_i)")
}

fn check_mass(total: f64, tolerance: Option<f64>, what: &str) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    if (total - 1.0).abs() > effective_tolerance {
        Err(SearchError::Incoherence {
            message: format!(
                "State vector normalization failed. {} = {} (Deviation > {})",
                what, total, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}
