//! Numerical bounds and tolerances shared by the engine and its checks.

/// Smallest supported register width.
pub const MIN_QUBITS: u32 = 1;
/// Largest supported register width; caps the vector at 256 amplitudes.
pub const MAX_QUBITS: u32 = 8;
/// Allowed deviation of the total probability from 1.0.
pub const NORM_TOLERANCE: f64 = 1e-9;
/// π/4, the prefactor of the optimal iteration count.
pub const FRAC_PI_4: f64 = std::f64::consts::FRAC_PI_4;
