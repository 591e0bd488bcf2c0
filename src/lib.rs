// src/lib.rs

//! `qsearch` - Amplitude simulation of Grover's search algorithm
//!
//! The crate keeps the complex amplitude vector of an `n`-qubit register
//! (`1 <= n <= 8`), applies the phase oracle and the diffusion operator, and
//! reports per-state probabilities. A small level sequencer on top shows how
//! a game loop is expected to drive the engine.

pub mod core;
pub mod operations;
pub mod simulation;
pub mod validation;
pub mod sequencer;

// Re-export the most common types for easier top-level use
pub use crate::core::{AmplitudeVector, Result, SearchConfig, SearchError};
pub use operations::Operation;
pub use simulation::{AmplitudeEngine, EngineEvent, Phase, ProbabilitySnapshot};
pub use sequencer::{LevelConfig, LevelOutcome, LevelSequencer, SequencerState};
pub use validation::{check_normalization, check_probability_mass, total_probability};

// Example 1: Amplifying one marked state out of sixteen
// Runs the optimal number of iterations and reads back the most likely index.
/// ```
/// use qsearch::{AmplitudeEngine, SearchError};
///
/// # fn main() -> Result<(), SearchError> {
/// let mut engine = AmplitudeEngine::with_config(4, 11);
/// assert_eq!(engine.optimal_iterations(), Some(3));
///
/// let snapshot = engine.run_to_optimal()?;
/// println!("{}", snapshot);
///
/// // sin^2(7 * asin(1/4)) ~= 0.9613
/// assert!(engine.marked_probability()? > 0.96);
/// assert_eq!(engine.max_probability_index()?, 11);
/// assert_eq!(engine.state_label(11)?, "1011");
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Playing one level through the sequencer
/// ```
/// use qsearch::{AmplitudeEngine, LevelConfig, LevelOutcome, LevelSequencer};
///
/// let levels = vec![LevelConfig::new(2, 2)];
/// let mut game = LevelSequencer::new(AmplitudeEngine::new(), levels, 1234).unwrap();
///
/// game.start_level().unwrap();
/// let snapshot = game.trigger_oracle().unwrap();
///
/// // One iteration on four states concentrates everything on the marked index,
/// // so the best guess is simply the argmax.
/// let guess = snapshot.max_index().unwrap();
/// match game.submit_guess(guess).unwrap() {
///     LevelOutcome::Won { points, .. } => assert_eq!(points, 225),
///     LevelOutcome::Failed { .. } => panic!("argmax should hit the marked index"),
/// }
/// ```
#[doc(hidden)]
const _: () = ();
