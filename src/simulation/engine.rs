// src/simulation/engine.rs
use crate::core::{AmplitudeVector, Result, SearchConfig, SearchError};
use crate::operations::Operation;
use crate::simulation::ProbabilitySnapshot;
use crate::validation;
use std::fmt;
use tracing::{debug, trace, warn};

/// Which operator was applied last. Presentation code uses it to label the
/// current frame; the engine uses it to count iterations during step-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Freshly initialized or reset.
    Superposition,
    /// The oracle has flipped the marked amplitude; diffusion is pending.
    OracleApplied,
    /// A diffusion step completed.
    Diffused,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Superposition => write!(f, "superposition"),
            Phase::OracleApplied => write!(f, "oracle"),
            Phase::Diffused => write!(f, "diffusion"),
        }
    }
}

/// Notification delivered to observers after each state change.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// `initialize` ran with the given effective configuration.
    Initialized {
        /// Configuration after clamping.
        config: SearchConfig,
        /// Uniform superposition probabilities.
        snapshot: ProbabilitySnapshot,
    },
    /// `reset` restored the uniform superposition.
    Reset {
        /// Uniform superposition probabilities.
        snapshot: ProbabilitySnapshot,
    },
    /// An oracle-only step.
    OracleApplied {
        /// Probabilities after the phase flip (unchanged magnitudes).
        snapshot: ProbabilitySnapshot,
    },
    /// A diffusion-only step.
    Diffused {
        /// Probabilities after the reflection.
        snapshot: ProbabilitySnapshot,
    },
    /// A full oracle+diffusion iteration.
    Advanced {
        /// Probabilities after the iteration.
        snapshot: ProbabilitySnapshot,
    },
}

impl EngineEvent {
    /// The probabilities right after the change.
    pub fn snapshot(&self) -> &ProbabilitySnapshot {
        match self {
            EngineEvent::Initialized { snapshot, .. }
            | EngineEvent::Reset { snapshot }
            | EngineEvent::OracleApplied { snapshot }
            | EngineEvent::Diffused { snapshot }
            | EngineEvent::Advanced { snapshot } => snapshot,
        }
    }
}

/// Callback registered through [`AmplitudeEngine::subscribe`].
pub type Observer = Box<dyn FnMut(&EngineEvent) + Send>;

/// Owns the amplitude vector of one Grover search and evolves it.
///
/// An engine starts unconfigured; every operation that needs the marked
/// index fails with `SearchError::InvalidState` until [`initialize`] has run.
/// Reads ([`probabilities`]) are always allowed.
///
/// [`initialize`]: AmplitudeEngine::initialize
/// [`probabilities`]: AmplitudeEngine::probabilities
pub struct AmplitudeEngine {
    config: Option<SearchConfig>,
    amplitudes: AmplitudeVector,
    iteration: u32,
    phase: Phase,
    observers: Vec<Observer>,
}

impl Default for AmplitudeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AmplitudeEngine {
    /// Creates an unconfigured engine.
    pub fn new() -> Self {
        Self {
            config: None,
            amplitudes: AmplitudeVector::empty(),
            iteration: 0,
            phase: Phase::Superposition,
            observers: Vec::new(),
        }
    }

    /// Creates an engine and initializes it with `qubits` and `marked`
    /// (both clamped, see [`SearchConfig::new`]).
    pub fn with_config(qubits: u32, marked: usize) -> Self {
        let mut engine = Self::new();
        engine.initialize(qubits, marked);
        engine
    }

    /// Sets up a fresh search: uniform superposition over `2^qubits` states,
    /// iteration counter at 0.
    ///
    /// Inputs outside the supported range are clamped rather than rejected;
    /// the effective configuration is returned. Calling this twice with the
    /// same arguments yields identical state.
    pub fn initialize(&mut self, qubits: u32, marked: usize) -> SearchConfig {
        let config = SearchConfig::new(qubits, marked);
        if SearchConfig::was_clamped(qubits, marked) {
            warn!(
                "Clamped search configuration: requested n={} marked={}, using n={} marked={}",
                qubits,
                marked,
                config.qubits(),
                config.marked()
            );
        }
        self.config = Some(config);
        self.restore_superposition();
        debug!(
            qubits = config.qubits(),
            marked = config.marked(),
            optimal = config.optimal_iterations(),
            "engine initialized"
        );
        let snapshot = self.probabilities();
        self.notify(EngineEvent::Initialized { config, snapshot });
        config
    }

    /// Returns to the uniform superposition with the current configuration.
    ///
    /// # Errors
    /// * `SearchError::InvalidState` if the engine was never initialized.
    pub fn reset(&mut self) -> Result<ProbabilitySnapshot> {
        self.require_config("reset")?;
        self.restore_superposition();
        debug!("engine reset");
        let snapshot = self.probabilities();
        self.notify(EngineEvent::Reset { snapshot: snapshot.clone() });
        Ok(snapshot)
    }

    /// One Grover iteration: oracle, then diffusion, then `iteration += 1`.
    ///
    /// # Returns
    /// * `Ok(ProbabilitySnapshot)` after the iteration.
    /// * `Err(SearchError::InvalidState)` if the engine is unconfigured, or
    ///   an oracle step is pending diffusion; the state is left untouched.
    pub fn advance(&mut self) -> Result<ProbabilitySnapshot> {
        let config = self.require_config("advance")?;
        self.reject_pending_oracle("advance")?;
        self.evolve(&[Operation::Oracle { marked: config.marked() }, Operation::Diffusion])?;
        self.iteration += 1;
        self.phase = Phase::Diffused;

        let snapshot = self.probabilities();
        debug!(
            iteration = self.iteration,
            marked_probability = snapshot.get(config.marked()).unwrap_or(0.0),
            "grover iteration applied"
        );
        self.notify(EngineEvent::Advanced { snapshot: snapshot.clone() });
        Ok(snapshot)
    }

    /// Applies only the oracle phase flip. Does not count as an iteration on
    /// its own.
    ///
    /// # Errors
    /// * `SearchError::InvalidState` if the previous step was already an
    ///   oracle; a second flip would cancel the first.
    pub fn apply_oracle(&mut self) -> Result<ProbabilitySnapshot> {
        let config = self.require_config("apply_oracle")?;
        self.reject_pending_oracle("apply_oracle")?;
        self.evolve(&[Operation::Oracle { marked: config.marked() }])?;
        self.phase = Phase::OracleApplied;

        let snapshot = self.probabilities();
        self.notify(EngineEvent::OracleApplied { snapshot: snapshot.clone() });
        Ok(snapshot)
    }

    /// Applies only the diffusion operator. Completes an iteration (and bumps
    /// the counter) when it directly follows [`apply_oracle`].
    ///
    /// [`apply_oracle`]: AmplitudeEngine::apply_oracle
    pub fn apply_diffusion(&mut self) -> Result<ProbabilitySnapshot> {
        self.require_config("apply_diffusion")?;
        self.evolve(&[Operation::Diffusion])?;
        if self.phase == Phase::OracleApplied {
            self.iteration += 1;
        }
        self.phase = Phase::Diffused;

        let snapshot = self.probabilities();
        self.notify(EngineEvent::Diffused { snapshot: snapshot.clone() });
        Ok(snapshot)
    }

    /// Resets, then advances exactly `k*` times.
    pub fn run_to_optimal(&mut self) -> Result<ProbabilitySnapshot> {
        let config = self.require_config("run_to_optimal")?;
        self.reset()?;
        let mut snapshot = self.probabilities();
        for _ in 0..config.optimal_iterations() {
            snapshot = self.advance()?;
        }
        Ok(snapshot)
    }

    /// Current probabilities. Empty before initialization.
    pub fn probabilities(&self) -> ProbabilitySnapshot {
        ProbabilitySnapshot::new(self.amplitudes.probabilities(), self.iteration)
    }

    /// Probability currently held by the marked index.
    pub fn marked_probability(&self) -> Result<f64> {
        let config = self.require_config("marked_probability")?;
        Ok(self.amplitudes.get(config.marked()).norm_sqr())
    }

    /// Index with the highest probability, lowest index on ties.
    pub fn max_probability_index(&self) -> Result<usize> {
        self.require_config("max_probability_index")?;
        self.probabilities()
            .max_index()
            .ok_or_else(|| SearchError::not_initialized("max_probability_index"))
    }

    /// `index` as an `n`-bit binary string, most significant bit first
    /// (`n = 3, index = 5` gives `"101"`). Indices past the end are clamped
    /// to the last state.
    pub fn state_label(&self, index: usize) -> Result<String> {
        let config = self.require_config("state_label")?;
        let index = index.min(config.dimension() - 1);
        Ok(format!("{:0width$b}", index, width = config.qubits() as usize))
    }

    /// [`state_label`] in ket notation, e.g. `"|101⟩"`.
    ///
    /// [`state_label`]: AmplitudeEngine::state_label
    pub fn ket_label(&self, index: usize) -> Result<String> {
        Ok(format!("|{}⟩", self.state_label(index)?))
    }

    /// Registers a callback invoked after every state change.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&EngineEvent) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Effective configuration, if initialized.
    pub fn config(&self) -> Option<SearchConfig> {
        self.config
    }

    /// True once `initialize` has run.
    pub fn is_initialized(&self) -> bool {
        self.config.is_some()
    }

    /// Qubit count `n`, if initialized.
    pub fn qubits(&self) -> Option<u32> {
        self.config.map(|c| c.qubits())
    }

    /// Number of basis states `N` (0 before initialization).
    pub fn dimension(&self) -> usize {
        self.amplitudes.dim()
    }

    /// Marked index, if initialized.
    pub fn marked_index(&self) -> Option<usize> {
        self.config.map(|c| c.marked())
    }

    /// Completed iterations since the last initialize/reset.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// `k*` for the current configuration, if initialized.
    pub fn optimal_iterations(&self) -> Option<u32> {
        self.config.map(|c| c.optimal_iterations())
    }

    /// Operator applied last.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Read-only view of the amplitude vector.
    pub fn amplitudes(&self) -> &AmplitudeVector {
        &self.amplitudes
    }

    #[cfg(test)]
    pub(crate) fn set_amplitudes(&mut self, amplitudes: AmplitudeVector) -> Result<()> {
        if amplitudes.dim() != self.amplitudes.dim() {
            return Err(SearchError::InvalidOperation {
                message: format!(
                    "Cannot set state: provided dimension {} does not match engine dimension {}",
                    amplitudes.dim(),
                    self.amplitudes.dim()
                ),
            });
        }
        self.amplitudes = amplitudes;
        Ok(())
    }

    fn require_config(&self, operation: &str) -> Result<SearchConfig> {
        self.config.ok_or_else(|| SearchError::not_initialized(operation))
    }

    /// An oracle step must be completed by `apply_diffusion` before any
    /// other evolving call.
    fn reject_pending_oracle(&self, operation: &str) -> Result<()> {
        if self.phase == Phase::OracleApplied {
            return Err(SearchError::InvalidState {
                message: format!("`{}` called while an oracle step awaits diffusion", operation),
            });
        }
        Ok(())
    }

    fn restore_superposition(&mut self) {
        if let Some(config) = self.config {
            self.amplitudes = AmplitudeVector::uniform(config.dimension());
        }
        self.iteration = 0;
        self.phase = Phase::Superposition;
    }

    /// Applies `ops` to a copy of the amplitudes and commits the copy only if
    /// it is still normalized.
    fn evolve(&mut self, ops: &[Operation]) -> Result<()> {
        let mut next = self.amplitudes.clone();
        for op in ops {
            trace!("applying {}", op);
            op.apply(next.as_mut_slice())?;
        }
        if let Err(e) = validation::check_normalization(next.as_slice(), None) {
            warn!("rejecting step: {}", e);
            return Err(e);
        }
        self.amplitudes = next;
        Ok(())
    }

    fn notify(&mut self, event: EngineEvent) {
        for observer in self.observers.iter_mut() {
            observer(&event);
        }
    }
}

impl fmt::Debug for AmplitudeEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmplitudeEngine")
            .field("config", &self.config)
            .field("amplitudes", &self.amplitudes)
            .field("iteration", &self.iteration)
            .field("phase", &self.phase)
            .field("observers", &self.observers.len())
            .finish()
    }
}
