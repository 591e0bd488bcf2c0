// src/sequencer/mod.rs

//! Drives an [`AmplitudeEngine`] through a table of levels.
//!
//! Each level picks a hidden marked index, lets the player trigger the oracle
//! and request hints (each one a Grover iteration) up to the level's budget,
//! and then judges a guess by direct comparison with the marked index. The
//! engine never chooses the marked index and never decides win or loss.

mod level;

pub use level::LevelConfig;

use crate::core::{Result, SearchConfig, SearchError};
use crate::simulation::{AmplitudeEngine, EngineEvent, ProbabilitySnapshot};
use rand::SeedableRng;
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use std::fmt;
use tracing::{debug, info};

/// Points per qubit for a won level.
const BASE_POINTS_PER_QUBIT: u64 = 100;
/// Bonus per unused budget iteration.
const UNUSED_ITERATION_BONUS: u64 = 25;

/// Where the sequencer is within the current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequencerState {
    /// Waiting for `start_level`.
    Ready,
    /// Engine initialized; waiting for the first oracle trigger.
    AwaitingOracle,
    /// At least one iteration applied; hints and guesses accepted.
    Searching,
    /// The last guess hit the marked index.
    Won,
    /// The last guess missed; `next_level` retries the same level.
    Failed,
    /// Every level of the table was won.
    Completed,
}

impl fmt::Display for SequencerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SequencerState::Ready => "ready",
            SequencerState::AwaitingOracle => "awaiting oracle",
            SequencerState::Searching => "searching",
            SequencerState::Won => "won",
            SequencerState::Failed => "failed",
            SequencerState::Completed => "completed",
        };
        write!(f, "{}", name)
    }
}

/// Verdict on a submitted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    /// The guess equalled the marked index.
    Won {
        /// The hidden index.
        marked: usize,
        /// Points added to the score for this level.
        points: u64,
    },
    /// The guess missed; the streak is reset.
    Failed {
        /// Index the player submitted.
        guessed: usize,
        /// The hidden index.
        marked: usize,
    },
}

/// Level sequencer owning exactly one amplitude engine.
#[derive(Debug)]
pub struct LevelSequencer {
    engine: AmplitudeEngine,
    levels: Vec<LevelConfig>,
    level_index: usize,
    state: SequencerState,
    rng: StdRng,
    iterations_used: u32,
    score: u64,
    streak: u32,
}

impl LevelSequencer {
    /// Builds a sequencer over `levels`, drawing marked indices from a
    /// `StdRng` seeded with `seed`.
    ///
    /// # Errors
    /// * `SearchError::InvalidOperation` if `levels` is empty.
    pub fn new(engine: AmplitudeEngine, levels: Vec<LevelConfig>, seed: u64) -> Result<Self> {
        if levels.is_empty() {
            return Err(SearchError::InvalidOperation {
                message: "Level table must contain at least one level".to_string(),
            });
        }
        let levels = levels.into_iter().map(LevelConfig::normalized).collect();
        Ok(Self {
            engine,
            levels,
            level_index: 0,
            state: SequencerState::Ready,
            rng: StdRng::seed_from_u64(seed),
            iterations_used: 0,
            score: 0,
            streak: 0,
        })
    }

    /// Same as [`LevelSequencer::new`] with [`LevelConfig::default_table`].
    pub fn with_default_levels(engine: AmplitudeEngine, seed: u64) -> Result<Self> {
        Self::new(engine, LevelConfig::default_table(), seed)
    }

    /// Draws a marked index for the current level and initializes the engine.
    pub fn start_level(&mut self) -> Result<SearchConfig> {
        self.expect_state(SequencerState::Ready, "start_level")?;
        let level = self.current_level();
        let dist = Uniform::new(0, level.dimension()).map_err(|e| SearchError::InvalidOperation {
            message: format!("Cannot sample marked index for {}: {}", level, e),
        })?;
        let marked = dist.sample(&mut self.rng);

        let config = self.engine.initialize(level.qubits, marked);
        self.iterations_used = 0;
        self.state = SequencerState::AwaitingOracle;
        info!("Starting level {} of {}: {}", self.level_index + 1, self.levels.len(), level);
        Ok(config)
    }

    /// First Grover iteration of the level.
    pub fn trigger_oracle(&mut self) -> Result<ProbabilitySnapshot> {
        self.expect_state(SequencerState::AwaitingOracle, "trigger_oracle")?;
        let snapshot = self.engine.advance()?;
        self.iterations_used = 1;
        self.state = SequencerState::Searching;
        Ok(snapshot)
    }

    /// One more Grover iteration, if the budget allows it.
    ///
    /// # Errors
    /// * `SearchError::BudgetExhausted` once `iteration_budget` iterations
    ///   have been spent on this level.
    pub fn request_hint(&mut self) -> Result<ProbabilitySnapshot> {
        self.expect_state(SequencerState::Searching, "request_hint")?;
        let budget = self.current_level().iteration_budget;
        if self.iterations_used >= budget {
            return Err(SearchError::BudgetExhausted { budget });
        }
        let snapshot = self.engine.advance()?;
        self.iterations_used += 1;
        debug!(used = self.iterations_used, budget, "hint applied");
        Ok(snapshot)
    }

    /// Judges `guess` against the marked index.
    pub fn submit_guess(&mut self, guess: usize) -> Result<LevelOutcome> {
        self.expect_state(SequencerState::Searching, "submit_guess")?;
        let marked = self
            .engine
            .marked_index()
            .ok_or_else(|| SearchError::not_initialized("submit_guess"))?;

        let outcome = if guess == marked {
            self.streak += 1;
            let level = self.current_level();
            let unused = u64::from(level.iteration_budget.saturating_sub(self.iterations_used));
            let points = (BASE_POINTS_PER_QUBIT * u64::from(level.qubits) + UNUSED_ITERATION_BONUS * unused)
                * u64::from(self.streak);
            self.score += points;
            self.state = SequencerState::Won;
            LevelOutcome::Won { marked, points }
        } else {
            self.streak = 0;
            self.state = SequencerState::Failed;
            LevelOutcome::Failed { guessed: guess, marked }
        };
        info!("Level {} result: {:?} (score {})", self.level_index + 1, outcome, self.score);
        Ok(outcome)
    }

    /// Moves on after a verdict: the next level after a win, the same level
    /// again after a failure.
    pub fn next_level(&mut self) -> Result<SequencerState> {
        self.state = match self.state {
            SequencerState::Won if self.level_index + 1 < self.levels.len() => {
                self.level_index += 1;
                SequencerState::Ready
            }
            SequencerState::Won => SequencerState::Completed,
            SequencerState::Failed => SequencerState::Ready,
            other => {
                return Err(SearchError::InvalidState {
                    message: format!("`next_level` not allowed while {}", other),
                });
            }
        };
        Ok(self.state)
    }

    /// The engine, read-only, for presentation code.
    pub fn engine(&self) -> &AmplitudeEngine {
        &self.engine
    }

    /// Registers a presentation observer on the owned engine. Observers see
    /// every event but cannot drive the engine.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&EngineEvent) + Send + 'static,
    {
        self.engine.subscribe(observer);
    }

    /// Configuration of the level being played.
    pub fn current_level(&self) -> LevelConfig {
        self.levels[self.level_index]
    }

    /// Zero-based index into the level table.
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// The normalized level table.
    pub fn levels(&self) -> &[LevelConfig] {
        &self.levels
    }

    /// Current position in the level lifecycle.
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Points accumulated over all won levels.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Consecutive won levels.
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Iterations spent on the current level.
    pub fn iterations_used(&self) -> u32 {
        self.iterations_used
    }

    /// Iterations still available on the current level.
    pub fn remaining_budget(&self) -> u32 {
        self.current_level().iteration_budget.saturating_sub(self.iterations_used)
    }

    fn expect_state(&self, expected: SequencerState, operation: &str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SearchError::InvalidState {
                message: format!("`{}` requires state {}, sequencer is {}", operation, expected, self.state),
            })
        }
    }
}
