// tests/simulation_tests.rs

use qsearch::{AmplitudeEngine, SearchError};

const TEST_TOLERANCE: f64 = 1e-9;

// --- Helper Functions ---

fn assert_normalized(engine: &AmplitudeEngine, context: &str) {
    let total = engine.probabilities().total();
    assert!(
        (total - 1.0).abs() < TEST_TOLERANCE,
        "Total probability {} != 1 - {}",
        total,
        context
    );
}

fn marked_after(qubits: u32, marked: usize, iterations: u32) -> Result<f64, SearchError> {
    let mut engine = AmplitudeEngine::with_config(qubits, marked);
    for _ in 0..iterations {
        engine.advance()?;
    }
    engine.marked_probability()
}

// --- Tests ---

#[test]
fn test_normalization_holds_for_every_register_width() -> Result<(), SearchError> {
    for n in 1..=8u32 {
        let dim = 1usize << n;
        for &marked in &[0, dim / 3, dim - 1] {
            let mut engine = AmplitudeEngine::with_config(n, marked);
            assert_normalized(&engine, &format!("n={} m={} init", n, marked));
            for k in 1..=20 {
                engine.advance()?;
                assert_normalized(&engine, &format!("n={} m={} k={}", n, marked, k));
            }
        }
    }
    Ok(())
}

#[test]
fn test_four_states_one_iteration_finds_marked() -> Result<(), SearchError> {
    // N = 4: sin θ = 1/2, so sin²(3θ) = 1 after a single iteration.
    for marked in 0..4 {
        let mut engine = AmplitudeEngine::with_config(2, marked);
        let snapshot = engine.advance()?;
        let p_marked = snapshot.as_slice()[marked];
        assert!((p_marked - 1.0).abs() < TEST_TOLERANCE, "p = {}", p_marked);
        for (i, &p) in snapshot.as_slice().iter().enumerate() {
            if i != marked {
                assert!(p_marked > p, "index {} not below marked", i);
            }
        }
    }
    Ok(())
}

#[test]
fn test_eight_states_one_iteration_closed_form() -> Result<(), SearchError> {
    // N = 8: amplitude 5/(2√8) after one iteration, probability 25/32.
    for marked in 0..8 {
        let p = marked_after(3, marked, 1)?;
        assert!((p - 0.78125).abs() < TEST_TOLERANCE, "marked {} -> {}", marked, p);
    }
    Ok(())
}

#[test]
fn test_sixteen_states_peak_at_optimal() -> Result<(), SearchError> {
    let engine = AmplitudeEngine::with_config(4, 6);
    assert_eq!(engine.optimal_iterations(), Some(3));

    let p2 = marked_after(4, 6, 2)?;
    let p3 = marked_after(4, 6, 3)?;
    let p4 = marked_after(4, 6, 4)?;
    assert!(p3 > p2, "k=3 ({}) should beat k=2 ({})", p3, p2);
    assert!(p3 > p4, "k=3 ({}) should beat overshoot k=4 ({})", p3, p4);
    Ok(())
}

#[test]
fn test_run_to_optimal_matches_manual_iterations() -> Result<(), SearchError> {
    let mut engine = AmplitudeEngine::with_config(5, 17);
    engine.advance()?; // stray iteration is discarded by the reset
    let snapshot = engine.run_to_optimal()?;
    assert_eq!(snapshot.iteration(), 4);
    assert_eq!(engine.iteration(), 4);

    let expected = marked_after(5, 17, 4)?;
    assert!((snapshot.as_slice()[17] - expected).abs() < TEST_TOLERANCE);
    assert_eq!(engine.max_probability_index()?, 17);
    Ok(())
}

#[test]
fn test_state_labels() -> Result<(), SearchError> {
    let engine = AmplitudeEngine::with_config(3, 0);
    assert_eq!(engine.state_label(5)?, "101");
    assert_eq!(engine.state_label(0)?, "000");
    assert_eq!(engine.ket_label(5)?, "|101⟩");

    let engine = AmplitudeEngine::with_config(1, 0);
    assert_eq!(engine.state_label(0)?, "0");
    assert_eq!(engine.state_label(1)?, "1");

    let engine = AmplitudeEngine::with_config(2, 0);
    assert_eq!(engine.state_label(3)?, "11");
    // Past the end clamps to the last state.
    assert_eq!(engine.state_label(9)?, "11");
    Ok(())
}

#[test]
fn test_initialize_is_idempotent() -> Result<(), SearchError> {
    let mut engine = AmplitudeEngine::new();
    engine.initialize(6, 40);
    let first = engine.amplitudes().clone();

    for _ in 0..5 {
        engine.advance()?;
    }
    engine.initialize(6, 40);
    assert_eq!(engine.amplitudes(), &first);
    assert_eq!(engine.iteration(), 0);
    Ok(())
}

#[test]
fn test_reset_keeps_configuration() -> Result<(), SearchError> {
    let mut engine = AmplitudeEngine::with_config(3, 4);
    let initial = engine.probabilities();
    engine.advance()?;
    engine.advance()?;

    let snapshot = engine.reset()?;
    assert_eq!(snapshot, initial);
    assert_eq!(engine.iteration(), 0);
    assert_eq!(engine.marked_index(), Some(4));
    assert_eq!(engine.qubits(), Some(3));
    Ok(())
}

#[test]
fn test_out_of_range_configuration_is_clamped() {
    let mut engine = AmplitudeEngine::new();
    let config = engine.initialize(0, 5);
    assert_eq!((config.qubits(), config.marked()), (1, 1));

    let config = engine.initialize(12, 1_000);
    assert_eq!((config.qubits(), config.marked()), (8, 255));
    assert_eq!(engine.dimension(), 256);
    assert_eq!(engine.optimal_iterations(), Some(13));
}

#[test]
fn test_advance_before_initialize_is_rejected() {
    let mut engine = AmplitudeEngine::new();
    let err = engine.advance().unwrap_err();
    assert!(matches!(err, SearchError::InvalidState { .. }));
    assert_eq!(err.to_string(), "Invalid State: `advance` called before the engine was initialized");
    assert!(engine.probabilities().is_empty());
    assert!(!engine.is_initialized());
}

#[test]
fn test_snapshots_are_detached() -> Result<(), SearchError> {
    let mut engine = AmplitudeEngine::with_config(2, 2);
    let before = engine.probabilities();
    engine.advance()?;
    assert!(before.as_slice().iter().all(|&p| (p - 0.25).abs() < TEST_TOLERANCE));
    Ok(())
}
