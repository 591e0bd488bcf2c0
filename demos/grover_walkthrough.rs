//! Steps through Grover's search on three qubits one operator at a time,
//! then plays the default level table with an argmax strategy.

use qsearch::{AmplitudeEngine, EngineEvent, LevelOutcome, LevelSequencer, SearchError};

fn print_bars(engine: &AmplitudeEngine) -> Result<(), SearchError> {
    let snapshot = engine.probabilities();
    for (i, p) in snapshot.as_slice().iter().enumerate() {
        let bar = "#".repeat((p * 40.0).round() as usize);
        println!("  {} {:.4} {}", engine.ket_label(i)?, p, bar);
    }
    Ok(())
}

fn main() -> Result<(), SearchError> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    println!("--- qsearch: Grover's search, 3 qubits, marked |101> ---");
    let mut engine = AmplitudeEngine::with_config(3, 5);
    engine.subscribe(|event| {
        if let EngineEvent::Advanced { snapshot } = event {
            println!("[observer] iteration {} complete", snapshot.iteration());
        }
    });

    println!("\nUniform superposition:");
    print_bars(&engine)?;

    for _ in 0..engine.optimal_iterations().unwrap_or(1) {
        engine.apply_oracle()?;
        println!("\nAfter oracle ({}):", engine.phase());
        print_bars(&engine)?;

        engine.apply_diffusion()?;
        println!("\nAfter diffusion (iteration {}):", engine.iteration());
        print_bars(&engine)?;
    }
    println!(
        "\nMost likely state: {}",
        engine.ket_label(engine.max_probability_index()?)?
    );

    println!("\n--- Level run ---");
    let mut game = LevelSequencer::with_default_levels(AmplitudeEngine::new(), 7)?;
    loop {
        let config = game.start_level()?;
        let mut best = game.trigger_oracle()?;
        while game.remaining_budget() > 1 {
            let snapshot = game.request_hint()?;
            if snapshot.get(snapshot.max_index().unwrap_or(0)) > best.get(best.max_index().unwrap_or(0)) {
                best = snapshot;
            }
        }
        let guess = best.max_index().unwrap_or(0);
        match game.submit_guess(guess)? {
            LevelOutcome::Won { points, .. } => println!("{}: found {} (+{})", config, guess, points),
            LevelOutcome::Failed { marked, .. } => println!("{}: guessed {}, was {}", config, guess, marked),
        }
        if game.next_level()? == qsearch::SequencerState::Completed {
            break;
        }
    }
    println!("Final score: {}", game.score());
    Ok(())
}
