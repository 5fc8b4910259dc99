//! Bot Runner - headless native entry point
//!
//! Plays one seeded session in idle mode at a fixed 60 Hz and logs the
//! outcome. Set `RUST_LOG=info` (or `debug`) to follow the run.

use bot_runner::consts::SIM_DT;
use bot_runner::sim::{self, GameEvent, TickInput};
use bot_runner::Tuning;

/// Upper bound on simulated frames (well past the time limit)
const MAX_FRAMES: u32 = 60 * 60 * 10;

fn main() {
    env_logger::init();
    log::info!("Bot Runner (native) starting...");

    let seed = std::env::var("BOT_RUNNER_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(sim::DEFAULT_SEED);

    let tuning = match std::env::var("BOT_RUNNER_TUNING") {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning override: {e}");
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };

    let mut state = sim::GameState::with_tuning(seed, tuning);
    let start = TickInput {
        start: true,
        idle_mode: true,
        ..Default::default()
    };
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    sim::tick(&mut state, &start, SIM_DT);
    let mut frames = 1;
    while !state.is_over() && frames < MAX_FRAMES {
        sim::tick(&mut state, &input, SIM_DT);
        for event in state.drain_events() {
            match event {
                GameEvent::LifeLost { lives_remaining } => {
                    log::info!("Life lost at {:.1}s, {} left", state.elapsed, lives_remaining)
                }
                GameEvent::PursuerDebugged { id } => {
                    log::info!("Debugged pursuer {id} at {:.1}s", state.elapsed)
                }
                _ => {}
            }
        }
        frames += 1;
    }

    let Some(outcome) = state.outcome() else {
        log::warn!("Session did not finish within {MAX_FRAMES} frames");
        return;
    };

    match serde_json::to_string_pretty(outcome) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode outcome: {e}"),
    }
}
