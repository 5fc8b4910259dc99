//! End-of-run scoring and rating

use serde::{Deserialize, Serialize};

use super::state::{EndReason, GameEvent, GamePhase, GameState};
use crate::consts::{COMPLETION_BONUS, PERFECT_BONUS};

/// Qualitative grade of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rating {
    /// Every task collected without losing a life
    S,
    /// Every task collected
    A,
    /// At least 75% of tasks
    B,
    /// At least 50% of tasks
    C,
    D,
}

impl Rating {
    pub fn from_progress(collected: u32, total: u32, lives: u8, full_lives: u8) -> Self {
        let complete = collected >= total;
        if complete && lives >= full_lives {
            return Rating::S;
        }
        if complete {
            return Rating::A;
        }
        let fraction = collected as f32 / total as f32;
        if fraction >= 0.75 {
            Rating::B
        } else if fraction >= 0.5 {
            Rating::C
        } else {
            Rating::D
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::S => "S",
            Rating::A => "A",
            Rating::B => "B",
            Rating::C => "C",
            Rating::D => "D",
        }
    }
}

/// Bonus points awarded at the end of a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonuses {
    pub completion: u64,
    /// One point per whole second left on the clock
    pub time: u64,
    pub perfect: u64,
}

impl Bonuses {
    pub fn total(&self) -> u64 {
        self.completion + self.time + self.perfect
    }
}

/// Everything the host needs to display or persist a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub reason: EndReason,
    /// Score including bonuses
    pub final_score: u64,
    pub bonuses: Bonuses,
    pub tasks_collected: u32,
    pub total_tasks: u32,
    pub bugs_debugged: u32,
    pub lives_remaining: u8,
    /// Whole seconds left when the run ended
    pub time_remaining: u32,
    pub rating: Rating,
}

/// Finish the run: apply bonuses, move to `GameOver` and publish the
/// outcome. Later calls are ignored.
pub fn end_run(state: &mut GameState, reason: EndReason) {
    if state.outcome.is_some() {
        return;
    }

    let time_remaining = state.time_remaining().floor() as u32;
    let bonuses = match reason {
        EndReason::Completed => Bonuses {
            completion: COMPLETION_BONUS,
            time: time_remaining as u64,
            perfect: if state.player.lives >= state.tuning.starting_lives {
                PERFECT_BONUS
            } else {
                0
            },
        },
        EndReason::Timeout | EndReason::OutOfLives => Bonuses::default(),
    };
    state.score += bonuses.total();

    let outcome = GameOutcome {
        reason,
        final_score: state.score,
        bonuses,
        tasks_collected: state.tasks_collected,
        total_tasks: state.total_tasks,
        bugs_debugged: state.bugs_debugged,
        lives_remaining: state.player.lives,
        time_remaining,
        rating: Rating::from_progress(
            state.tasks_collected,
            state.total_tasks,
            state.player.lives,
            state.tuning.starting_lives,
        ),
    };

    log::info!(
        "Game over ({:?}): score {}, tasks {}/{}, rating {}",
        reason,
        outcome.final_score,
        outcome.tasks_collected,
        outcome.total_tasks,
        outcome.rating.as_str()
    );

    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver(outcome.clone()));
    state.outcome = Some(outcome);
}
