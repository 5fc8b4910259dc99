//! Delta-time timers: run clock, power-up and invincibility
//!
//! Every timer only moves when the host ticks, so withholding ticks (pause)
//! freezes all of them, including the chase/scatter cycle.

use super::score::end_run;
use super::state::{EndReason, GameEvent, GameState};

/// Advance elapsed time; ends the run on timeout
pub fn update_clock(state: &mut GameState, dt: f32) {
    state.elapsed += dt;
    if state.elapsed >= state.time_limit {
        state.elapsed = state.time_limit;
        end_run(state, EndReason::Timeout);
    }
}

pub fn update_power_up(state: &mut GameState, dt: f32) {
    if !state.power_up_active {
        return;
    }
    state.power_up_remaining -= dt;
    if state.power_up_remaining <= 0.0 {
        state.power_up_active = false;
        state.power_up_remaining = 0.0;
        state.events.push(GameEvent::PowerUpExpired);
        log::debug!("Power-up expired at {:.2}s", state.elapsed);
    }
}

pub fn update_invincibility(state: &mut GameState, dt: f32) {
    let player = &mut state.player;
    if !player.invincible {
        return;
    }
    player.invincible_remaining -= dt;
    if player.invincible_remaining <= 0.0 {
        player.invincible = false;
        player.invincible_remaining = 0.0;
    }
}
