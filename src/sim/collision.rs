//! Pickup and pursuer-contact resolution
//!
//! Pickups use the player's logical tile. Pursuer contact uses visual
//! positions so that touches register when the sprites overlap on screen,
//! not only on exact tile alignment.

use super::maze::Tile;
use super::score::end_run;
use super::state::{EndReason, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Collect whatever sits on the player's logical tile
pub fn resolve_tile_pickup(state: &mut GameState) {
    let pos = state.player.pos;
    match state.maze.tile(pos) {
        Tile::Task => {
            state.maze.set_tile(pos, Tile::Empty);
            state.tasks_collected = (state.tasks_collected + 1).min(state.total_tasks);
            state.score += TASK_POINTS;
            state.events.push(GameEvent::TaskCollected { pos });
        }
        Tile::PowerUp => {
            state.maze.set_tile(pos, Tile::Empty);
            state.power_up_active = true;
            state.power_up_remaining = state.tuning.power_up_secs;
            state.score += POWER_UP_POINTS;
            state.events.push(GameEvent::PowerUpCollected { pos });
            log::debug!("Power-up collected at ({}, {})", pos.x, pos.y);
        }
        Tile::Wall | Tile::Empty => {}
    }
}

/// Resolve player/pursuer touches in pursuer id order.
///
/// Nothing happens while the player is invincible. A life-losing touch makes
/// the player invincible, so any further touches in the same tick are
/// ignored and at most one life is lost per tick.
pub fn resolve_pursuer_contact(state: &mut GameState) {
    let spawn = PLAYER_SPAWN.into();
    let radius = state.tuning.contact_radius;

    for i in 0..state.pursuers.len() {
        if state.player.invincible {
            break;
        }
        let distance = state.pursuers[i].visual.distance(state.player.visual);
        if distance >= radius {
            continue;
        }

        if state.power_up_active {
            let pursuer = &mut state.pursuers[i];
            pursuer.respawn();
            state.bugs_debugged += 1;
            state.score += DEBUG_POINTS;
            state.events.push(GameEvent::PursuerDebugged { id: pursuer.id });
            log::debug!("Pursuer {} debugged ({} total)", pursuer.id, state.bugs_debugged);
            continue;
        }

        let player = &mut state.player;
        player.lives = player.lives.saturating_sub(1);
        player.invincible = true;
        player.invincible_remaining = state.tuning.invincibility_secs;
        player.respawn(spawn);
        let lives_remaining = player.lives;
        state.events.push(GameEvent::LifeLost { lives_remaining });
        log::debug!("Life lost to pursuer {} ({} left)", state.pursuers[i].id, lives_remaining);

        if lives_remaining == 0 {
            end_run(state, EndReason::OutOfLives);
            return;
        }
    }
}

/// End the run once every task is collected
pub fn check_win(state: &mut GameState) {
    if state.phase == GamePhase::Playing && state.tasks_collected >= state.total_tasks {
        end_run(state, EndReason::Completed);
    }
}
