//! Grid-locked movement with smooth visual interpolation
//!
//! Each entity has a logical tile (authoritative for pickups and AI), a
//! target tile it is walking toward, and a visual position that slides to
//! the target at `speed * dt` per axis. A new target is picked only once the
//! visual position has arrived.

use glam::Vec2;

use super::ai::{self, Target};
use super::maze::{Direction, Maze, Position};
use super::state::GameState;
use crate::consts::SNAP_EPSILON;
use crate::tile_to_visual;

/// Move `current` toward `target` by at most `step` on each axis, snapping
/// when the remaining gap is within `step` or `SNAP_EPSILON`.
pub fn approach(current: Vec2, target: Vec2, step: f32) -> Vec2 {
    let axis = |c: f32, t: f32| {
        let gap = t - c;
        if gap.abs() <= step.max(SNAP_EPSILON) {
            t
        } else {
            c + gap.signum() * step
        }
    };
    Vec2::new(axis(current.x, target.x), axis(current.y, target.y))
}

/// Walkable destination one step from `pos` in `dir`, after tunnel wrap
fn step_target(maze: &Maze, pos: Position, dir: Direction) -> Option<Position> {
    let next = maze.wrap(pos.step(dir));
    maze.is_walkable(next.x, next.y).then_some(next)
}

/// Visual start for a move from `pos` to `next`. Tunnel moves start one
/// tile beyond the far edge so the entity slides in instead of crossing the
/// whole board.
fn departure_visual(current: Vec2, pos: Position, dir: Direction, next: Position) -> Vec2 {
    if pos.step(dir) == next {
        current
    } else {
        let (dx, dy) = dir.delta();
        tile_to_visual(next) - Vec2::new(dx as f32, dy as f32)
    }
}

/// Advance the player one tick
pub fn update_player(state: &mut GameState, dt: f32) {
    let maze = &state.maze;
    let player = &mut state.player;

    if player.at_target() {
        player.pos = player.target;

        let buffered = player
            .next_direction
            .and_then(|dir| step_target(maze, player.pos, dir).map(|next| (dir, next)));
        let continued = player
            .direction
            .and_then(|dir| step_target(maze, player.pos, dir).map(|next| (dir, next)));

        if let Some((dir, next)) = buffered {
            player.next_direction = None;
            player.direction = Some(dir);
            player.visual = departure_visual(player.visual, player.pos, dir, next);
            player.target = next;
        } else if let Some((dir, next)) = continued {
            player.visual = departure_visual(player.visual, player.pos, dir, next);
            player.target = next;
        } else {
            player.direction = None;
        }
    }

    player.visual = approach(player.visual, tile_to_visual(player.target), player.speed * dt);
    if player.at_target() {
        player.pos = player.target;
    }
}

/// Advance every pursuer one tick
pub fn update_pursuers(state: &mut GameState, dt: f32) {
    let mode = ai::mode_at(
        state.elapsed,
        state.power_up_active,
        state.tuning.mode_half_period_secs,
    );
    let speed = state.tuning.pursuer_base_speed * ai::speed_multiplier(state.tasks_collected);
    let maze = &state.maze;
    let player_pos = state.player.pos;
    let player_dir = state.player.direction;

    for pursuer in &mut state.pursuers {
        pursuer.mode = mode;
        pursuer.speed = speed;

        if pursuer.at_target() {
            pursuer.pos = pursuer.target;
            let target = ai::resolve_target(
                maze,
                pursuer.personality,
                mode,
                pursuer.pos,
                player_pos,
                player_dir,
            );
            if let Some((dir, next)) =
                ai::choose_move(maze, pursuer.pos, pursuer.direction, target, &mut state.rng)
            {
                pursuer.prev_direction = pursuer.direction;
                pursuer.direction = dir;
                pursuer.visual = departure_visual(pursuer.visual, pursuer.pos, dir, next);
                pursuer.target = next;
            }
        }

        pursuer.visual = approach(pursuer.visual, tile_to_visual(pursuer.target), pursuer.speed * dt);
        if pursuer.at_target() {
            pursuer.pos = pursuer.target;
        }
    }
}

/// Tile the pursuer at `index` is currently steering toward, for debug
/// overlays. Wandering pursuers return `None`.
pub fn pursuer_goal(state: &GameState, index: usize) -> Option<Position> {
    let pursuer = state.pursuers.get(index)?;
    let target = ai::resolve_target(
        &state.maze,
        pursuer.personality,
        pursuer.mode,
        pursuer.pos,
        state.player.pos,
        state.player.direction,
    );
    match target {
        Target::Tile(pos) => Some(pos),
        Target::Wander => None,
    }
}
