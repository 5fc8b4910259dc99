//! Bot Runner - A tick-driven maze chase simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, pursuer AI, movement, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Top-10 leaderboard of finished runs

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

use crate::sim::Position;

/// Game configuration constants
pub mod consts {
    /// Fixed timestep used by the headless runner and tests (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Maze dimensions in tiles
    pub const MAZE_WIDTH: i32 = 21;
    pub const MAZE_HEIGHT: i32 = 21;
    /// Rows whose left/right edges wrap around to each other
    pub const TUNNEL_ROWS: [i32; 2] = [9, 13];

    /// Player spawn tile (x, y)
    pub const PLAYER_SPAWN: (i32, i32) = (10, 12);
    /// Fixed interior tile the patroller walks back to
    pub const PATROL_TILE: (i32, i32) = (10, 3);

    /// Points per pickup / capture
    pub const TASK_POINTS: u64 = 10;
    pub const POWER_UP_POINTS: u64 = 50;
    pub const DEBUG_POINTS: u64 = 200;

    /// End-of-run bonuses
    pub const COMPLETION_BONUS: u64 = 1000;
    pub const PERFECT_BONUS: u64 = 5000;

    /// Default balance (overridable through `Tuning`)
    pub const TIME_LIMIT_SECS: f32 = 120.0;
    pub const POWER_UP_SECS: f32 = 7.0;
    pub const INVINCIBILITY_SECS: f32 = 2.0;
    pub const PLAYER_SPEED: f32 = 5.0; // tiles per second
    pub const PURSUER_BASE_SPEED: f32 = 4.0;
    pub const STARTING_LIVES: u8 = 3;
    /// Chase and scatter each last this long before flipping
    pub const MODE_HALF_PERIOD_SECS: f32 = 20.0;
    /// Visual distance (tiles) below which a pursuer touches the player
    pub const CONTACT_RADIUS: f32 = 0.5;

    /// Pursuer AI
    pub const AMBUSH_LOOKAHEAD: i32 = 4;
    pub const RANDOM_CHASE_RADIUS: i32 = 8;
    pub const PATROL_CHASE_RADIUS: i32 = 5;

    /// Pursuers speed up 10% for every 50 tasks collected, capped at 2x
    pub const SPEED_STEP_TASKS: u32 = 50;
    pub const SPEED_STEP: f32 = 0.1;
    pub const MAX_SPEED_MULTIPLIER: f32 = 2.0;

    /// Visual positions closer than this to their target snap onto it
    pub const SNAP_EPSILON: f32 = 0.001;
}

/// Manhattan distance between two tiles
#[inline]
pub fn manhattan(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Convert a tile coordinate to its visual (continuous) coordinate
#[inline]
pub fn tile_to_visual(pos: Position) -> Vec2 {
    Vec2::new(pos.x as f32, pos.y as f32)
}
