//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Delta-time accumulation only (no wall-clock reads)
//! - Seeded RNG only
//! - Stable iteration order (pursuers by id)
//! - No rendering or platform dependencies

pub mod ai;
pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod maze;
pub mod movement;
pub mod score;
pub mod state;
pub mod tick;

pub use ai::{Target, choose_move, mode_at, resolve_target, speed_multiplier};
pub use maze::{Direction, LAYOUT, Maze, Position, Tile};
pub use score::{Bonuses, GameOutcome, Rating};
pub use state::{
    DEFAULT_SEED, EndReason, GameEvent, GamePhase, GameState, Mode, PURSUER_SPAWNS, Personality,
    Player, Pursuer,
};
pub use tick::{TickInput, initialize, tick};
