//! Pursuer decision making
//!
//! Decisions are made once per tile: when a pursuer arrives on a tile it
//! resolves a target for its `(personality, mode)` and greedily steps to the
//! neighbour closest to that target. Pursuers never share state with each
//! other; each decision only reads the maze and the player.

use rand::Rng;

use super::maze::{Direction, Maze, Position};
use super::state::{Mode, Personality};
use crate::consts::*;
use crate::manhattan;

/// Where a pursuer wants to go this decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Walk greedily toward a tile
    Tile(Position),
    /// No committed target; pick any allowed neighbour at random
    Wander,
}

/// Global mode at `elapsed` seconds of play.
///
/// Frightened overrides everything while a power-up is active; otherwise
/// chase and scatter alternate every `half_period` seconds, starting with
/// chase.
pub fn mode_at(elapsed: f32, power_up_active: bool, half_period: f32) -> Mode {
    if power_up_active {
        return Mode::Frightened;
    }
    let phase = (elapsed / half_period).floor() as u64;
    if phase % 2 == 0 {
        Mode::Chase
    } else {
        Mode::Scatter
    }
}

/// Pursuer speed multiplier for the given progress
pub fn speed_multiplier(tasks_collected: u32) -> f32 {
    let steps = (tasks_collected / SPEED_STEP_TASKS) as f32;
    (1.0 + steps * SPEED_STEP).min(MAX_SPEED_MULTIPLIER)
}

/// Pick the target for a pursuer standing on `pos`
pub fn resolve_target(
    maze: &Maze,
    personality: Personality,
    mode: Mode,
    pos: Position,
    player_pos: Position,
    player_dir: Option<Direction>,
) -> Target {
    match mode {
        Mode::Frightened => Target::Wander,
        Mode::Scatter => {
            let corner = personality.scatter_corner();
            Target::Tile(maze.nearest_walkable(corner.x, corner.y))
        }
        Mode::Chase => {
            let distance = manhattan(pos, player_pos);
            match personality {
                Personality::Chaser => Target::Tile(player_pos),
                Personality::Ambusher => {
                    let ahead = match player_dir {
                        Some(dir) => player_pos.offset(dir, AMBUSH_LOOKAHEAD),
                        None => player_pos,
                    };
                    Target::Tile(maze.nearest_walkable(ahead.x, ahead.y))
                }
                Personality::Random if distance < RANDOM_CHASE_RADIUS => {
                    Target::Tile(player_pos)
                }
                Personality::Random => Target::Wander,
                Personality::Patroller if distance < PATROL_CHASE_RADIUS => {
                    Target::Tile(player_pos)
                }
                Personality::Patroller => {
                    Target::Tile(maze.nearest_walkable(PATROL_TILE.0, PATROL_TILE.1))
                }
            }
        }
    }
}

/// Choose the next step from `pos`.
///
/// Reversing `heading` is only allowed when it is the single way out. Ties
/// on distance go to the earliest direction in `Direction::ALL`. Returns
/// `None` when the tile has no walkable neighbour at all.
pub fn choose_move<R: Rng>(
    maze: &Maze,
    pos: Position,
    heading: Direction,
    target: Target,
    rng: &mut R,
) -> Option<(Direction, Position)> {
    let all = maze.neighbors(pos);
    let forward: Vec<_> = all
        .iter()
        .copied()
        .filter(|(dir, _)| *dir != heading.opposite())
        .collect();
    let options = if forward.is_empty() { all } else { forward };

    match target {
        _ if options.is_empty() => None,
        Target::Wander => {
            let i = rng.random_range(0..options.len());
            Some(options[i])
        }
        Target::Tile(goal) => {
            let mut best = options[0];
            for &candidate in &options[1..] {
                if manhattan(candidate.1, goal) < manhattan(best.1, goal) {
                    best = candidate;
                }
            }
            Some(best)
        }
    }
}
