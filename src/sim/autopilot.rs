//! Idle/demo steering for the player
//!
//! Breadth-first search from the player's tile to the nearest collectible.
//! Unless a power-up is active, tiles next to a pursuer are avoided; if that
//! leaves nothing reachable the search is repeated without avoidance.

use std::collections::VecDeque;

use super::maze::{Direction, Maze, Position};
use super::state::GameState;
use crate::manhattan;

/// First step of a shortest path from `start` to any tile matching `goal`,
/// never entering a tile for which `blocked` is true.
pub fn first_step_toward<G, B>(maze: &Maze, start: Position, goal: G, blocked: B) -> Option<Direction>
where
    G: Fn(Position) -> bool,
    B: Fn(Position) -> bool,
{
    let width = maze.width();
    let index = |p: Position| (p.y * width + p.x) as usize;
    let mut visited = vec![false; maze.tiles().len()];
    let mut queue: VecDeque<(Position, Direction)> = VecDeque::new();

    if !maze.in_bounds(start) {
        return None;
    }
    visited[index(start)] = true;
    for (dir, next) in maze.neighbors(start) {
        if blocked(next) || visited[index(next)] {
            continue;
        }
        visited[index(next)] = true;
        queue.push_back((next, dir));
    }

    while let Some((pos, first)) = queue.pop_front() {
        if goal(pos) {
            return Some(first);
        }
        for (_, next) in maze.neighbors(pos) {
            if blocked(next) || visited[index(next)] {
                continue;
            }
            visited[index(next)] = true;
            queue.push_back((next, first));
        }
    }

    None
}

/// Queue the next direction for idle mode
pub fn steer(state: &mut GameState) {
    if !state.player.at_target() {
        return;
    }

    let maze = &state.maze;
    let start = state.player.target;
    let is_goal = |p: Position| maze.tile(p).is_collectible();
    let threats: Vec<Position> = if state.power_up_active {
        Vec::new()
    } else {
        state.pursuers.iter().flat_map(|p| [p.pos, p.target]).collect()
    };
    let dangerous = |p: Position| threats.iter().any(|&t| manhattan(p, t) <= 1);

    let choice = first_step_toward(maze, start, is_goal, dangerous)
        .or_else(|| first_step_toward(maze, start, is_goal, |_| false));

    if let Some(dir) = choice {
        state.player.next_direction = Some(dir);
    }
}
