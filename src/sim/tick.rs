//! Per-frame simulation step
//!
//! The host calls `tick` once per animation frame with the wall-clock delta.
//! Order within a tick: clock, power-up timer, invincibility, player
//! movement, pursuer movement, pickups, pursuer contact, win check.

use super::maze::Direction;
use super::state::{GamePhase, GameState};
use super::{autopilot, clock, collision, movement};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Direction pressed this frame, if any
    pub direction: Option<Direction>,
    /// Start the run (Ready -> Playing)
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - the player steers itself toward collectibles
    pub idle_mode: bool,
}

/// Create a fresh session in the `Ready` phase
pub fn initialize(seed: u64) -> GameState {
    GameState::new(seed)
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.pause();
                log::info!("Paused at {:.2}s", state.elapsed);
                return;
            }
            GamePhase::Paused => {
                state.resume();
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    if input.start {
        state.start();
    }
    if let Some(dir) = input.direction {
        state.queue_direction(dir);
    }

    // Only a running game advances
    if state.phase != GamePhase::Playing {
        return;
    }
    if !(dt.is_finite() && dt > 0.0) {
        return;
    }

    if input.idle_mode {
        autopilot::steer(state);
    }

    clock::update_clock(state, dt);
    if state.is_over() {
        return;
    }
    clock::update_power_up(state, dt);
    clock::update_invincibility(state, dt);

    movement::update_player(state, dt);
    movement::update_pursuers(state, dt);

    collision::resolve_tile_pickup(state);
    collision::resolve_pursuer_contact(state);
    if state.is_over() {
        return;
    }
    collision::check_win(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::maze::{Position, Tile};
    use crate::sim::state::{EndReason, GameEvent, Mode};
    use crate::sim::score::Rating;
    use crate::tile_to_visual;
    use proptest::prelude::*;

    fn started(seed: u64) -> GameState {
        let mut state = initialize(seed);
        tick(&mut state, &TickInput { start: true, ..Default::default() }, SIM_DT);
        state
    }

    /// Park the player on `pos` with no pending movement
    fn teleport(state: &mut GameState, pos: Position) {
        state.player.respawn(pos);
    }

    #[test]
    fn test_tick_ready_to_playing() {
        let mut state = initialize(12345);
        assert_eq!(state.phase, GamePhase::Ready);

        // Tick without start - should stay in Ready and not advance
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.elapsed, 0.0);

        tick(&mut state, &TickInput { start: true, ..Default::default() }, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.elapsed > 0.0);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = started(12345);

        let input = TickInput { pause: true, ..Default::default() };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        // Unpause
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pause_freezes_all_timers() {
        let mut state = started(8);
        state.power_up_active = true;
        state.power_up_remaining = 5.0;
        let elapsed = state.elapsed;
        let positions: Vec<_> = state.pursuers.iter().map(|p| p.visual).collect();

        state.pause();
        for _ in 0..10_000 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }

        assert_eq!(state.elapsed, elapsed);
        assert_eq!(state.power_up_remaining, 5.0);
        let after: Vec<_> = state.pursuers.iter().map(|p| p.visual).collect();
        assert_eq!(positions, after);
    }

    #[test]
    fn test_game_over_ignores_ticks() {
        let mut state = started(8);
        crate::sim::score::end_run(&mut state, EndReason::Timeout);
        let elapsed = state.elapsed;
        let score = state.score;
        tick(&mut state, &TickInput { start: true, pause: true, ..Default::default() }, SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.elapsed, elapsed);
        assert_eq!(state.score, score);
    }

    #[test]
    fn test_scenario_idle_player_runs_out_the_clock() {
        let mut state = started(1);
        for _ in 0..(130 * 60) {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if state.is_over() {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.tasks_collected, 0);
        let outcome = state.outcome().expect("run finished");
        assert_eq!(outcome.bonuses.completion, 0);
        assert_eq!(outcome.bonuses.total(), 0);
    }

    #[test]
    fn test_timeout_at_time_limit() {
        let mut state = started(1);
        state.pursuers.clear();

        for _ in 0..(119 * 60) {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Playing);

        for _ in 0..(2 * 60) {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        let outcome = state.outcome().expect("run finished");
        assert_eq!(outcome.reason, EndReason::Timeout);
        assert_eq!(outcome.time_remaining, 0);
        assert_eq!(outcome.final_score, 0);
    }

    #[test]
    fn test_scenario_perfect_clear() {
        let mut state = started(2);
        state.pursuers.clear();

        // Power-ups first so the run is still live when they are picked up
        let mut collectibles: Vec<_> = state.maze.remaining_collectibles().collect();
        collectibles.sort_by_key(|&p| state.maze.tile(p) == Tile::Task);
        assert_eq!(collectibles.len(), 185);
        for pos in collectibles {
            teleport(&mut state, pos);
            tick(&mut state, &TickInput::default(), SIM_DT);
        }

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.tasks_collected, state.total_tasks);
        assert_eq!(state.player.lives, 3);
        let outcome = state.outcome().expect("run finished");
        assert_eq!(outcome.reason, EndReason::Completed);
        assert_eq!(outcome.bonuses.perfect, 5000);
        assert_eq!(outcome.rating, Rating::S);
        let base = 181 * 10 + 4 * 50;
        assert_eq!(outcome.final_score, base + outcome.bonuses.total());
        assert!(outcome.final_score >= base + 1000 + 5000);
    }

    #[test]
    fn test_scenario_three_contacts_end_the_run() {
        let mut state = started(3);
        state.pursuers.truncate(1);

        for contact in 1..=3u8 {
            // Keep the pursuer away while the invincibility window runs out
            while state.player.invincible {
                state.pursuers[0].respawn();
                tick(&mut state, &TickInput::default(), SIM_DT);
            }
            let p = &mut state.pursuers[0];
            p.pos = state.player.pos;
            p.target = state.player.pos;
            p.visual = state.player.visual;
            tick(&mut state, &TickInput::default(), SIM_DT);
            assert_eq!(state.player.lives, 3 - contact);
        }

        assert_eq!(state.phase, GamePhase::GameOver);
        let outcome = state.outcome().expect("run finished");
        assert_eq!(outcome.reason, EndReason::OutOfLives);
        assert_eq!(outcome.lives_remaining, 0);
        assert_eq!(outcome.bonuses.completion, 0);
    }

    #[test]
    fn test_scenario_power_up_then_debug() {
        let mut state = started(4);
        teleport(&mut state, Position::new(1, 1));
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.power_up_active);
        let score = state.score;

        let spawn = state.pursuers[0].spawn;
        let p = &mut state.pursuers[0];
        p.pos = Position::new(1, 1);
        p.target = Position::new(1, 1);
        p.visual = tile_to_visual(Position::new(1, 1));
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.bugs_debugged, 1);
        assert_eq!(state.score, score + 200);
        assert_eq!(state.player.lives, 3);
        // Respawned this tick; the contact pass runs after movement
        assert_eq!(state.pursuers[0].pos, spawn);
        let id = state.pursuers[0].id;
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PursuerDebugged { id }));
    }

    #[test]
    fn test_frightened_until_expiry_then_schedule() {
        let mut state = started(5);
        teleport(&mut state, Position::new(19, 1));
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.power_up_active);

        loop {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if !state.power_up_active {
                break;
            }
            assert!(state.pursuers.iter().all(|p| p.mode == Mode::Frightened));
        }
        // ~7s in: first half of the cycle is chase
        assert!(state.pursuers.iter().all(|p| p.mode == Mode::Chase));
    }

    #[test]
    fn test_maze_tiles_consumed_only_by_player() {
        let mut state = started(6);
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        let remaining = state.maze.remaining_collectibles().count() as u32;
        assert_eq!(remaining + state.tasks_collected, 185);
        assert_eq!(state.maze.tile(Position::new(10, 12)), Tile::Empty);
    }

    #[test]
    fn test_idle_mode_collects_tasks() {
        let mut state = started(7);
        let input = TickInput { idle_mode: true, ..Default::default() };
        for _ in 0..(10 * 60) {
            tick(&mut state, &input, SIM_DT);
            if state.is_over() {
                break;
            }
        }
        assert!(state.tasks_collected > 0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = started(99999);
        let mut state2 = started(99999);

        let inputs = [
            TickInput { direction: Some(Direction::Left), ..Default::default() },
            TickInput { idle_mode: true, ..Default::default() },
            TickInput { direction: Some(Direction::Up), ..Default::default() },
            TickInput::default(),
        ];

        for _ in 0..300 {
            for input in &inputs {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        assert_eq!(state1.elapsed, state2.elapsed);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.player.visual, state2.player.visual);
        for (a, b) in state1.pursuers.iter().zip(&state2.pursuers) {
            assert_eq!(a.visual, b.visual);
            assert_eq!(a.direction, b.direction);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_tasks_never_exceed_total(seed in any::<u64>(), steps in 1usize..600) {
            let mut state = started(seed);
            let input = TickInput { idle_mode: true, ..Default::default() };
            for _ in 0..steps {
                tick(&mut state, &input, SIM_DT);
            }
            prop_assert!(state.tasks_collected <= state.total_tasks);
            prop_assert!(state.player.lives <= 3);
        }

        #[test]
        fn prop_invincible_player_never_loses_lives(seed in any::<u64>(), steps in 1usize..100) {
            let mut state = started(seed);
            state.player.invincible = true;
            state.player.invincible_remaining = 1000.0;
            for _ in 0..steps {
                tick(&mut state, &TickInput::default(), SIM_DT);
            }
            prop_assert_eq!(state.player.lives, 3);
        }
    }
}
