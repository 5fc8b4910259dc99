//! Game state and core simulation types
//!
//! One `GameState` is one run. The host owns it exclusively and advances it
//! through `tick`; nothing in here schedules work on its own.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::maze::{Direction, Maze, Position};
use super::score::GameOutcome;
use crate::consts::*;
use crate::tile_to_visual;
use crate::tuning::Tuning;

/// Seed used by `GameState::default()`
pub const DEFAULT_SEED: u64 = 0x5EED_B075;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh session waiting for the host to start it
    Ready,
    /// Active gameplay
    Playing,
    /// Frozen; ticks are ignored
    Paused,
    /// Run ended (terminal)
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Every task collected
    Completed,
    /// Time limit reached
    Timeout,
    /// Lives exhausted
    OutOfLives,
}

/// A pursuer's fixed movement strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Personality {
    /// Heads straight for the player
    Chaser,
    /// Aims a few tiles ahead of the player
    Ambusher,
    /// Chases when close, wanders otherwise
    Random,
    /// Chases when very close, otherwise returns to its patrol tile
    Patroller,
}

impl Personality {
    /// Scatter-mode home corner (before nearest-walkable resolution)
    pub fn scatter_corner(self) -> Position {
        match self {
            Personality::Chaser => Position::new(MAZE_WIDTH - 2, 1),
            Personality::Ambusher => Position::new(1, 1),
            Personality::Random => Position::new(1, MAZE_HEIGHT - 2),
            Personality::Patroller => Position::new(MAZE_WIDTH - 2, MAZE_HEIGHT - 2),
        }
    }
}

/// Pursuer behavioural phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Chase,
    Scatter,
    Frightened,
}

/// Spawn layout for the four pursuers: (personality, tile, initial direction)
pub const PURSUER_SPAWNS: [(Personality, (i32, i32), Direction); 4] = [
    (Personality::Chaser, (9, 7), Direction::Left),
    (Personality::Ambusher, (11, 7), Direction::Right),
    (Personality::Random, (8, 7), Direction::Left),
    (Personality::Patroller, (12, 7), Direction::Right),
];

/// The player-controlled runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Authoritative tile for pickups
    pub pos: Position,
    /// Tile currently being moved toward
    pub target: Position,
    /// Smoothed render position (tile units)
    pub visual: Vec2,
    /// Current heading; `None` when stopped
    pub direction: Option<Direction>,
    /// Buffered turn, taken at the next tile where it is possible
    pub next_direction: Option<Direction>,
    pub lives: u8,
    pub invincible: bool,
    pub invincible_remaining: f32,
    /// Tiles per second
    pub speed: f32,
}

impl Player {
    pub fn new(spawn: Position, lives: u8, speed: f32) -> Self {
        Self {
            pos: spawn,
            target: spawn,
            visual: tile_to_visual(spawn),
            direction: None,
            next_direction: None,
            lives,
            invincible: false,
            invincible_remaining: 0.0,
            speed,
        }
    }

    /// Put the player back on `spawn`, stopped, keeping lives and timers
    pub fn respawn(&mut self, spawn: Position) {
        self.pos = spawn;
        self.target = spawn;
        self.visual = tile_to_visual(spawn);
        self.direction = None;
        self.next_direction = None;
    }

    /// Whether the visual position has reached the target tile
    pub fn at_target(&self) -> bool {
        self.visual == tile_to_visual(self.target)
    }
}

/// An AI-controlled pursuer ("bug")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pursuer {
    pub id: u32,
    pub personality: Personality,
    /// Last computed mode (for rendering); recomputed every tick
    pub mode: Mode,
    pub pos: Position,
    pub target: Position,
    pub visual: Vec2,
    pub direction: Direction,
    /// Heading before the most recent decision
    pub prev_direction: Direction,
    pub spawn: Position,
    pub spawn_direction: Direction,
    /// Tiles per second (base speed times the global multiplier)
    pub speed: f32,
}

impl Pursuer {
    pub fn new(
        id: u32,
        personality: Personality,
        spawn: Position,
        direction: Direction,
        speed: f32,
    ) -> Self {
        Self {
            id,
            personality,
            mode: Mode::Scatter,
            pos: spawn,
            target: spawn,
            visual: tile_to_visual(spawn),
            direction,
            prev_direction: direction,
            spawn,
            spawn_direction: direction,
            speed,
        }
    }

    /// Return to the spawn tile. All three positions move together so the
    /// renderer never interpolates across the board.
    pub fn respawn(&mut self) {
        self.pos = self.spawn;
        self.target = self.spawn;
        self.visual = tile_to_visual(self.spawn);
        self.direction = self.spawn_direction;
        self.prev_direction = self.spawn_direction;
        self.mode = Mode::Scatter;
    }

    pub fn at_target(&self) -> bool {
        self.visual == tile_to_visual(self.target)
    }
}

/// Notable things that happened during a tick, for audio/particles/UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    TaskCollected { pos: Position },
    PowerUpCollected { pos: Position },
    PowerUpExpired,
    PursuerDebugged { id: u32 },
    LifeLost { lives_remaining: u8 },
    GameOver(GameOutcome),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance values this run was created with
    pub tuning: Tuning,
    pub maze: Maze,
    /// Task count of the authored layout
    pub total_tasks: u32,
    pub player: Player,
    /// Sorted by id; collisions are resolved in this order
    pub pursuers: Vec<Pursuer>,
    pub score: u64,
    pub tasks_collected: u32,
    pub bugs_debugged: u32,
    pub power_up_active: bool,
    pub power_up_remaining: f32,
    /// Seconds of play (only advances while ticking)
    pub elapsed: f32,
    pub time_limit: f32,
    pub phase: GamePhase,
    /// Random source for wandering/frightened movement
    pub rng: Pcg32,
    /// Pending events since the last drain
    pub events: Vec<GameEvent>,
    /// Set once when the run ends
    pub outcome: Option<GameOutcome>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl GameState {
    /// Create a fresh session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a fresh session with explicit tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let maze = Maze::default();
        let total_tasks = maze.count_tasks();
        let player = Player::new(
            PLAYER_SPAWN.into(),
            tuning.starting_lives,
            tuning.player_speed,
        );
        let pursuers = PURSUER_SPAWNS
            .iter()
            .enumerate()
            .map(|(i, &(personality, spawn, dir))| {
                Pursuer::new(
                    i as u32 + 1,
                    personality,
                    spawn.into(),
                    dir,
                    tuning.pursuer_base_speed,
                )
            })
            .collect();

        log::info!("New session (seed {seed}, {total_tasks} tasks)");

        Self {
            seed,
            time_limit: tuning.time_limit_secs,
            tuning,
            maze,
            total_tasks,
            player,
            pursuers,
            score: 0,
            tasks_collected: 0,
            bugs_debugged: 0,
            power_up_active: false,
            power_up_remaining: 0.0,
            elapsed: 0.0,
            phase: GamePhase::Ready,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            outcome: None,
        }
    }

    /// Buffer a direction change for the player
    pub fn queue_direction(&mut self, dir: Direction) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.player.next_direction = Some(dir);
    }

    /// Ready -> Playing
    pub fn start(&mut self) {
        if self.phase == GamePhase::Ready {
            log::info!("Run started");
            self.phase = GamePhase::Playing;
        }
    }

    /// Playing -> Paused
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
        }
    }

    /// Paused -> Playing
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Seconds left before the time limit
    pub fn time_remaining(&self) -> f32 {
        (self.time_limit - self.elapsed).max(0.0)
    }

    /// Fraction of tasks collected (0.0 - 1.0)
    pub fn task_progress(&self) -> f32 {
        if self.total_tasks == 0 {
            return 1.0;
        }
        self.tasks_collected as f32 / self.total_tasks as f32
    }

    /// Final result, available once the phase is `GameOver`
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.player.pos, Position::new(10, 12));
        assert_eq!(state.pursuers.len(), 4);
        assert_eq!(state.total_tasks, 181);
        assert_eq!(state.time_remaining(), 120.0);
        assert!(state.outcome().is_none());
    }

    #[test]
    fn test_spawns_are_walkable_and_distinct() {
        let state = GameState::default();
        let maze = &state.maze;
        assert!(maze.is_walkable(state.player.pos.x, state.player.pos.y));
        for (i, p) in state.pursuers.iter().enumerate() {
            assert!(maze.is_walkable(p.pos.x, p.pos.y));
            assert_eq!(p.id, i as u32 + 1);
            for q in &state.pursuers[i + 1..] {
                assert_ne!(p.spawn, q.spawn);
            }
        }
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = GameState::new(1);
        state.pause();
        assert_eq!(state.phase, GamePhase::Ready);

        state.start();
        assert_eq!(state.phase, GamePhase::Playing);
        state.pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.resume();
        assert_eq!(state.phase, GamePhase::Playing);

        state.phase = GamePhase::GameOver;
        state.start();
        state.resume();
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_queue_direction_ignored_after_game_over() {
        let mut state = GameState::new(1);
        state.queue_direction(Direction::Left);
        assert_eq!(state.player.next_direction, Some(Direction::Left));

        state.player.next_direction = None;
        state.phase = GamePhase::GameOver;
        state.queue_direction(Direction::Up);
        assert_eq!(state.player.next_direction, None);
    }

    #[test]
    fn test_pursuer_respawn_resets_everything() {
        let mut p = Pursuer::new(1, Personality::Chaser, Position::new(9, 7), Direction::Left, 4.0);
        p.pos = Position::new(3, 3);
        p.target = Position::new(3, 4);
        p.visual = Vec2::new(3.0, 3.4);
        p.direction = Direction::Down;
        p.mode = Mode::Frightened;

        p.respawn();
        assert_eq!(p.pos, p.spawn);
        assert_eq!(p.target, p.spawn);
        assert_eq!(p.visual, Vec2::new(9.0, 7.0));
        assert_eq!(p.direction, Direction::Left);
        assert_eq!(p.mode, Mode::Scatter);
    }

    #[test]
    fn test_drain_events() {
        let mut state = GameState::new(1);
        state.events.push(GameEvent::PowerUpExpired);
        assert_eq!(state.drain_events(), vec![GameEvent::PowerUpExpired]);
        assert!(state.drain_events().is_empty());
    }
}
