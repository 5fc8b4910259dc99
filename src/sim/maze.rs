//! Maze grid and tile semantics
//!
//! The layout is authored at compile time. At runtime the only mutation is a
//! collectible tile turning into `Empty`, which is driven by the collision
//! step rather than by the maze itself.

use serde::{Deserialize, Serialize};

use crate::consts::{MAZE_HEIGHT, MAZE_WIDTH, TUNNEL_ROWS};

/// Authored layout: `#` wall, `.` task, `o` power-up, space empty.
///
/// Rows 9 and 13 are open at both ends and wrap around horizontally.
pub const LAYOUT: [&str; MAZE_HEIGHT as usize] = [
    "#####################",
    "#o........#........o#",
    "#.##.####.#.####.##.#",
    "#...................#",
    "#.##.#.#######.#.##.#",
    "#....#....#....#....#",
    "####.####.#.####.####",
    "####.#.........#.####",
    "####.#.#######.#.####",
    "    ...#######...    ",
    "####.#.#######.#.####",
    "####.#.#######.#.####",
    "####.#.... ....#.####",
    "    .#.##.#.##.#.    ",
    "####.#.##.#.##.#.####",
    "#....#....#....#....#",
    "#.##.#.#######.#.##.#",
    "#...................#",
    "#.##.####.#.####.##.#",
    "#o........#........o#",
    "#####################",
];

/// What occupies a single maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    /// Collectible worth points; counts toward completion
    Task,
    /// Collectible that makes pursuers vulnerable for a while
    PowerUp,
    Empty,
}

impl Tile {
    fn from_layout(c: u8) -> Self {
        match c {
            b'#' => Tile::Wall,
            b'.' => Tile::Task,
            b'o' => Tile::PowerUp,
            _ => Tile::Empty,
        }
    }

    pub fn is_collectible(self) -> bool {
        matches!(self, Tile::Task | Tile::PowerUp)
    }
}

/// Integer tile coordinates. Signed so that off-grid projections can be
/// represented before they are clamped or wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent tile in `dir` (no wrapping)
    pub fn step(self, dir: Direction) -> Self {
        self.offset(dir, 1)
    }

    /// `distance` tiles along `dir` (no wrapping)
    pub fn offset(self, dir: Direction, distance: i32) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx * distance, self.y + dy * distance)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Cardinal movement direction (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Stable enumeration order used for neighbour lists and tie-breaking
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// The maze grid (row-major)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maze {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    /// Task count of the authored layout, fixed at construction
    total_tasks: u32,
}

impl Default for Maze {
    fn default() -> Self {
        Self::from_layout(&LAYOUT)
    }
}

impl Maze {
    /// Build a maze from text rows. Short rows are padded with walls.
    pub fn from_layout(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as i32;
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for row in rows {
            let bytes = row.as_bytes();
            for x in 0..width as usize {
                tiles.push(bytes.get(x).map_or(Tile::Wall, |&c| Tile::from_layout(c)));
            }
        }
        let total_tasks = tiles.iter().filter(|&&t| t == Tile::Task).count() as u32;

        Self {
            width,
            height,
            tiles,
            total_tasks,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Row-major tile snapshot for rendering
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    /// Tile at `pos`; anything off-grid reads as a wall
    pub fn tile(&self, pos: Position) -> Tile {
        self.index(pos).map_or(Tile::Wall, |i| self.tiles[i])
    }

    /// Overwrite a tile. Off-grid writes are ignored.
    pub fn set_tile(&mut self, pos: Position, tile: Tile) {
        if let Some(i) = self.index(pos) {
            self.tiles[i] = tile;
        }
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.tile(Position::new(x, y)) != Tile::Wall
    }

    pub fn is_tunnel_row(&self, y: i32) -> bool {
        self.height == MAZE_HEIGHT && self.width == MAZE_WIDTH && TUNNEL_ROWS.contains(&y)
    }

    /// Apply horizontal wraparound on tunnel rows. Positions on any other row
    /// are returned unchanged, even when out of bounds.
    pub fn wrap(&self, pos: Position) -> Position {
        if self.is_tunnel_row(pos.y) && (pos.x < 0 || pos.x >= self.width) {
            Position::new(pos.x.rem_euclid(self.width), pos.y)
        } else {
            pos
        }
    }

    /// Walkable cardinal neighbours of `pos` in `Direction::ALL` order
    pub fn neighbors(&self, pos: Position) -> Vec<(Direction, Position)> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| {
                let next = self.wrap(pos.step(dir));
                self.is_walkable(next.x, next.y).then_some((dir, next))
            })
            .collect()
    }

    /// Number of tasks in the authored layout
    pub fn count_tasks(&self) -> u32 {
        self.total_tasks
    }

    /// Collectibles still present on the grid
    pub fn remaining_collectibles(&self) -> impl Iterator<Item = Position> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_collectible())
            .map(|(i, _)| {
                let i = i as i32;
                Position::new(i % self.width, i / self.width)
            })
    }

    /// Geometric centre of the grid
    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Clamp `(x, y)` onto the grid and, if that lands on a wall, search
    /// outward in square rings for the closest walkable tile.
    pub fn nearest_walkable(&self, x: i32, y: i32) -> Position {
        let origin = Position::new(
            x.clamp(0, (self.width - 1).max(0)),
            y.clamp(0, (self.height - 1).max(0)),
        );
        if self.is_walkable(origin.x, origin.y) {
            return origin;
        }

        let max_ring = self.width.max(self.height);
        for r in 1..=max_ring {
            let mut best: Option<(i32, Position)> = None;
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx.abs() != r && dy.abs() != r {
                        continue;
                    }
                    let candidate = Position::new(origin.x + dx, origin.y + dy);
                    if !self.is_walkable(candidate.x, candidate.y) {
                        continue;
                    }
                    let dist = dx.abs() + dy.abs();
                    if best.is_none_or(|(d, _)| dist < d) {
                        best = Some((dist, candidate));
                    }
                }
            }
            if let Some((_, pos)) = best {
                return pos;
            }
        }

        self.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_layout_dimensions() {
        let maze = Maze::default();
        assert_eq!(maze.width(), MAZE_WIDTH);
        assert_eq!(maze.height(), MAZE_HEIGHT);
        assert_eq!(maze.tiles().len(), (MAZE_WIDTH * MAZE_HEIGHT) as usize);
    }

    #[test]
    fn test_perimeter_is_wall_except_tunnels() {
        let maze = Maze::default();
        for x in 0..maze.width() {
            assert_eq!(maze.tile(Position::new(x, 0)), Tile::Wall);
            assert_eq!(maze.tile(Position::new(x, maze.height() - 1)), Tile::Wall);
        }
        for y in 0..maze.height() {
            let open = maze.is_tunnel_row(y);
            assert_eq!(maze.is_walkable(0, y), open, "left edge row {y}");
            assert_eq!(maze.is_walkable(maze.width() - 1, y), open, "right edge row {y}");
        }
    }

    #[test]
    fn test_task_count_fixed_after_mutation() {
        let mut maze = Maze::default();
        let total = maze.count_tasks();
        assert_eq!(total, 181);

        maze.set_tile(Position::new(1, 3), Tile::Empty);
        maze.set_tile(Position::new(2, 3), Tile::Empty);
        assert_eq!(maze.count_tasks(), total);
    }

    #[test]
    fn test_wrap_only_on_tunnel_rows() {
        let maze = Maze::default();
        assert_eq!(maze.wrap(Position::new(-1, 9)), Position::new(20, 9));
        assert_eq!(maze.wrap(Position::new(21, 13)), Position::new(0, 13));
        // Not a tunnel row: unchanged and invalid
        let outside = Position::new(-1, 3);
        assert_eq!(maze.wrap(outside), outside);
        assert!(!maze.is_walkable(outside.x, outside.y));
    }

    #[test]
    fn test_neighbors_wrap_through_tunnel() {
        let maze = Maze::default();
        let edge = Position::new(0, 9);
        let neighbors = maze.neighbors(edge);
        assert!(neighbors.contains(&(Direction::Left, Position::new(20, 9))));
        assert!(neighbors.contains(&(Direction::Right, Position::new(1, 9))));
        assert_eq!(neighbors.len(), 2);
    }

    #[test]
    fn test_neighbors_order_and_walls() {
        let maze = Maze::default();
        // Top-left corner: only Down and Right are open
        let n = maze.neighbors(Position::new(1, 1));
        let dirs: Vec<_> = n.iter().map(|(d, _)| *d).collect();
        assert_eq!(dirs, vec![Direction::Down, Direction::Right]);
    }

    #[test]
    fn test_nearest_walkable() {
        let maze = Maze::default();
        // Already walkable
        assert_eq!(maze.nearest_walkable(1, 1), Position::new(1, 1));
        // Off-grid clamps to corner wall, then ring search finds (1, 1)
        assert_eq!(maze.nearest_walkable(-5, -5), Position::new(1, 1));
        // Centre block of walls
        let pos = maze.nearest_walkable(10, 10);
        assert!(maze.is_walkable(pos.x, pos.y));
        assert!(crate::manhattan(pos, Position::new(10, 10)) <= 4);
    }

    #[test]
    fn test_nearest_walkable_all_walls_falls_back_to_center() {
        let maze = Maze::from_layout(&["###", "###", "###"]);
        assert_eq!(maze.nearest_walkable(0, 0), Position::new(1, 1));
    }

    #[test]
    fn test_remaining_collectibles() {
        let mut maze = Maze::default();
        assert_eq!(maze.remaining_collectibles().count(), 185);
        maze.set_tile(Position::new(1, 1), Tile::Empty);
        assert_eq!(maze.remaining_collectibles().count(), 184);
    }

    proptest! {
        #[test]
        fn prop_walkable_iff_in_bounds_and_not_wall(x in -5i32..26, y in -5i32..26) {
            let maze = Maze::default();
            let pos = Position::new(x, y);
            let expected = maze.in_bounds(pos) && maze.tile(pos) != Tile::Wall;
            prop_assert_eq!(maze.is_walkable(x, y), expected);
        }

        #[test]
        fn prop_wrap_changes_only_tunnel_rows(x in -3i32..24, y in 0i32..21) {
            let maze = Maze::default();
            let pos = Position::new(x, y);
            let wrapped = maze.wrap(pos);
            if wrapped != pos {
                prop_assert!(TUNNEL_ROWS.contains(&y));
                prop_assert!(maze.in_bounds(wrapped));
            }
        }
    }
}
