// src/maze/mod.rs
pub mod difficulty;
pub mod generator;
pub mod grid;
pub mod session;
pub mod solver;

pub use difficulty::{bend_ratio, check_difficulty, count_bends, max_bend_ratio, DifficultyController, GenerationReport};
pub use generator::{Backtrack, OriginShiftGenerator};
pub use grid::{Cell, Grid, Position, Walls};
pub use session::MazeSession;
pub use solver::{solve, Solution};

use serde::{Deserialize, Serialize};

/// Side length of one cell in SVG user units.
pub const CELL_SIZE: u32 = 10;
/// Grid dimension used when nothing else is requested.
pub const DEFAULT_DIMENSION: usize = 20;
/// Bend-ratio threshold used when nothing else is requested.
pub const DEFAULT_DIFFICULTY: f64 = 0.4;

/// The four sides of a cell, and the four moves between neighbouring cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Neighbour order used while carving.
    pub const CARVE_ORDER: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Neighbour order used while solving.
    pub const SOLVE_ORDER: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Row and column delta of a single step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// Orientation of one step along a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Classifies the step `from -> to`; any column change counts as horizontal.
    pub fn of_step(from: Position, to: Position) -> Orientation {
        if from.col != to.col {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for dir in Direction::SOLVE_ORDER {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dr, dc) = dir.delta();
            let (or, oc) = dir.opposite().delta();
            assert_eq!((dr + or, dc + oc), (0, 0));
        }
    }

    #[test]
    fn test_orientation_of_step() {
        let a = Position::new(2, 2);
        assert_eq!(Orientation::of_step(a, Position::new(2, 3)), Orientation::Horizontal);
        assert_eq!(Orientation::of_step(a, Position::new(1, 2)), Orientation::Vertical);
    }
}
