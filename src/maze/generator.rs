// src/maze/generator.rs

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::MazeResult;
use crate::maze::grid::{Grid, Position};
use crate::maze::Direction;

/// How the carver picks a new cursor after walking into a dead end.
///
/// Both strategies produce perfect mazes, but they draw from different
/// distributions: the same seed gives a different maze under each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backtrack {
    /// Rescan the grid row-major for the first visited cell that still has
    /// an unvisited neighbour. O(N²) per dead end.
    #[default]
    Rescan,
    /// Pop a stack of visited cells until the top has an unvisited neighbour.
    Frontier,
}

impl std::str::FromStr for Backtrack {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rescan" => Ok(Backtrack::Rescan),
            "frontier" => Ok(Backtrack::Frontier),
            other => Err(format!("unknown backtrack strategy '{other}' (expected rescan or frontier)")),
        }
    }
}

/// Random-walk carver with origin shifting on dead ends.
///
/// Starting at the entrance, the cursor walks to a uniformly chosen unvisited
/// neighbour, opening the wall it crosses. When it has nowhere to go, the
/// cursor shifts to another visited cell on the frontier. The walk stops once
/// every cell has been visited, so the opened walls form a spanning tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct OriginShiftGenerator {
    backtrack: Backtrack,
}

impl OriginShiftGenerator {
    pub fn new(backtrack: Backtrack) -> Self {
        Self { backtrack }
    }

    /// Builds a fresh grid and carves a perfect maze into it.
    pub fn generate<R: Rng + ?Sized>(&self, dimension: usize, rng: &mut R) -> MazeResult<Grid> {
        let mut grid = Grid::new(dimension)?;
        match self.backtrack {
            Backtrack::Rescan => carve_rescan(&mut grid, rng),
            Backtrack::Frontier => carve_frontier(&mut grid, rng),
        }
        grid.clear_visited();
        debug!(
            "carved {}x{} maze with {} passages ({:?} backtracking)",
            dimension,
            dimension,
            grid.passage_count(),
            self.backtrack
        );
        Ok(grid)
    }
}

/// Unvisited in-bounds neighbours of `pos`, in carving order.
fn unvisited_neighbors(grid: &Grid, pos: Position) -> Vec<(Position, Direction)> {
    Direction::CARVE_ORDER
        .into_iter()
        .filter_map(|dir| grid.neighbor(pos, dir).map(|next| (next, dir)))
        .filter(|(next, _)| !grid.is_visited(*next))
        .collect()
}

fn has_unvisited_neighbor(grid: &Grid, pos: Position) -> bool {
    Direction::CARVE_ORDER
        .into_iter()
        .filter_map(|dir| grid.neighbor(pos, dir))
        .any(|next| !grid.is_visited(next))
}

/// Opens the wall to a random unvisited neighbour and returns it, or `None`
/// at a dead end.
fn step<R: Rng + ?Sized>(grid: &mut Grid, current: Position, rng: &mut R) -> Option<Position> {
    let candidates = unvisited_neighbors(grid, current);
    let &(next, dir) = candidates.choose(rng)?;
    grid.open_wall_between(current, next, dir);
    grid.mark_visited(next);
    Some(next)
}

fn carve_rescan<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let total = grid.cell_count();
    let mut current = grid.entrance();
    grid.mark_visited(current);
    let mut visited = 1;

    while visited < total {
        if let Some(next) = step(grid, current, rng) {
            current = next;
            visited += 1;
            continue;
        }

        let restart = grid
            .cells()
            .map(|c| c.position())
            .find(|pos| grid.is_visited(*pos) && has_unvisited_neighbor(grid, *pos));
        match restart {
            Some(pos) => current = pos,
            // A connected grid always has a frontier while cells remain.
            None => break,
        }
    }
}

fn carve_frontier<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let total = grid.cell_count();
    let start = grid.entrance();
    grid.mark_visited(start);
    let mut visited = 1;
    let mut stack = vec![start];

    while visited < total {
        let Some(&current) = stack.last() else {
            break;
        };
        match step(grid, current, rng) {
            Some(next) => {
                stack.push(next);
                visited += 1;
            }
            None => {
                stack.pop();
            }
        }
    }
}
