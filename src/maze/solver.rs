// src/maze/solver.rs

use log::debug;

use crate::error::{MazeError, MazeResult};
use crate::maze::difficulty::count_bends;
use crate::maze::grid::{Grid, Position};
use crate::maze::Direction;

/// The ordered cells from the entrance to the exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    path: Vec<Position>,
}

impl Solution {
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Number of cells on the path, endpoints included.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of places where the path switches between horizontal and vertical.
    pub fn bends(&self) -> usize {
        count_bends(&self.path)
    }
}

/// Depth-first search from the entrance to the exit.
///
/// Neighbours are tried in the order up, right, down, left, and only through
/// open walls. The recursion is unrolled onto an explicit stack of
/// `(cell, next direction to try)` frames, so the frames on the stack are
/// exactly the current path.
pub fn solve(grid: &Grid) -> MazeResult<Solution> {
    let start = grid.entrance();
    let exit = grid.exit();
    if start == exit {
        return Ok(Solution { path: vec![start] });
    }

    let mut visited = vec![false; grid.cell_count()];
    visited[grid.index(start)] = true;
    let mut stack: Vec<(Position, usize)> = vec![(start, 0)];
    let mut expanded = 1usize;

    while let Some(frame) = stack.last_mut() {
        let (pos, next_dir) = *frame;
        let Some(&dir) = Direction::SOLVE_ORDER.get(next_dir) else {
            stack.pop();
            continue;
        };
        frame.1 += 1;

        if !grid.cell(pos).walls.is_open(dir) {
            continue;
        }
        let Some(next) = grid.neighbor(pos, dir) else {
            continue;
        };
        let idx = grid.index(next);
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        expanded += 1;

        if next == exit {
            let mut path: Vec<Position> = stack.iter().map(|(p, _)| *p).collect();
            path.push(next);
            debug!("solved in {} expansions, path length {}", expanded, path.len());
            return Ok(Solution { path });
        }
        stack.push((next, 0));
    }

    Err(MazeError::NoSolutionFound {
        dimension: grid.dimension(),
    })
}
