// src/maze/grid.rs

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, MazeResult};
use crate::maze::Direction;

/// A cell coordinate; rows grow downward, columns grow rightward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Wall flags of a single cell. `true` means the wall is standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Default for Walls {
    fn default() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }
}

impl Walls {
    pub fn get(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.top,
            Direction::Right => self.right,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
        }
    }

    pub fn is_open(&self, dir: Direction) -> bool {
        !self.get(dir)
    }

    fn clear(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.top = false,
            Direction::Right => self.right = false,
            Direction::Down => self.bottom = false,
            Direction::Left => self.left = false,
        }
    }

    /// Number of walls still standing.
    pub fn closed_count(&self) -> usize {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .filter(|w| **w)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub walls: Walls,
    /// Only meaningful while the generator is carving.
    pub visited: bool,
}

impl Cell {
    fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            walls: Walls::default(),
            visited: false,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

/// An N×N grid of cells stored row-major.
///
/// A fresh grid has every wall closed except the entrance (top and left of
/// `(0, 0)`) and the exit (bottom and right of `(N-1, N-1)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dimension: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocates a closed grid with the entrance and exit opened.
    pub fn new(dimension: usize) -> MazeResult<Self> {
        if dimension < 1 {
            return Err(MazeError::InvalidDimension(dimension as i64));
        }

        let mut cells = Vec::with_capacity(dimension * dimension);
        for row in 0..dimension {
            for col in 0..dimension {
                cells.push(Cell::new(row, col));
            }
        }

        let mut grid = Grid { dimension, cells };
        let entrance = grid.entrance();
        let exit = grid.exit();
        {
            let walls = &mut grid.cell_mut(entrance).walls;
            walls.top = false;
            walls.left = false;
        }
        {
            let walls = &mut grid.cell_mut(exit).walls;
            walls.bottom = false;
            walls.right = false;
        }
        Ok(grid)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn entrance(&self) -> Position {
        Position::new(0, 0)
    }

    pub fn exit(&self) -> Position {
        Position::new(self.dimension - 1, self.dimension - 1)
    }

    pub fn index(&self, pos: Position) -> usize {
        pos.row * self.dimension + pos.col
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.dimension && pos.col < self.dimension
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[self.index(pos)]
    }

    pub(crate) fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        let idx = self.index(pos);
        &mut self.cells[idx]
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// The in-bounds cell one step away in `dir`, if any.
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Option<Position> {
        let (dr, dc) = dir.delta();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        let next = Position::new(row, col);
        self.contains(next).then_some(next)
    }

    /// True when the `dir` side of `pos` lies on the outer edge of the grid.
    pub fn is_boundary(&self, pos: Position, dir: Direction) -> bool {
        self.neighbor(pos, dir).is_none()
    }

    /// Opens the wall of `from` facing `dir` together with the mirrored wall
    /// of `to`. This is the only way walls between cells get removed.
    pub fn open_wall_between(&mut self, from: Position, to: Position, dir: Direction) {
        debug_assert_eq!(self.neighbor(from, dir), Some(to), "{to:?} is not {dir:?} of {from:?}");
        self.cell_mut(from).walls.clear(dir);
        self.cell_mut(to).walls.clear(dir.opposite());
    }

    pub(crate) fn mark_visited(&mut self, pos: Position) {
        self.cell_mut(pos).visited = true;
    }

    pub(crate) fn is_visited(&self, pos: Position) -> bool {
        self.cell(pos).visited
    }

    pub(crate) fn clear_visited(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
        }
    }

    /// In-bounds neighbours reachable through an open wall.
    pub fn open_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        let walls = self.cell(pos).walls;
        Direction::SOLVE_ORDER
            .into_iter()
            .filter(move |dir| walls.is_open(*dir))
            .filter_map(move |dir| self.neighbor(pos, dir))
    }

    /// Number of closed wall flags across all cells (shared walls count twice).
    pub fn closed_wall_count(&self) -> usize {
        self.cells.iter().map(|c| c.walls.closed_count()).sum()
    }

    /// Number of open walls between two in-bounds cells.
    pub fn passage_count(&self) -> usize {
        self.cells
            .iter()
            .map(|c| {
                let pos = c.position();
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter(|dir| c.walls.is_open(*dir) && self.neighbor(pos, *dir).is_some())
                    .count()
            })
            .sum()
    }

    /// Every pair of adjacent cells agrees on the wall between them.
    pub fn walls_consistent(&self) -> bool {
        self.cells.iter().all(|c| {
            let pos = c.position();
            Direction::SOLVE_ORDER.into_iter().all(|dir| match self.neighbor(pos, dir) {
                Some(next) => c.walls.get(dir) == self.cell(next).walls.get(dir.opposite()),
                None => true,
            })
        })
    }

    /// Connected with exactly N²-1 passages, i.e. a spanning tree.
    pub fn is_perfect(&self) -> bool {
        if !self.walls_consistent() || self.passage_count() != self.cell_count() - 1 {
            return false;
        }

        let mut seen = vec![false; self.cell_count()];
        let mut queue = VecDeque::from([self.entrance()]);
        seen[self.index(self.entrance())] = true;
        let mut reached = 1;
        while let Some(pos) = queue.pop_front() {
            for next in self.open_neighbors(pos) {
                let idx = self.index(next);
                if !seen[idx] {
                    seen[idx] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }
        reached == self.cell_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(Grid::new(0), Err(MazeError::InvalidDimension(0))));
    }

    #[test]
    fn test_new_grid_is_closed_except_entrance_and_exit() {
        let grid = Grid::new(3).unwrap();
        assert_eq!(grid.cell_count(), 9);
        assert_eq!(grid.passage_count(), 0);
        assert_eq!(grid.closed_wall_count(), 9 * 4 - 4);

        let entrance = grid.cell(grid.entrance()).walls;
        assert!(!entrance.top && !entrance.left);
        assert!(entrance.right && entrance.bottom);

        let exit = grid.cell(grid.exit()).walls;
        assert!(!exit.bottom && !exit.right);
        assert!(exit.top && exit.left);

        assert!(grid.cells().all(|c| !c.visited));
    }

    #[test]
    fn test_single_cell_grid() {
        let grid = Grid::new(1).unwrap();
        let walls = grid.cell(Position::new(0, 0)).walls;
        assert_eq!(walls.closed_count(), 0);
        assert_eq!(grid.passage_count(), 0);
        assert!(grid.is_perfect());
    }

    #[test]
    fn test_open_wall_between_is_symmetric() {
        let mut grid = Grid::new(3).unwrap();
        let a = Position::new(1, 1);
        let b = Position::new(1, 2);
        grid.open_wall_between(a, b, Direction::Right);
        assert!(!grid.cell(a).walls.right);
        assert!(!grid.cell(b).walls.left);
        assert!(grid.walls_consistent());
        assert_eq!(grid.passage_count(), 1);

        let c = Position::new(0, 1);
        grid.open_wall_between(a, c, Direction::Up);
        assert!(!grid.cell(a).walls.top);
        assert!(!grid.cell(c).walls.bottom);
        assert!(grid.walls_consistent());
    }

    #[test]
    fn test_neighbor_respects_bounds() {
        let grid = Grid::new(2).unwrap();
        let origin = Position::new(0, 0);
        assert_eq!(grid.neighbor(origin, Direction::Up), None);
        assert_eq!(grid.neighbor(origin, Direction::Left), None);
        assert_eq!(grid.neighbor(origin, Direction::Right), Some(Position::new(0, 1)));
        assert_eq!(grid.neighbor(origin, Direction::Down), Some(Position::new(1, 0)));
        assert!(grid.is_boundary(Position::new(1, 1), Direction::Down));
        assert!(!grid.is_boundary(Position::new(1, 1), Direction::Up));
    }

    #[test]
    fn test_open_neighbors_ignore_exterior_openings() {
        let grid = Grid::new(2).unwrap();
        // Entrance walls are open to the outside, which is not a neighbour.
        assert_eq!(grid.open_neighbors(grid.entrance()).count(), 0);
    }

    #[test]
    fn test_cycle_is_not_perfect() {
        let mut grid = Grid::new(2).unwrap();
        let (a, b, c, d) = (
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(1, 1),
            Position::new(1, 0),
        );
        grid.open_wall_between(a, b, Direction::Right);
        grid.open_wall_between(b, c, Direction::Down);
        grid.open_wall_between(c, d, Direction::Left);
        assert!(grid.is_perfect());
        grid.open_wall_between(d, a, Direction::Up);
        assert!(!grid.is_perfect());
    }
}
