// src/render/segments.rs

use log::info;

use crate::maze::{Direction, Grid, Solution};
use crate::utils::geometry::{Line2D, Point2D};

/// One closed wall, in grid units scaled by the cell size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSegment {
    pub line: Line2D,
    /// The wall sits on the outer edge of the grid and is drawn heavier.
    pub boundary: bool,
}

/// Closed walls of every cell, row-major, each cell emitting top, right,
/// bottom and left in that order. Shared walls appear once per cell that
/// has them closed.
pub fn wall_segments(grid: &Grid, cell_size: f64) -> Vec<WallSegment> {
    let mut segments = Vec::with_capacity(grid.closed_wall_count());
    for cell in grid.cells() {
        let pos = cell.position();
        let x = pos.col as f64 * cell_size;
        let y = pos.row as f64 * cell_size;
        let top_left = Point2D::new(x, y);
        let top_right = Point2D::new(x + cell_size, y);
        let bottom_right = Point2D::new(x + cell_size, y + cell_size);
        let bottom_left = Point2D::new(x, y + cell_size);

        let sides = [
            (Direction::Up, Line2D::new(top_left, top_right)),
            (Direction::Right, Line2D::new(top_right, bottom_right)),
            (Direction::Down, Line2D::new(bottom_right, bottom_left)),
            (Direction::Left, Line2D::new(bottom_left, top_left)),
        ];
        for (dir, line) in sides {
            if cell.walls.get(dir) {
                segments.push(WallSegment {
                    line,
                    boundary: grid.is_boundary(pos, dir),
                });
            }
        }
    }
    segments
}

/// A solution path ready to be drawn as a polyline through cell centres.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionOverlay {
    pub points: Vec<Point2D>,
    pub bends: usize,
}

impl SolutionOverlay {
    pub fn new(solution: &Solution, cell_size: f64) -> Self {
        let half = cell_size / 2.0;
        let points = solution
            .path()
            .iter()
            .map(|p| Point2D::new(p.col as f64 * cell_size + half, p.row as f64 * cell_size + half))
            .collect();
        let bends = solution.bends();
        info!("solution overlay: {} cells, {} bends", solution.len(), bends);
        Self { points, bends }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{solve, Position};

    #[test]
    fn test_closed_grid_segments() {
        let grid = Grid::new(2).unwrap();
        let segments = wall_segments(&grid, 10.0);
        assert_eq!(segments.len(), grid.closed_wall_count());
        assert_eq!(segments.len(), 12);
        // Every cell of a 2x2 touches the border on exactly two sides,
        // and two of those eight are the open entrance and exit.
        assert_eq!(segments.iter().filter(|s| s.boundary).count(), 4);
    }

    #[test]
    fn test_first_segment_is_entrance_cell_right_wall() {
        let grid = Grid::new(3).unwrap();
        let first = wall_segments(&grid, 10.0)[0];
        assert_eq!(first.line, Line2D::new(Point2D::new(10.0, 0.0), Point2D::new(10.0, 10.0)));
        assert!(!first.boundary);
    }

    #[test]
    fn test_overlay_points_are_cell_centres() {
        let mut grid = Grid::new(2).unwrap();
        grid.open_wall_between(Position::new(0, 0), Position::new(0, 1), Direction::Right);
        grid.open_wall_between(Position::new(0, 1), Position::new(1, 1), Direction::Down);
        let overlay = SolutionOverlay::new(&solve(&grid).unwrap(), 10.0);
        assert_eq!(
            overlay.points,
            vec![Point2D::new(5.0, 5.0), Point2D::new(15.0, 5.0), Point2D::new(15.0, 15.0)]
        );
        assert_eq!(overlay.bends, 1);
    }
}
