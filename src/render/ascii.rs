// src/render/ascii.rs

use std::collections::HashSet;

use crate::maze::{Grid, Position, Solution};

/// Renders the maze with `+---+` box drawing. Cells on `solution` are
/// marked with `*`.
pub fn render_ascii(grid: &Grid, solution: Option<&Solution>) -> String {
    let on_path: HashSet<Position> = solution
        .map(|s| s.path().iter().copied().collect())
        .unwrap_or_default();
    let n = grid.dimension();
    let mut out = String::with_capacity((4 * n + 2) * (2 * n + 1));

    for row in 0..n {
        for col in 0..n {
            let walls = grid.cell(Position::new(row, col)).walls;
            out.push('+');
            out.push_str(if walls.top { "---" } else { "   " });
        }
        out.push_str("+\n");

        for col in 0..n {
            let pos = Position::new(row, col);
            let walls = grid.cell(pos).walls;
            out.push(if walls.left { '|' } else { ' ' });
            out.push_str(if on_path.contains(&pos) { " * " } else { "   " });
        }
        let last = grid.cell(Position::new(row, n - 1)).walls;
        out.push(if last.right { '|' } else { ' ' });
        out.push('\n');
    }

    for col in 0..n {
        let walls = grid.cell(Position::new(n - 1, col)).walls;
        out.push('+');
        out.push_str(if walls.bottom { "---" } else { "   " });
    }
    out.push_str("+\n");
    out
}
