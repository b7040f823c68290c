// src/render/svg.rs

use std::fmt::Write;

use crate::maze::{Grid, Solution};
use crate::render::segments::{wall_segments, SolutionOverlay};

/// Stroke width of interior walls.
pub const INTERIOR_STROKE: u32 = 2;
/// Stroke width of walls on the outer edge.
pub const BOUNDARY_STROKE: u32 = 4;

/// Renders the maze as a standalone SVG document, `dimension * cell_size`
/// units per side, with one `<line>` per closed wall.
pub fn render_svg(grid: &Grid, cell_size: u32) -> String {
    render(grid, None, cell_size)
}

/// Like [`render_svg`], with the solution drawn as a red polyline on top.
pub fn render_svg_with_solution(grid: &Grid, solution: &Solution, cell_size: u32) -> String {
    render(grid, Some(solution), cell_size)
}

fn render(grid: &Grid, solution: Option<&Solution>, cell_size: u32) -> String {
    let side = grid.dimension() as u32 * cell_size;
    let segments = wall_segments(grid, cell_size as f64);

    // Writing into a String cannot fail.
    let mut svg = String::with_capacity(64 * segments.len() + 256);
    let _ = write!(
        svg,
        r#"<svg width="{side}" height="{side}" xmlns="http://www.w3.org/2000/svg">"#
    );
    svg.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = write!(
        svg,
        r#"<g stroke="black" stroke-width="{INTERIOR_STROKE}" stroke-linecap="round">"#
    );
    for segment in &segments {
        let l = segment.line;
        let _ = write!(
            svg,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
            l.start.x, l.start.y, l.end.x, l.end.y
        );
        if segment.boundary {
            let _ = write!(svg, r#" stroke-width="{BOUNDARY_STROKE}""#);
        }
        svg.push_str("/>");
    }
    svg.push_str("</g>");

    if let Some(solution) = solution {
        let overlay = SolutionOverlay::new(solution, cell_size as f64);
        let points: Vec<String> = overlay
            .points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect();
        let _ = write!(
            svg,
            r#"<polyline points="{}" fill="none" stroke="red" stroke-width="{INTERIOR_STROKE}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            points.join(" ")
        );
    }

    svg.push_str("</svg>");
    svg
}
