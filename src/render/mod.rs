// src/render/mod.rs
pub mod ascii;
pub mod raster;
pub mod segments;
pub mod svg;

pub use ascii::render_ascii;
pub use raster::{encode, render_raster, render_raster_with_solution, ImageFormat};
pub use segments::{wall_segments, SolutionOverlay, WallSegment};
pub use svg::{render_svg, render_svg_with_solution};
