// src/render/raster.rs

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgb, RgbImage};

use crate::error::{MazeError, MazeResult};
use crate::maze::{Grid, Solution, CELL_SIZE};
use crate::render::segments::{wall_segments, SolutionOverlay};
use crate::render::svg::{BOUNDARY_STROKE, INTERIOR_STROKE};
use crate::utils::geometry::Line2D;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const RED: Rgb<u8> = Rgb([220, 30, 30]);

/// Output encodings for rasterized mazes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg { quality: u8 },
    Png,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg { .. } => "jpg",
            ImageFormat::Png => "png",
        }
    }
}

/// Draws the maze onto a white `size`×`size` image.
///
/// The geometry is the same one the SVG export uses, scaled from
/// `dimension * CELL_SIZE` units to `size` pixels, so strokes keep their
/// relative weight.
pub fn render_raster(grid: &Grid, size: u32) -> MazeResult<RgbImage> {
    render(grid, None, size)
}

pub fn render_raster_with_solution(grid: &Grid, solution: &Solution, size: u32) -> MazeResult<RgbImage> {
    render(grid, Some(solution), size)
}

fn render(grid: &Grid, solution: Option<&Solution>, size: u32) -> MazeResult<RgbImage> {
    if size == 0 {
        return Err(MazeError::InvalidImageSize {
            field: "raster size",
            value: size,
        });
    }

    let units = (grid.dimension() as u32 * CELL_SIZE) as f64;
    let scale = size as f64 / units;
    let mut img = RgbImage::from_pixel(size, size, WHITE);

    for segment in wall_segments(grid, CELL_SIZE as f64) {
        let width = if segment.boundary { BOUNDARY_STROKE } else { INTERIOR_STROKE };
        stroke(&mut img, &segment.line.scaled(scale), width as f64 * scale, BLACK);
    }

    if let Some(solution) = solution {
        let overlay = SolutionOverlay::new(solution, CELL_SIZE as f64);
        for pair in overlay.points.windows(2) {
            let line = Line2D::new(pair[0], pair[1]).scaled(scale);
            stroke(&mut img, &line, INTERIOR_STROKE as f64 * scale, RED);
        }
    }

    Ok(img)
}

/// Fills the square-capped band of `width` pixels around an axis-aligned line.
fn stroke(img: &mut RgbImage, line: &Line2D, width: f64, color: Rgb<u8>) {
    let half = (width / 2.0).max(0.5);
    let (min_x, min_y, max_x, max_y) = line.bounds();
    let (w, h) = img.dimensions();

    let x0 = (min_x - half).floor().max(0.0) as u32;
    let y0 = (min_y - half).floor().max(0.0) as u32;
    let x1 = ((max_x + half).ceil() as u32).min(w);
    let y1 = ((max_y + half).ceil() as u32).min(h);

    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, color);
        }
    }
}

/// Encodes an image into an in-memory file of the given format.
pub fn encode(img: &RgbImage, format: ImageFormat) -> MazeResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let (w, h) = img.dimensions();
    match format {
        ImageFormat::Jpeg { quality } => {
            let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
            encoder.encode(img.as_raw(), w, h, ColorType::Rgb8)?;
        }
        ImageFormat::Png => {
            PngEncoder::new(&mut bytes).write_image(img.as_raw(), w, h, ColorType::Rgb8)?;
        }
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{solve, OriginShiftGenerator};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_closed_single_cell_frame() {
        // A 1x1 grid only has its exterior openings, so nothing is drawn.
        let grid = Grid::new(1).unwrap();
        let img = render_raster(&grid, 50).unwrap();
        assert!(img.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_walls_are_drawn_black() {
        let grid = Grid::new(2).unwrap();
        let img = render_raster(&grid, 100).unwrap();
        assert_eq!(img.dimensions(), (100, 100));
        // Interior wall between (0,0) and (0,1) runs along x = 50.
        assert_eq!(*img.get_pixel(50, 25), BLACK);
        // Top-left corner of the entrance is open.
        assert_eq!(*img.get_pixel(25, 0), WHITE);
        // Cell interiors stay white.
        assert_eq!(*img.get_pixel(25, 25), WHITE);
    }

    #[test]
    fn test_solution_is_drawn_red() {
        let mut rng = StdRng::seed_from_u64(4);
        let grid = OriginShiftGenerator::default().generate(5, &mut rng).unwrap();
        let solution = solve(&grid).unwrap();
        let img = render_raster_with_solution(&grid, &solution, 100).unwrap();
        // Centre of the entrance cell.
        assert_eq!(*img.get_pixel(10, 10), RED);
    }

    #[test]
    fn test_zero_size_rejected() {
        let grid = Grid::new(2).unwrap();
        assert!(matches!(
            render_raster(&grid, 0),
            Err(MazeError::InvalidImageSize { value: 0, .. })
        ));
    }

    #[test]
    fn test_encoders_emit_magic_bytes() {
        let grid = Grid::new(3).unwrap();
        let img = render_raster(&grid, 60).unwrap();

        let jpeg = encode(&img, ImageFormat::Jpeg { quality: 95 }).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

        let png = encode(&img, ImageFormat::Png).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
