//! Central panel: paints the maze walls and, when toggled on, the solution.

use std::sync::Arc;

use eframe::egui::{self, Color32, Context, Painter, Pos2, Rect, Sense, Stroke};
use parking_lot::RwLock;

use crate::maze::{MazeSession, CELL_SIZE};
use crate::render::svg::{BOUNDARY_STROKE, INTERIOR_STROKE};
use crate::render::wall_segments;
use crate::utils::geometry::Point2D;

/// The maze canvas. It scales the grid to fit the available space.
pub struct CentralPanel {
    session: Arc<RwLock<MazeSession>>,
}

impl CentralPanel {
    pub fn new(session: Arc<RwLock<MazeSession>>) -> Self {
        Self { session }
    }

    pub fn update(&mut self, ctx: &Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let side = available.x.min(available.y).max(1.0);
            let (response, painter) = ui.allocate_painter(egui::vec2(side, side), Sense::hover());
            self.draw(&painter, response.rect);
        });
    }

    fn draw(&self, painter: &Painter, rect: Rect) {
        painter.rect_filled(rect, 0.0, Color32::WHITE);

        let session = self.session.read();
        let grid = session.grid();
        let units = (grid.dimension() as u32 * CELL_SIZE) as f32;
        let scale = rect.width() / units;
        let to_screen = |p: Point2D| Pos2::new(rect.min.x + p.x as f32 * scale, rect.min.y + p.y as f32 * scale);

        for segment in wall_segments(grid, CELL_SIZE as f64) {
            let width = if segment.boundary { BOUNDARY_STROKE } else { INTERIOR_STROKE };
            painter.line_segment(
                [to_screen(segment.line.start), to_screen(segment.line.end)],
                Stroke::new(width as f32 * scale / 2.0, Color32::BLACK),
            );
        }

        if let Some(overlay) = session.overlay() {
            let points: Vec<Pos2> = overlay.points.into_iter().map(to_screen).collect();
            painter.add(egui::Shape::line(points, Stroke::new(INTERIOR_STROKE as f32 * scale / 2.0, Color32::RED)));
        }
    }
}
