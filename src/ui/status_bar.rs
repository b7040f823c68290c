// src/ui/status_bar.rs

use std::sync::Arc;

use eframe::egui::{self, Context};
use parking_lot::RwLock;

use crate::maze::MazeSession;

pub struct StatusBar {
    session: Arc<RwLock<MazeSession>>,
}

impl StatusBar {
    pub fn new(session: Arc<RwLock<MazeSession>>) -> Self {
        Self { session }
    }

    pub fn update(&mut self, ctx: &Context, message: &str) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let session = self.session.read(); // Keep the read lock short.
            let dimension = session.grid().dimension();

            ui.horizontal(|ui| {
                ui.label(message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!(
                        "{dimension}x{dimension} | iterations: {} | bend ratio: {:.3}",
                        session.attempts(),
                        session.bend_ratio()
                    ));
                });
            });
        });
    }
}
