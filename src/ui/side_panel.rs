// src/ui/side_panel.rs

use std::sync::Arc;

use eframe::egui::{self, Context, Ui};
use log::{error, info};
use parking_lot::RwLock;

use crate::error::MazeError;
use crate::maze::MazeSession;
use crate::ui::dialog::{Dialog, DialogManager};

/// Left-hand controls: size, difficulty, and the generate/solve/save actions.
pub struct SidePanel {
    session: Arc<RwLock<MazeSession>>,
    dimension: usize,
    difficulty: f64,
    pub status_message: String,
}

impl SidePanel {
    pub fn new(session: Arc<RwLock<MazeSession>>) -> Self {
        let (dimension, difficulty) = {
            let s = session.read();
            (s.config().dimension, s.config().difficulty)
        };
        Self {
            session,
            dimension,
            difficulty,
            status_message: "Ready".to_owned(),
        }
    }

    pub fn update(&mut self, ctx: &Context, dialogs: &mut DialogManager) {
        egui::SidePanel::left("controls_panel")
            .default_width(200.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("Maze");
                self.show_settings(ui);
                ui.separator();
                self.show_actions(ui, dialogs);
            });
    }

    fn show_settings(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Dimension");
            ui.add(egui::DragValue::new(&mut self.dimension).clamp_range(1..=200));
        });
        ui.add(egui::Slider::new(&mut self.difficulty, 0.0..=0.5).text("Difficulty"));
    }

    fn show_actions(&mut self, ui: &mut Ui, dialogs: &mut DialogManager) {
        if ui.button("Generate").clicked() {
            self.generate(dialogs);
        }

        let visible = self.session.read().solution_visible();
        let label = if visible { "Hide solution" } else { "Solve" };
        if ui.button(label).clicked() {
            match self.session.write().toggle_solution() {
                Ok(Some(overlay)) => self.status_message = format!("Bends: {}", overlay.bends),
                Ok(None) => self.status_message = "Solution hidden".to_owned(),
                Err(MazeError::NoSolutionFound { .. }) => dialogs.show_dialog(Dialog::NoSolution),
                Err(err) => dialogs.show_dialog(Dialog::Error(err.to_string())),
            }
        }

        if ui.button("Save SVG").clicked() {
            let svg = self.session.read().svg();
            match std::fs::write("maze.svg", svg) {
                Ok(()) => {
                    info!("saved maze.svg");
                    self.status_message = "Saved maze.svg".to_owned();
                }
                Err(err) => {
                    error!("could not save maze.svg: {}", err);
                    dialogs.show_dialog(Dialog::Error(err.to_string()));
                }
            }
        }
    }

    fn generate(&mut self, dialogs: &mut DialogManager) {
        let mut session = self.session.write();
        let applied = session
            .configure(self.dimension, self.difficulty)
            .and_then(|_| session.regenerate().map(|_| ()));
        match applied {
            Ok(()) => {
                self.status_message = format!(
                    "Iterations: {} (bend ratio {:.3})",
                    session.attempts(),
                    session.bend_ratio()
                );
            }
            Err(err) => {
                error!("generation failed: {}", err);
                dialogs.show_dialog(Dialog::Error(err.to_string()));
            }
        }
    }
}
