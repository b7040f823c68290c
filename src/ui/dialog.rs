// src/ui/dialog.rs

use eframe::egui::{self, Context};

/// Messages that interrupt the user until acknowledged.
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    NoSolution,
    Error(String),
}

impl Dialog {
    fn title(&self) -> &'static str {
        match self {
            Dialog::NoSolution => "No solution",
            Dialog::Error(_) => "Error",
        }
    }

    fn message(&self) -> String {
        match self {
            Dialog::NoSolution => "No solution found!".to_owned(),
            Dialog::Error(msg) => msg.clone(),
        }
    }
}

/// Holds the currently open dialog, if any.
#[derive(Default)]
pub struct DialogManager {
    active_dialog: Option<Dialog>,
}

impl DialogManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_dialog(&mut self, dialog: Dialog) {
        self.active_dialog = Some(dialog);
    }

    /// Renders the active dialog; closes it once the user clicks OK.
    pub fn update(&mut self, ctx: &Context) {
        let Some(dialog) = &self.active_dialog else {
            return;
        };
        let mut close = false;
        egui::Window::new(dialog.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(dialog.message());
                if ui.button("OK").clicked() {
                    close = true;
                }
            });
        if close {
            self.active_dialog = None;
        }
    }
}
