//! # Main Window Module
//!
//! Hosts the interactive viewer: a control panel on the left, the maze canvas
//! in the centre and a status bar at the bottom. All three panels share one
//! [`MazeSession`] behind an `Arc<RwLock<_>>`.

use std::error::Error;
use std::sync::Arc;

use eframe::egui;
use log::info;
use parking_lot::RwLock;

use crate::config::MazeConfig;
use crate::maze::MazeSession;
use crate::ui::central_panel::CentralPanel;
use crate::ui::dialog::DialogManager;
use crate::ui::side_panel::SidePanel;
use crate::ui::status_bar::StatusBar;

pub struct MainWindow {
    side_panel: SidePanel,
    central_panel: CentralPanel,
    status_bar: StatusBar,
    dialogs: DialogManager,
}

impl MainWindow {
    pub fn new(session: MazeSession) -> Self {
        let session = Arc::new(RwLock::new(session));
        Self {
            side_panel: SidePanel::new(Arc::clone(&session)),
            central_panel: CentralPanel::new(Arc::clone(&session)),
            status_bar: StatusBar::new(session),
            dialogs: DialogManager::new(),
        }
    }
}

impl eframe::App for MainWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.side_panel.update(ctx, &mut self.dialogs);
        self.status_bar.update(ctx, &self.side_panel.status_message);
        self.central_panel.update(ctx);
        self.dialogs.update(ctx);
    }
}

/// Generates the first maze from `config` and opens the viewer window.
pub fn run_viewer(config: MazeConfig) -> Result<(), Box<dyn Error>> {
    let session = MazeSession::new(config)?;
    info!("opening viewer");

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "mazeforge",
        native_options,
        Box::new(|_cc| Box::new(MainWindow::new(session))),
    );
    // run_native returns () in this eframe version.
    Ok(())
}
