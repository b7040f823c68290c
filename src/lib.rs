// src/lib.rs

pub mod config;
pub mod error;
pub mod export;
pub mod maze;
pub mod render;
#[cfg(feature = "gui")]
pub mod ui;
pub mod utils;

pub use config::MazeConfig;
pub use error::{MazeError, MazeResult};
pub use maze::{Grid, MazeSession, Position, Solution};
