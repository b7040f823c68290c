// src/error.rs

use thiserror::Error;

/// Every failure the maze core and its render/export adapters can report.
#[derive(Debug, Error)]
pub enum MazeError {
    /// Requested grid size is not a positive integer.
    #[error("invalid maze dimension {0}: must be at least 1")]
    InvalidDimension(i64),

    /// A pixel size (`cell_size`, `image_size`, raster side) is zero.
    #[error("invalid {field} {value}: must be at least 1 pixel")]
    InvalidImageSize { field: &'static str, value: u32 },

    /// Difficulty threshold that is not finite, outside `[0, 1)`, or above
    /// what the maze size can reach.
    #[error("invalid difficulty threshold {0}")]
    InvalidDifficulty(f64),

    /// The solver exhausted the search tree without reaching the exit.
    #[error("no solution found in {dimension}x{dimension} maze")]
    NoSolutionFound { dimension: usize },

    /// The retry loop hit its iteration cap before meeting the threshold.
    #[error(
        "difficulty {threshold} not reached after {attempts} attempts (best bend ratio {best_ratio:.4})"
    )]
    NonConvergentDifficulty {
        threshold: f64,
        attempts: u64,
        best_ratio: f64,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type MazeResult<T> = Result<T, MazeError>;
