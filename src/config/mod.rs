// src/config/mod.rs
//! JSON configuration for generation, rendering and batch export.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change:
//!
//! ```json
//! { "dimension": 30, "difficulty": 0.2, "max_attempts": 5000,
//!   "batch": { "bands": [ { "name": "easy", "count": 5, "difficulty": 0.1 } ] } }
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{MazeError, MazeResult};
use crate::maze::{check_difficulty, Backtrack, CELL_SIZE, DEFAULT_DIFFICULTY, DEFAULT_DIMENSION};

/// Settings for a single interactive or command-line maze.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub dimension: usize,
    /// Minimum bend ratio of the accepted maze.
    pub difficulty: f64,
    /// Cap on regeneration attempts; `None` retries forever.
    pub max_attempts: Option<u64>,
    /// Fixed RNG seed for reproducible output.
    pub seed: Option<u64>,
    pub backtrack: Backtrack,
    /// SVG units per cell.
    pub cell_size: u32,
    pub batch: BatchConfig,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            difficulty: DEFAULT_DIFFICULTY,
            max_attempts: None,
            seed: None,
            backtrack: Backtrack::default(),
            cell_size: CELL_SIZE,
            batch: BatchConfig::default(),
        }
    }
}

/// One named difficulty band of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub name: String,
    pub count: usize,
    pub difficulty: f64,
}

impl Band {
    pub fn new(name: impl Into<String>, count: usize, difficulty: f64) -> Self {
        Self {
            name: name.into(),
            count,
            difficulty,
        }
    }
}

/// Settings for a batch export run. Bands run in order, easiest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub dimension: usize,
    /// Side of each output image in pixels.
    pub image_size: u32,
    pub jpeg_quality: u8,
    pub bands: Vec<Band>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            dimension: 40,
            image_size: 500,
            jpeg_quality: 95,
            bands: vec![
                Band::new("easy", 20, 0.12),
                Band::new("medium", 30, 0.16),
                Band::new("hard", 50, 0.23),
            ],
        }
    }
}

impl BatchConfig {
    pub fn total_units(&self) -> usize {
        self.bands.iter().map(|b| b.count).sum()
    }
}

impl MazeConfig {
    /// Reads a JSON config file; missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> MazeResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config: MazeConfig = serde_json::from_str(&text)?;
        config.validate()?;
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> MazeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects sizes that could never produce a maze or an image, and
    /// difficulties no maze of the configured size can reach.
    pub fn validate(&self) -> MazeResult<()> {
        if self.dimension < 1 {
            return Err(MazeError::InvalidDimension(self.dimension as i64));
        }
        if self.batch.dimension < 1 {
            return Err(MazeError::InvalidDimension(self.batch.dimension as i64));
        }
        if self.cell_size < 1 {
            return Err(MazeError::InvalidImageSize {
                field: "cell_size",
                value: self.cell_size,
            });
        }
        if self.batch.image_size < 1 {
            return Err(MazeError::InvalidImageSize {
                field: "image_size",
                value: self.batch.image_size,
            });
        }
        check_difficulty(self.difficulty, self.dimension)?;
        for band in &self.batch.bands {
            check_difficulty(band.difficulty, self.batch.dimension)?;
        }
        Ok(())
    }
}

/// Turns a user-supplied size into a grid dimension.
pub fn validate_dimension(requested: i64) -> MazeResult<usize> {
    if requested < 1 {
        return Err(MazeError::InvalidDimension(requested));
    }
    usize::try_from(requested).map_err(|_| MazeError::InvalidDimension(requested))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_browser_tool() {
        let config = MazeConfig::default();
        assert_eq!(config.dimension, 20);
        assert_eq!(config.difficulty, 0.4);
        assert_eq!(config.cell_size, 10);
        assert_eq!(config.max_attempts, None);
        assert_eq!(config.batch.total_units(), 100);
        let names: Vec<&str> = config.batch.bands.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["easy", "medium", "hard"]);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MazeConfig =
            serde_json::from_str(r#"{ "dimension": 8, "backtrack": "frontier", "batch": { "image_size": 64 } }"#)
                .unwrap();
        assert_eq!(config.dimension, 8);
        assert_eq!(config.backtrack, Backtrack::Frontier);
        assert_eq!(config.difficulty, DEFAULT_DIFFICULTY);
        assert_eq!(config.batch.image_size, 64);
        assert_eq!(config.batch.bands.len(), 3);
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = MazeConfig::default();
        config.seed = Some(42);
        config.max_attempts = Some(1000);
        let parsed: MazeConfig = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validate_rejects_zero_dimension() {
        let config = MazeConfig {
            dimension: 0,
            ..MazeConfig::default()
        };
        assert!(matches!(config.validate(), Err(MazeError::InvalidDimension(0))));
    }

    #[test]
    fn test_validate_names_zero_pixel_sizes() {
        let config = MazeConfig {
            cell_size: 0,
            ..MazeConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, MazeError::InvalidImageSize { field: "cell_size", value: 0 }));
        assert_eq!(err.to_string(), "invalid cell_size 0: must be at least 1 pixel");

        let mut config = MazeConfig::default();
        config.batch.image_size = 0;
        assert!(matches!(
            config.validate(),
            Err(MazeError::InvalidImageSize { field: "image_size", value: 0 })
        ));
    }

    #[test]
    fn test_validate_rejects_unreachable_difficulty() {
        for difficulty in [1.0, 1.5, -0.1, f64::NAN] {
            let config = MazeConfig {
                difficulty,
                ..MazeConfig::default()
            };
            assert!(matches!(config.validate(), Err(MazeError::InvalidDifficulty(_))));
        }

        let config = MazeConfig {
            dimension: 2,
            difficulty: 0.3,
            ..MazeConfig::default()
        };
        assert!(matches!(config.validate(), Err(MazeError::InvalidDifficulty(_))));

        let mut config = MazeConfig::default();
        config.batch.dimension = 1;
        assert!(matches!(config.validate(), Err(MazeError::InvalidDifficulty(_))));
        config.batch.bands = vec![Band::new("easy", 1, 0.0)];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_dimension() {
        assert_eq!(validate_dimension(12).unwrap(), 12);
        assert!(matches!(validate_dimension(0), Err(MazeError::InvalidDimension(0))));
        assert!(matches!(validate_dimension(-3), Err(MazeError::InvalidDimension(-3))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = MazeConfig::load("/definitely/not/here/mazeforge.json");
        assert!(matches!(result, Err(MazeError::Io(_))));
    }
}
