// src/export/batch.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{BatchConfig, MazeConfig};
use crate::error::{MazeError, MazeResult};
use crate::maze::{Backtrack, DifficultyController, OriginShiftGenerator};
use crate::render::{self, ImageFormat};

pub const MANIFEST_FILE: &str = "manifest.json";

fn splitmix64(mut value: u64) -> u64 {
    value = value.wrapping_add(0x9E37_79B9_7F4A_7C15);
    value = (value ^ (value >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value = (value ^ (value >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

/// RNG seed for unit `index` of a run seeded with `seed`.
///
/// Both inputs are hashed, so nearby run seeds do not share units.
pub fn unit_seed(seed: u64, index: usize) -> u64 {
    splitmix64(splitmix64(seed) ^ index as u64)
}

/// One maze to produce: which band it belongs to and its number there.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchUnit {
    /// Position in the whole run, starting at 0.
    pub index: usize,
    pub band: String,
    /// Position within the band, starting at 1.
    pub number: usize,
    pub difficulty: f64,
}

impl BatchUnit {
    pub fn file_name(&self, format: ImageFormat) -> String {
        format!("maze-{}.{}", self.number, format.extension())
    }

    /// Path of the unit's image relative to the output directory.
    pub fn relative_path(&self, format: ImageFormat) -> PathBuf {
        Path::new(&self.band).join(self.file_name(format))
    }
}

/// What happened to one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub band: String,
    pub number: usize,
    pub file: String,
    pub difficulty: f64,
    pub attempts: Option<u64>,
    pub bend_ratio: Option<f64>,
    pub error: Option<String>,
}

impl UnitRecord {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary written next to the images as `manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchManifest {
    pub dimension: usize,
    pub image_size: u32,
    pub seed: Option<u64>,
    pub units: Vec<UnitRecord>,
}

impl BatchManifest {
    pub fn failures(&self) -> impl Iterator<Item = &UnitRecord> {
        self.units.iter().filter(|u| !u.succeeded())
    }

    pub fn load(path: impl AsRef<Path>) -> MazeResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Generates a maze per unit across the configured difficulty bands and
/// writes each as a JPEG under `<out>/<band>/`.
///
/// Units are independent: each gets its own RNG and they are produced in
/// parallel. A unit that fails is recorded in the manifest and the rest of
/// the batch carries on.
#[derive(Debug, Clone)]
pub struct BatchExporter {
    batch: BatchConfig,
    backtrack: Backtrack,
    max_attempts: Option<u64>,
    seed: Option<u64>,
}

impl BatchExporter {
    pub fn new(config: &MazeConfig) -> Self {
        Self {
            batch: config.batch.clone(),
            backtrack: config.backtrack,
            max_attempts: config.max_attempts,
            seed: config.seed,
        }
    }

    pub fn format(&self) -> ImageFormat {
        ImageFormat::Jpeg {
            quality: self.batch.jpeg_quality,
        }
    }

    /// Lays out every unit of the run, band by band.
    pub fn plan(&self) -> Vec<BatchUnit> {
        let mut units = Vec::with_capacity(self.batch.total_units());
        for band in &self.batch.bands {
            for number in 1..=band.count {
                units.push(BatchUnit {
                    index: units.len(),
                    band: band.name.clone(),
                    number,
                    difficulty: band.difficulty,
                });
            }
        }
        units
    }

    /// Runs the whole batch into `out_dir` and writes the manifest.
    ///
    /// Only setup failures (creating directories, writing the manifest)
    /// abort the run.
    pub fn run(&self, out_dir: impl AsRef<Path>) -> MazeResult<BatchManifest> {
        let out_dir = out_dir.as_ref();
        if self.batch.dimension < 1 {
            return Err(MazeError::InvalidDimension(self.batch.dimension as i64));
        }
        for band in &self.batch.bands {
            fs::create_dir_all(out_dir.join(&band.name))?;
        }

        let units = self.plan();
        info!(
            "exporting {} mazes ({}x{}) into {}",
            units.len(),
            self.batch.dimension,
            self.batch.dimension,
            out_dir.display()
        );
        let started = Instant::now();

        let records: Vec<UnitRecord> = units
            .par_iter()
            .map(|unit| self.export_unit(unit, out_dir))
            .collect();

        let manifest = BatchManifest {
            dimension: self.batch.dimension,
            image_size: self.batch.image_size,
            seed: self.seed,
            units: records,
        };
        fs::write(
            out_dir.join(MANIFEST_FILE),
            serde_json::to_string_pretty(&manifest)?,
        )?;

        let failed = manifest.failures().count();
        info!(
            "batch finished in {:.2?}: {} written, {} failed",
            started.elapsed(),
            manifest.units.len() - failed,
            failed
        );
        Ok(manifest)
    }

    /// Generates, rasterizes and writes a single unit. Never fails; errors
    /// end up in the record.
    pub fn export_unit(&self, unit: &BatchUnit, out_dir: &Path) -> UnitRecord {
        let format = self.format();
        let relative = unit.relative_path(format);
        let mut record = UnitRecord {
            band: unit.band.clone(),
            number: unit.number,
            file: relative.to_string_lossy().into_owned(),
            difficulty: unit.difficulty,
            attempts: None,
            bend_ratio: None,
            error: None,
        };

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(unit_seed(seed, unit.index)),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let result = DifficultyController::strict(unit.difficulty, self.batch.dimension)
            .and_then(|controller| {
                controller
                    .with_max_attempts(self.max_attempts)
                    .with_generator(OriginShiftGenerator::new(self.backtrack))
                    .run(self.batch.dimension, &mut rng)
            })
            .and_then(|report| {
                record.attempts = Some(report.attempts);
                record.bend_ratio = Some(report.bend_ratio);
                let img = render::render_raster(&report.grid, self.batch.image_size)?;
                let bytes = render::encode(&img, format)?;
                fs::write(out_dir.join(&relative), bytes)?;
                Ok(())
            });

        if let Err(err) = result {
            warn!("{} #{} failed: {}", unit.band, unit.number, err);
            record.error = Some(err.to_string());
        }
        record
    }
}
