// src/export/mod.rs
pub mod batch;

pub use batch::{BatchExporter, BatchManifest, BatchUnit, UnitRecord, MANIFEST_FILE};
