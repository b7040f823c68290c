// src/utils/mod.rs
pub mod geometry;

pub use geometry::{Line2D, Point2D};
