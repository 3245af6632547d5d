// src/chart/mod.rs
//! Net trend chart: pure geometry first, then renderers over it.
//!
//! - `geometry` turns an ordered series into coordinates, areas and ticks.
//! - `labels` picks which x positions get a label and how to shorten it.
//! - `svg` and `raster` serialize a geometry; the GUI paints the same one.
pub mod geometry;
pub mod labels;
pub mod raster;
pub mod svg;

pub use geometry::{build, build_from_snapshots, caption, ChartEntry, ChartGeometry, Shape};
