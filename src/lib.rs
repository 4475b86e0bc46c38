//! Diagonal tile pattern compositing with DPI-tagged PNG export
//!
//! Up to four source images are drawn cover-fit into a checkerboard of grid
//! cells, each cell picking its image by anti-diagonal and turning by a
//! seeded per-cell angle. The result is serialized as PNG and tagged with a
//! `pHYs` chunk so it prints at the requested DPI.

#![forbid(unsafe_code)]

/// Input/output operations, configuration and error handling
pub mod io;
/// Hashing, interpolation and rotation helpers
pub mod math;
/// Tile layout, assignment, compositing and export sizing
pub mod pattern;
/// PNG chunk handling and resolution metadata
pub mod png;

pub use io::error::{PatternError, Result};
