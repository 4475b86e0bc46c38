//! Tile compositing: source images, grid layout, per-cell assignment and drawing
//!
//! This module contains pattern-related functionality including:
//! - Source image slots and per-image scale
//! - Grid geometry and the per-cell tile plan
//! - Checkerboard skipping, diagonal image assignment and rotation angles
//! - Cover-fit drawing onto an RGBA surface
//! - Export sizing and the render-to-PNG pipeline

/// Diagonal assignment and deterministic rotation
pub mod assignment;
/// Drawing assigned cells onto a surface
pub mod compositor;
/// Export sizing, pixel ceiling and the PNG pipeline
pub mod export;
/// Grid specification, cell geometry and tile plans
pub mod grid;
/// Decoded source images and their slots
pub mod source;

pub use compositor::{PatternConfig, composite};
pub use export::{CeilingPolicy, ExportSpec, PixelSize, Unit};
pub use grid::GridSpec;
pub use source::{ImageSlots, SourceImage};
