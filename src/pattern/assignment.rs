//! Which image each grid cell receives, and how far it is turned
//!
//! Only cells whose `row + col` is even are drawn, leaving a one-cell gap
//! in a checkerboard. Surviving cells along the same anti-diagonal share an
//! image, and the image index advances every two diagonals.

use std::f64::consts::PI;

use crate::io::configuration::ANGLE_BUCKETS;
use crate::math::hash::cell_hash;

/// Image index and rotation for one drawn cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileAssignment {
    /// Index into the loaded images, in slot order with holes removed
    pub image_index: usize,
    /// Rotation about the cell center in radians
    pub angle: f64,
}

/// Whether a cell belongs to the empty half of the checkerboard
pub const fn is_skipped(row: u32, col: u32) -> bool {
    (row ^ col) & 1 == 1
}

/// Image index for a cell, grouping anti-diagonals in pairs
pub const fn diagonal_index(row: u32, col: u32, image_count: usize) -> usize {
    if image_count <= 1 {
        0
    } else {
        ((row as u64 + col as u64) / 2 % image_count as u64) as usize
    }
}

/// Deterministic pseudo-random angle in `[0, 2π)` for a cell
pub fn random_angle(seed: u32, row: u32, col: u32) -> f64 {
    let bucket = cell_hash(seed, row, col) % ANGLE_BUCKETS;
    let degrees = f64::from(bucket) / f64::from(ANGLE_BUCKETS) * 360.0;
    degrees * PI / 180.0
}

/// Rotation for a cell, zero when rotation is disabled
pub fn cell_angle(rotation_enabled: bool, seed: u32, row: u32, col: u32) -> f64 {
    if rotation_enabled {
        random_angle(seed, row, col)
    } else {
        0.0
    }
}

/// Decide what a cell draws, `None` for skipped cells or an empty image list
pub fn assign(
    row: u32,
    col: u32,
    image_count: usize,
    rotation_enabled: bool,
    seed: u32,
) -> Option<TileAssignment> {
    if image_count == 0 || is_skipped(row, col) {
        return None;
    }
    Some(TileAssignment {
        image_index: diagonal_index(row, col, image_count),
        angle: cell_angle(rotation_enabled, seed, row, col),
    })
}
