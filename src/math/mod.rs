//! Numeric helpers for tile placement and resampling

/// Integer hashing for deterministic per-cell values
pub mod hash;
/// Linear and bilinear interpolation over RGBA pixels
pub mod interpolation;
/// Rotation about a cell center
pub mod transform;
