//! PNG chunk stream handling and physical resolution metadata

/// Chunk stream scanning and chunk record encoding
pub mod chunk;
/// Table-driven CRC32 used by chunk records
pub mod crc;
/// Reading and writing the `pHYs` chunk
pub mod resolution;

pub use resolution::{inject_resolution, pixels_per_meter, read_resolution};
