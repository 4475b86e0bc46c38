//! Input/output: errors, constants, file decoding and encoding, presets, progress and the CLI

/// Command-line arguments and the export driver
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error type and result alias
pub mod error;
/// Decoding source files and writing PNG output
pub mod image;
/// Built-in export presets
pub mod preset;
/// Terminal progress display
pub mod progress;
