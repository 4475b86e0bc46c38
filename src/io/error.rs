//! Error types and path context for compositing and export operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all pattern and export operations
#[derive(Debug)]
pub enum PatternError {
    /// Neither decode strategy could turn a file into a raster image
    ImageDecode {
        /// Path to the image file
        path: PathBuf,
        /// Error from decoding by file extension
        primary: image::ImageError,
        /// Error from decoding with content sniffing
        fallback: image::ImageError,
    },

    /// Export was requested without any loaded image
    NoImages,

    /// Requested output exceeds the pixel ceiling
    OutputTooLarge {
        /// Requested width in pixels
        width: u64,
        /// Requested height in pixels
        height: u64,
        /// Maximum allowed pixel count
        limit: u64,
    },

    /// Byte stream is not a well-formed PNG chunk stream
    MalformedPng {
        /// Description of what's wrong with the stream
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to serialize a surface to PNG
    ImageEncode {
        /// Underlying encoder error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageDecode {
                path,
                primary,
                fallback,
            } => {
                write!(
                    f,
                    "Failed to decode image '{}': {primary} (retry: {fallback})",
                    path.display()
                )
            }
            Self::NoImages => write!(f, "No images loaded; add at least one image"),
            Self::OutputTooLarge {
                width,
                height,
                limit,
            } => {
                write!(
                    f,
                    "Output {width}x{height} exceeds the {limit} pixel limit; lower the size or DPI"
                )
            }
            Self::MalformedPng { reason } => write!(f, "Malformed PNG: {reason}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageEncode { source } => write!(f, "Failed to encode PNG: {source}"),
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageDecode { fallback, .. } => Some(fallback),
            Self::ImageEncode { source } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for pattern results
pub type Result<T> = std::result::Result<T, PatternError>;

/// Attaches the path being worked on to file system errors
pub trait WithPath<T> {
    /// Record `path` and `operation` on a failed file system call
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<PatternError>,
{
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|e| match e.into() {
            PatternError::FileSystem { source, .. } => PatternError::FileSystem {
                path: path.to_path_buf(),
                operation,
                source,
            },
            other => other,
        })
    }
}

impl From<image::ImageError> for PatternError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageEncode { source: err }
    }
}

impl From<std::io::Error> for PatternError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PatternError {
    PatternError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a malformed PNG error
pub fn malformed_png(reason: &impl ToString) -> PatternError {
    PatternError::MalformedPng {
        reason: reason.to_string(),
    }
}
