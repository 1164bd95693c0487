//! Error types for rendering and persistence

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced to the caller. Bad parameters and degenerate
/// geometry are normalized instead and never appear here.
#[derive(Error, Debug)]
pub enum Error {
    /// Writing the image failed
    #[error("Failed to write image {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Raster dimensions do not match the pixel buffer
    #[error("Pixel buffer does not fit a {width}x{height} image")]
    BufferSize { width: u32, height: u32 },

    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for the expected shape
    #[error("Invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
