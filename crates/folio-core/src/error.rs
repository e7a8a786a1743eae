//! Error types for the Folio portfolio core.
//!
//! Clustering itself never fails: bad timestamps degrade to the undated
//! shoot. Errors only arise at the edges, when configuration or a listing
//! snapshot is read from disk and decoded.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Folio operations.
#[derive(Error, Debug)]
pub enum FolioError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Listing snapshot errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while loading an image listing snapshot.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Snapshot file does not exist
    #[error("Listing not found: {0}")]
    NotFound(PathBuf),

    /// Snapshot could not be read
    #[error("Failed to read listing {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot is not a recognised listing shape
    #[error("Malformed listing: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Convenience type alias for Folio results.
pub type Result<T> = std::result::Result<T, FolioError>;
