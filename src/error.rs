//! Error types for shardstore
//!
//! Provides a unified error type for all operations. A missing key is never
//! an error: lookups return `Ok(None)`.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for shardstore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO error at {}: {source}", path.display())]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    // -------------------------------------------------------------------------
    // Tier Errors
    // -------------------------------------------------------------------------
    /// One tier of a dual-tier operation failed after the other succeeded.
    /// The successful side is not rolled back.
    #[error("{operation} of {key} left tiers inconsistent: {source}")]
    PartialTierFailure {
        operation: &'static str,
        key: String,
        #[source]
        source: Box<StoreError>,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Attach the offending path to an I/O error
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::IoAt {
            path: path.into(),
            source,
        }
    }

    /// True for errors raised by key validation or encoding
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, StoreError::InvalidKey(_))
    }
}
