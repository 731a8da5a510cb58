//! Configuration for shardstore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, StoreError};
use crate::path::Platform;

/// Main configuration for a shardstore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all blobs
    /// Internal structure:
    ///   {base_dir}/
    ///     ├── .staging/               (in-flight atomic writes)
    ///     └── {k0[..2]}/{k0[2..]}/…   (one file per key)
    pub base_dir: PathBuf,

    /// Write blobs to a staging file and rename them into place
    pub atomic_writes: bool,

    // -------------------------------------------------------------------------
    // Path Configuration
    // -------------------------------------------------------------------------
    /// Path semantics used for cache keys and disk-key normalization.
    /// `None` detects the host platform.
    pub platform: Option<Platform>,

    // -------------------------------------------------------------------------
    // Range Scan Configuration
    // -------------------------------------------------------------------------
    /// Max number of keys loaded concurrently by a range scan
    pub load_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("./shardstore-data"),
            atomic_writes: true,
            platform: None,
            load_concurrency: 16,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The platform whose path rules apply, detecting the host if unset
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::current)
    }

    /// Reject settings the adapter cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.load_concurrency == 0 {
            return Err(StoreError::Config(
                "load_concurrency must be at least 1".to_string(),
            ));
        }
        if self.base_dir.as_os_str().is_empty() {
            return Err(StoreError::Config("base_dir must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the base directory (root for all blobs)
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.base_dir = path.into();
        self
    }

    /// Enable or disable staged (write-then-rename) writes
    pub fn atomic_writes(mut self, enabled: bool) -> Self {
        self.config.atomic_writes = enabled;
        self
    }

    /// Force a platform's path semantics instead of detecting the host
    pub fn platform(mut self, platform: Platform) -> Self {
        self.config.platform = Some(platform);
        self
    }

    /// Set the range-scan load concurrency
    pub fn load_concurrency(mut self, count: usize) -> Self {
        self.config.load_concurrency = count;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
