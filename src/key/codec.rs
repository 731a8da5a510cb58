//! Key codec
//!
//! Maps keys to paths under the base directory and back.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Result, StoreError};
use crate::path::{PathStyle, Platform};

use super::{StorageKey, SHARD_PREFIX_CHARS};

/// Key ↔ path mapping for one base directory
#[derive(Debug, Clone)]
pub struct KeyCodec {
    /// Absolute base directory
    base_dir: PathBuf,

    /// `base_dir` as a string, for relativizing walked paths
    base_str: String,

    /// Path rules, fixed for the codec's lifetime
    style: Arc<dyn PathStyle>,
}

impl KeyCodec {
    /// Create a codec rooted at `base_dir`
    ///
    /// `base_dir` must be absolute and valid UTF-8; relativizing walked
    /// paths against it is pure string arithmetic.
    pub fn new(base_dir: impl Into<PathBuf>, style: Arc<dyn PathStyle>) -> Result<Self> {
        let base_dir = base_dir.into();

        if !base_dir.is_absolute() {
            return Err(StoreError::Config(format!(
                "base directory {} is not absolute",
                base_dir.display()
            )));
        }

        let base_str = base_dir
            .to_str()
            .ok_or_else(|| {
                StoreError::Config(format!(
                    "base directory {} is not valid UTF-8",
                    base_dir.display()
                ))
            })?
            .to_string();

        Ok(Self {
            base_dir,
            base_str,
            style,
        })
    }

    /// The base directory all blobs live under
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The path rules in use
    pub fn style(&self) -> &Arc<dyn PathStyle> {
        &self.style
    }

    /// Path of the blob stored under `key`
    ///
    /// The first segment must be longer than the shard prefix, otherwise
    /// the blob would sit directly in a shard directory and collide with
    /// the keys sharded beneath it.
    pub fn encode(&self, key: &StorageKey) -> Result<PathBuf> {
        if key.first().chars().count() <= SHARD_PREFIX_CHARS {
            return Err(StoreError::InvalidKey(format!(
                "first segment of {} must be longer than {} characters",
                key, SHARD_PREFIX_CHARS
            )));
        }
        Ok(self.shard_path(key))
    }

    /// Directory holding every blob whose key starts with `prefix`
    ///
    /// A lone two-character segment addresses a whole shard directory.
    pub fn encode_prefix(&self, prefix: &StorageKey) -> Result<PathBuf> {
        if prefix.len() == 1 {
            return Ok(self.shard_path(prefix));
        }
        self.encode(prefix)
    }

    /// Canonical string form, shared by cache keys and decoded disk paths
    pub fn to_cache_string(&self, key: &StorageKey) -> String {
        let segments: Vec<&str> = key.segments().iter().map(String::as_str).collect();
        self.style.join(&segments)
    }

    /// Parse a cache string back into a key
    pub fn from_cache_string(&self, cache_key: &str) -> Result<StorageKey> {
        StorageKey::new(self.style.split(cache_key))
    }

    /// Recover the cache string of a blob found while walking the base
    /// directory
    ///
    /// Returns `None` for paths outside the base directory, staging files,
    /// and paths too shallow to carry a sharded key.
    pub fn decode(&self, path: &Path) -> Option<String> {
        let path_str = path.to_str()?;
        let relative = self.style.relative(&self.base_str, path_str);

        if relative.is_empty()
            || relative.starts_with('.')
            || relative.starts_with(|c: char| self.style.is_separator(c))
        {
            return None;
        }

        let parts = self.style.split(&relative);
        if parts.len() < 2 {
            return None;
        }

        // A different drive comes back as an absolute path, not a relative one
        if self.style.platform() == Platform::Windows && parts[0].ends_with(':') {
            return None;
        }

        // Undo the shard split: "ab" + "12cd34" -> "ab12cd34"
        let first = format!("{}{}", parts[0], parts[1]);
        let mut segments: Vec<&str> = Vec::with_capacity(parts.len() - 1);
        segments.push(&first);
        segments.extend_from_slice(&parts[2..]);

        Some(self.style.join(&segments))
    }

    /// Shard path without the length check
    fn shard_path(&self, key: &StorageKey) -> PathBuf {
        let first = key.first();
        let split_at = first
            .char_indices()
            .nth(SHARD_PREFIX_CHARS)
            .map_or(first.len(), |(idx, _)| idx);
        let (shard_prefix, shard_suffix) = first.split_at(split_at);

        let mut path = self.base_dir.join(shard_prefix);
        if !shard_suffix.is_empty() {
            path.push(shard_suffix);
        }
        for segment in &key.segments()[1..] {
            path.push(segment);
        }
        path
    }
}
