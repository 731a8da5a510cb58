//! Adapter Module
//!
//! The public face of the store: a cache-fronted, sharded blob store.
//!
//! ## Responsibilities
//! - Read through the cache to the disk, populating the cache on disk hits
//! - Write through to both tiers
//! - Remove single keys and whole key prefixes from both tiers
//! - Answer prefix-range queries over the union of both tiers

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};

use crate::cache::BlobCache;
use crate::config::Config;
use crate::disk::{DiskStore, FileSystem, TokioFileSystem};
use crate::error::{Result, StoreError};
use crate::key::{KeyCodec, StorageKey};
use crate::path::path_style_for;

/// One result of a range query
///
/// `data` is `None` when the key was seen in a tier but its payload could
/// not be loaded; callers treat that as a gap, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub key: StorageKey,
    pub data: Option<Bytes>,
}

/// Durable key-value storage as seen by a document-sync engine
///
/// Absence is `Ok(None)`, never an error.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Payload stored under `key`, if any
    async fn load(&self, key: &StorageKey) -> Result<Option<Bytes>>;

    /// Store `data` under `key`, replacing any previous payload
    async fn save(&self, key: &StorageKey, data: Bytes) -> Result<()>;

    /// Forget `key`; removing an absent key succeeds
    async fn remove(&self, key: &StorageKey) -> Result<()>;

    /// Every key starting with `prefix`, with its payload. Order is
    /// unspecified.
    async fn load_range(&self, prefix: &StorageKey) -> Result<Vec<Chunk>>;

    /// Forget every key starting with `prefix`
    async fn remove_range(&self, prefix: &StorageKey) -> Result<()>;
}

#[async_trait]
impl<T: StorageAdapter + ?Sized> StorageAdapter for Arc<T> {
    async fn load(&self, key: &StorageKey) -> Result<Option<Bytes>> {
        (**self).load(key).await
    }

    async fn save(&self, key: &StorageKey, data: Bytes) -> Result<()> {
        (**self).save(key, data).await
    }

    async fn remove(&self, key: &StorageKey) -> Result<()> {
        (**self).remove(key).await
    }

    async fn load_range(&self, prefix: &StorageKey) -> Result<Vec<Chunk>> {
        (**self).load_range(prefix).await
    }

    async fn remove_range(&self, prefix: &StorageKey) -> Result<()> {
        (**self).remove_range(prefix).await
    }
}

/// Filesystem-backed storage adapter with a write-through memory cache
///
/// ## Consistency Model
///
/// - **Reads**: cache first; a disk hit is copied into the cache
/// - **Writes/removals**: both tiers are driven concurrently and both are
///   attempted. There is no transaction across tiers: if the disk side
///   fails after the cache side succeeded, the error is returned as
///   [`StoreError::PartialTierFailure`] and the cache is not rolled back.
///   A later successful operation on the same key brings the tiers back in
///   line.
/// - **Range scans**: a cached payload wins over the disk copy of the same
///   key, because every key is loaded through [`load`](StorageAdapter::load)
///
/// Each adapter owns its cache; two adapters over the same directory do not
/// see each other's cache.
pub struct FsStorageAdapter {
    /// Adapter configuration
    config: Config,

    /// Key ↔ path mapping (owns the resolved base directory)
    codec: KeyCodec,

    /// Volatile tier
    cache: BlobCache,

    /// Durable tier
    disk: DiskStore,
}

impl FsStorageAdapter {
    /// Open or create a store on the host filesystem
    pub async fn open(config: Config) -> Result<Self> {
        Self::open_with(config, Arc::new(TokioFileSystem::new())).await
    }

    /// Open or create a store on the given filesystem
    ///
    /// On open:
    /// 1. Validate the configuration
    /// 2. Resolve the base directory to an absolute path
    /// 3. Create the base directory
    /// 4. Fix the path rules for the configured platform
    pub async fn open_with(config: Config, fs: Arc<dyn FileSystem>) -> Result<Self> {
        config.validate()?;

        let base_dir = std::path::absolute(&config.base_dir).map_err(|e| {
            StoreError::Config(format!(
                "cannot resolve base directory {}: {}",
                config.base_dir.display(),
                e
            ))
        })?;

        fs.create_dir_all(&base_dir)
            .await
            .map_err(|e| StoreError::io_at(&base_dir, e))?;

        let platform = config.platform();
        let codec = KeyCodec::new(base_dir.clone(), path_style_for(platform))?;

        let disk = if config.atomic_writes {
            DiskStore::with_staging(fs, &base_dir)
        } else {
            DiskStore::new(fs)
        };

        tracing::info!(
            "Opened store at {} ({} paths)",
            base_dir.display(),
            platform
        );

        Ok(Self {
            config,
            codec,
            cache: BlobCache::new(),
            disk,
        })
    }

    /// Open with a base directory (convenience method)
    ///
    /// Uses default config with the specified base directory
    pub async fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().base_dir(path).build()).await
    }

    /// Wrap a disk-side failure of a dual-tier operation
    fn partial_failure(operation: &'static str, key: &StorageKey, source: StoreError) -> StoreError {
        tracing::warn!("{} of {} failed on disk after cache update: {}", operation, key, source);
        StoreError::PartialTierFailure {
            operation,
            key: key.to_string(),
            source: Box::new(source),
        }
    }

    /// Union of cached and on-disk key strings under `prefix`
    async fn range_keys(&self, prefix: &StorageKey) -> Result<HashSet<String>> {
        let prefix_string = self.codec.to_cache_string(prefix);
        let dir = self.codec.encode_prefix(prefix)?;

        let mut keys = self.cache.keys_with_prefix(&prefix_string);
        let cached = keys.len();

        let files = self.disk.list_files_recursive(&dir).await?;
        let on_disk = files.len();

        for file in files {
            match self.codec.decode(&file) {
                Some(key) => {
                    keys.insert(key);
                }
                None => tracing::warn!("Skipping unrecognized file {}", file.display()),
            }
        }

        tracing::debug!(
            "Range {}: {} cached, {} on disk, {} distinct",
            prefix,
            cached,
            on_disk,
            keys.len()
        );

        Ok(keys)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the absolute base directory
    pub fn base_dir(&self) -> &Path {
        self.codec.base_dir()
    }

    /// Get the key codec
    pub fn codec(&self) -> &KeyCodec {
        &self.codec
    }

    /// Get the cache tier
    pub fn cache(&self) -> &BlobCache {
        &self.cache
    }

    /// Drop every cached payload; the disk is untouched
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl StorageAdapter for FsStorageAdapter {
    async fn load(&self, key: &StorageKey) -> Result<Option<Bytes>> {
        let path = self.codec.encode(key)?;
        let cache_key = self.codec.to_cache_string(key);

        if let Some(data) = self.cache.get(&cache_key) {
            tracing::trace!("Cache hit for {}", key);
            return Ok(Some(data));
        }

        tracing::trace!("Cache miss for {}, reading {}", key, path.display());
        let data = self.disk.read(&path).await?;

        // A save that landed while the read was in flight keeps its payload
        Ok(data.map(|data| self.cache.put_if_absent(cache_key, data)))
    }

    async fn save(&self, key: &StorageKey, data: Bytes) -> Result<()> {
        let path = self.codec.encode(key)?;
        let cache_key = self.codec.to_cache_string(key);

        tracing::debug!("Saving {} ({} bytes)", key, data.len());

        let cache_write = async { self.cache.put(cache_key, data.clone()) };
        let disk_write = self.disk.write(&path, &data);
        let ((), disk_result) = tokio::join!(cache_write, disk_write);

        disk_result.map_err(|e| Self::partial_failure("save", key, e))
    }

    async fn remove(&self, key: &StorageKey) -> Result<()> {
        let path = self.codec.encode(key)?;
        let cache_key = self.codec.to_cache_string(key);

        tracing::debug!("Removing {}", key);

        let cache_delete = async { self.cache.delete(&cache_key) };
        let disk_delete = self.disk.delete(&path);
        let (_, disk_result) = tokio::join!(cache_delete, disk_delete);

        disk_result.map_err(|e| Self::partial_failure("remove", key, e))
    }

    async fn load_range(&self, prefix: &StorageKey) -> Result<Vec<Chunk>> {
        let keys = self.range_keys(prefix).await?;

        let parsed = keys
            .into_iter()
            .filter_map(|cache_key| match self.codec.from_cache_string(&cache_key) {
                Ok(key) => Some(key),
                Err(e) => {
                    tracing::warn!("Skipping malformed key {:?}: {}", cache_key, e);
                    None
                }
            })
            .collect::<Vec<_>>();

        let this = self;
        let chunks = stream::iter(parsed)
            .map(move |key| async move {
                let data = match this.load(&key).await {
                    Ok(data) => data,
                    Err(e) => {
                        tracing::warn!("Failed to load {} during range scan: {}", key, e);
                        None
                    }
                };
                if data.is_none() {
                    tracing::debug!("Range scan found {} without a payload", key);
                }
                Chunk { key, data }
            })
            .buffer_unordered(self.config.load_concurrency)
            .collect::<Vec<_>>()
            .await;

        Ok(chunks)
    }

    async fn remove_range(&self, prefix: &StorageKey) -> Result<()> {
        let prefix_string = self.codec.to_cache_string(prefix);
        let dir = self.codec.encode_prefix(prefix)?;

        tracing::debug!("Removing range {} ({})", prefix, dir.display());

        let cache_delete = async { self.cache.delete_with_prefix(&prefix_string) };
        let disk_delete = self.disk.delete_tree(&dir);
        let (evicted, disk_result) = tokio::join!(cache_delete, disk_delete);

        tracing::trace!("Evicted {} cached entries under {}", evicted, prefix);

        disk_result.map_err(|e| Self::partial_failure("remove_range", prefix, e))
    }
}
