//! Cache implementation
//!
//! HashMap-based blob cache with RwLock for concurrency.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use parking_lot::RwLock;

/// In-memory map from cache key string to payload
///
/// ## Concurrency:
/// - `entries`: RwLock (many concurrent readers, exclusive writer)
/// - `size`: approximate payload bytes, updated under the write lock
pub struct BlobCache {
    /// Cache key string → payload
    entries: RwLock<HashMap<String, Bytes>>,

    /// Sum of all cached payload lengths
    size: AtomicUsize,
}

impl BlobCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            size: AtomicUsize::new(0),
        }
    }

    /// Get the payload cached under `key`
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.entries.read().get(key).cloned()
    }

    /// Check whether `key` is cached
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Cache `value` under `key`, replacing any previous payload
    pub fn put(&self, key: String, value: Bytes) {
        let added = value.len();
        let mut entries = self.entries.write();
        let removed = entries.insert(key, value).map_or(0, |old| old.len());
        self.size.fetch_add(added, Ordering::Relaxed);
        self.size.fetch_sub(removed, Ordering::Relaxed);
    }

    /// Cache `value` under `key` unless a payload is already there
    ///
    /// Returns the payload left in the cache: `value` if it was inserted,
    /// otherwise the one that was already present.
    pub fn put_if_absent(&self, key: String, value: Bytes) -> Bytes {
        let mut entries = self.entries.write();
        let len = value.len();
        let mut inserted = false;
        let stored = entries
            .entry(key)
            .or_insert_with(|| {
                inserted = true;
                value
            })
            .clone();
        if inserted {
            self.size.fetch_add(len, Ordering::Relaxed);
        }
        stored
    }

    /// Drop `key`; absent keys are ignored
    pub fn delete(&self, key: &str) -> Option<Bytes> {
        let removed = self.entries.write().remove(key);
        if let Some(ref value) = removed {
            self.size.fetch_sub(value.len(), Ordering::Relaxed);
        }
        removed
    }

    /// All cached key strings starting with `prefix`
    pub fn keys_with_prefix(&self, prefix: &str) -> HashSet<String> {
        self.entries
            .read()
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Drop every key starting with `prefix`, returning how many went
    pub fn delete_with_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        let mut freed = 0;
        entries.retain(|key, value| {
            let keep = !key.starts_with(prefix);
            if !keep {
                freed += value.len();
            }
            keep
        });
        self.size.fetch_sub(freed, Ordering::Relaxed);
        before - entries.len()
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the cache holds nothing
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Approximate payload bytes held
    pub fn size(&self) -> usize {
        self.size.load(Ordering::Relaxed)
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        entries.clear();
        self.size.store(0, Ordering::Relaxed);
    }
}

impl Default for BlobCache {
    fn default() -> Self {
        Self::new()
    }
}
