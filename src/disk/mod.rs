//! Disk Module
//!
//! Durable tier: one file per key under the sharded layout.
//!
//! ## Responsibilities
//! - Read, write and delete blobs at paths produced by the key codec
//! - Create parent directories on demand
//! - Publish writes atomically (staging file + rename)
//! - Enumerate every blob below a shard directory for range scans
//!
//! Filesystem access goes through the [`FileSystem`] capability so the
//! store can run on `tokio::fs` in production and on instrumented
//! implementations in tests.

mod fs;
mod store;

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;

pub use fs::TokioFileSystem;
pub use store::{DiskStore, STAGING_DIR};

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Full path of the entry
    pub path: PathBuf,

    /// Whether the entry is a directory (anything else counts as a file)
    pub is_dir: bool,
}

/// Filesystem primitives the disk tier is built on
///
/// Implementations report raw `io::Error`s; the disk store attaches paths
/// and decides which kinds (e.g. `NotFound`) are benign.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Check whether anything exists at `path`
    async fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Check whether `path` is an existing directory
    async fn is_dir(&self, path: &Path) -> io::Result<bool>;

    /// Create `path` and all missing parents
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Entries directly inside `path`
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Whole contents of the file at `path`
    async fn read(&self, path: &Path) -> io::Result<Bytes>;

    /// Create or truncate the file at `path` with `data`
    async fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    /// Atomically move `from` to `to`, replacing `to`
    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Delete the file at `path`
    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Delete the directory at `path` and everything below it
    async fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}
