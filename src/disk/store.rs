//! Disk Store
//!
//! Blob-level operations over a [`FileSystem`].

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;

use crate::error::{Result, StoreError};

use super::FileSystem;

/// Directory under the base directory holding in-flight writes
pub const STAGING_DIR: &str = ".staging";

/// Durable blob storage
///
/// ## Atomicity:
/// With a staging directory configured, `write` lands the payload in
/// `{base}/.staging/` and renames it over the target, so a concurrent
/// `read` sees either the old or the new blob, never a partial one.
pub struct DiskStore {
    /// Filesystem capability
    fs: Arc<dyn FileSystem>,

    /// Where staged writes go, `None` for direct writes
    staging_dir: Option<PathBuf>,

    /// Unique suffix for staging file names
    next_staging_id: AtomicU64,
}

impl DiskStore {
    /// A store writing straight to the target path
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            staging_dir: None,
            next_staging_id: AtomicU64::new(0),
        }
    }

    /// A store staging writes under `{base_dir}/.staging`
    ///
    /// The staging directory must be on the same filesystem as the blobs
    /// for the rename to be atomic, hence it lives under the base.
    pub fn with_staging(fs: Arc<dyn FileSystem>, base_dir: &Path) -> Self {
        Self {
            fs,
            staging_dir: Some(base_dir.join(STAGING_DIR)),
            next_staging_id: AtomicU64::new(0),
        }
    }

    /// Check whether a blob or directory exists at `path`
    pub async fn exists(&self, path: &Path) -> Result<bool> {
        match self.fs.exists(path).await {
            Ok(found) => Ok(found),
            Err(e) if is_absent(&e) => Ok(false),
            Err(e) => Err(StoreError::io_at(path, e)),
        }
    }

    /// Read the blob at `path`
    ///
    /// Returns:
    /// - `Ok(Some(bytes))`: blob found
    /// - `Ok(None)`: nothing there, or a directory (a key prefix, not a blob)
    pub async fn read(&self, path: &Path) -> Result<Option<Bytes>> {
        match self.fs.read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if is_absent(&e) => Ok(None),
            Err(e) => {
                if self.fs.is_dir(path).await.unwrap_or(false) {
                    return Ok(None);
                }
                Err(StoreError::io_at(path, e))
            }
        }
    }

    /// Write `data` to `path`, creating missing parent directories
    pub async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            self.fs
                .create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io_at(parent, e))?;
        }

        let Some(staging_dir) = &self.staging_dir else {
            return self
                .fs
                .write(path, data)
                .await
                .map_err(|e| StoreError::io_at(path, e));
        };

        self.fs
            .create_dir_all(staging_dir)
            .await
            .map_err(|e| StoreError::io_at(staging_dir, e))?;

        let id = self.next_staging_id.fetch_add(1, Ordering::Relaxed);
        let staged = staging_dir.join(format!("{}-{}.tmp", std::process::id(), id));

        self.fs
            .write(&staged, data)
            .await
            .map_err(|e| StoreError::io_at(&staged, e))?;

        if let Err(e) = self.fs.rename(&staged, path).await {
            if let Err(cleanup) = self.fs.remove_file(&staged).await {
                tracing::warn!("Failed to remove staged file {}: {}", staged.display(), cleanup);
            }
            return Err(StoreError::io_at(path, e));
        }

        Ok(())
    }

    /// Delete the blob at `path`; a missing blob is not an error
    pub async fn delete(&self, path: &Path) -> Result<()> {
        match self.fs.remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if is_absent(&e) => Ok(()),
            Err(e) => Err(StoreError::io_at(path, e)),
        }
    }

    /// Delete `dir` and everything below it; a missing directory is not an
    /// error
    pub async fn delete_tree(&self, dir: &Path) -> Result<()> {
        match self.fs.remove_dir_all(dir).await {
            Ok(()) => Ok(()),
            Err(e) if is_absent(&e) => Ok(()),
            Err(e) => Err(StoreError::io_at(dir, e)),
        }
    }

    /// Every file below `dir`, at any depth
    ///
    /// A missing `dir` yields an empty list; a file yields itself.
    /// Subdirectories that disappear mid-walk (a concurrent range removal)
    /// are skipped.
    pub async fn list_files_recursive(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !self.exists(dir).await? {
            return Ok(Vec::new());
        }
        let is_dir = self
            .fs
            .is_dir(dir)
            .await
            .map_err(|e| StoreError::io_at(dir, e))?;
        if !is_dir {
            return Ok(vec![dir.to_path_buf()]);
        }

        let mut files = Vec::new();
        let mut pending = vec![dir.to_path_buf()];

        while let Some(current) = pending.pop() {
            let entries = match self.fs.read_dir(&current).await {
                Ok(entries) => entries,
                Err(e) if is_absent(&e) => continue,
                Err(e) => return Err(StoreError::io_at(&current, e)),
            };

            for entry in entries {
                if entry.is_dir {
                    pending.push(entry.path);
                } else {
                    files.push(entry.path);
                }
            }
        }

        Ok(files)
    }
}

/// Errors meaning "nothing at this path", including a path that runs
/// through a file (`ab/12cd34` is a blob, `ab/12cd34/snap` asked for)
fn is_absent(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
