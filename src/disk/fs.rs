//! tokio::fs backed filesystem

use std::io;
use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;

use super::{DirEntry, FileSystem};

/// The host filesystem through `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for TokioFileSystem {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        fs::try_exists(path).await
    }

    async fn is_dir(&self, path: &Path) -> io::Result<bool> {
        match fs::metadata(path).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path).await
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(path).await?;
        while let Some(entry) = dir.next_entry().await? {
            let is_dir = entry.file_type().await?.is_dir();
            entries.push(DirEntry {
                path: entry.path(),
                is_dir,
            });
        }
        Ok(entries)
    }

    async fn read(&self, path: &Path) -> io::Result<Bytes> {
        fs::read(path).await.map(Bytes::from)
    }

    async fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        fs::write(path, data).await
    }

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }

    async fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path).await
    }
}
