//! # shardstore
//!
//! A filesystem-backed blob store for document-sync engines with:
//! - Hierarchical keys sharded into a two-level directory layout
//! - A write-through, read-through in-memory cache
//! - Prefix-range scans merging cache-only and disk-only keys
//! - Platform-correct (POSIX and Windows) relative path arithmetic
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Document-Sync Engine                     │
//! │   load / save / remove / load_range / remove_range          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   FsStorageAdapter                          │
//! │        (read-through, write-through, range union)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  BlobCache  │          │  DiskStore  │
//!   │  (RwLock)   │          │ (tokio::fs) │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │  KeyCodec   │
//!                           │ + PathStyle │
//!                           └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use shardstore::{Config, FsStorageAdapter, StorageAdapter, StorageKey};
//!
//! # async fn demo() -> shardstore::Result<()> {
//! let store = FsStorageAdapter::open(Config::builder().base_dir("./data").build()).await?;
//! let key = StorageKey::new(["ab12cd34", "snapshot"])?;
//! store.save(&key, bytes::Bytes::from_static(b"\x01\x02\x03")).await?;
//! assert!(store.load(&key).await?.is_some());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod path;
pub mod key;
pub mod cache;
pub mod disk;
pub mod adapter;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::Config;
pub use adapter::{Chunk, FsStorageAdapter, StorageAdapter};
pub use key::StorageKey;
pub use path::Platform;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of shardstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
