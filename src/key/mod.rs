//! Key Module
//!
//! Hierarchical storage keys and their mapping onto the sharded directory
//! layout.
//!
//! ## Responsibilities
//! - Validate key segments at construction
//! - Map keys to blob paths and key prefixes to shard directories
//! - Produce the canonical cache string shared by both tiers
//! - Recover cache strings from paths found on disk
//!
//! ## On-Disk Layout
//! ```text
//! {base_dir}/
//!   └── ab/                  first two characters of segment 0
//!       └── 12cd34/          rest of segment 0
//!           ├── snapshot     segment 1 (a file)
//!           └── incremental/ segment 1 (a directory)
//!               └── 99ff     segment 2
//! ```
//! This layout is persisted; changing it orphans existing stores.

mod codec;
mod storage_key;

pub use codec::KeyCodec;
pub use storage_key::StorageKey;

/// Number of leading characters of the first segment used as the shard
/// directory
pub const SHARD_PREFIX_CHARS: usize = 2;
