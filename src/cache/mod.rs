//! Cache Module
//!
//! Volatile in-memory tier in front of the disk.
//!
//! ## Responsibilities
//! - Serve repeated reads without touching the disk
//! - Mirror every blob written or read through the adapter
//! - Answer prefix queries over the cached key strings
//!
//! ## Data Structure Choice
//! A HashMap behind a parking_lot RwLock:
//! - No ordering needed; prefix queries are a linear scan bounded by the
//!   working set, not by the size of the disk
//! - No eviction; entries live until removed or the process exits
//! - The lock is never held across an await point

mod table;

pub use table::BlobCache;
