//! StorageKey
//!
//! Ordered, validated sequence of path-safe segments.

use std::fmt;

use crate::error::{Result, StoreError};

use super::SHARD_PREFIX_CHARS;

/// A hierarchical key, e.g. `["ab12cd34", "snapshot"]`
///
/// Every segment is non-empty, free of `/`, `\` and NUL, and does not start
/// with `.`; the first segment has at least two characters so it can be
/// sharded. Two keys are equal only if all their segments are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey {
    segments: Vec<String>,
}

impl StorageKey {
    /// Build a key, validating every segment
    pub fn new<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();

        let first = segments
            .first()
            .ok_or_else(|| StoreError::InvalidKey("key has no segments".to_string()))?;

        for segment in &segments {
            validate_segment(segment)?;
        }

        if first.chars().count() < SHARD_PREFIX_CHARS {
            return Err(StoreError::InvalidKey(format!(
                "first segment {:?} is shorter than {} characters",
                first, SHARD_PREFIX_CHARS
            )));
        }

        Ok(Self { segments })
    }

    /// All segments in order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The first (sharded) segment
    pub fn first(&self) -> &str {
        &self.segments[0]
    }

    /// Number of segments (always at least one)
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; keys are never empty
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// A new key with `segment` appended
    pub fn child(&self, segment: impl Into<String>) -> Result<Self> {
        let segment = segment.into();
        validate_segment(&segment)?;
        let mut segments = self.segments.clone();
        segments.push(segment);
        Ok(Self { segments })
    }
}

fn validate_segment(segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(StoreError::InvalidKey("empty segment".to_string()));
    }
    if segment.contains(['/', '\\', '\0']) {
        return Err(StoreError::InvalidKey(format!(
            "segment {:?} contains a path separator",
            segment
        )));
    }
    if segment.starts_with('.') {
        return Err(StoreError::InvalidKey(format!(
            "segment {:?} starts with '.'",
            segment
        )));
    }
    Ok(())
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.segments.join(", "))
    }
}
