//! KeyCodec tests

use std::path::{Path, PathBuf};
use std::sync::Arc;

use shardstore::key::KeyCodec;
use shardstore::path::{PosixStyle, WindowsStyle};
use shardstore::{StorageKey, StoreError};

// =============================================================================
// Helper Functions
// =============================================================================

fn posix_codec() -> KeyCodec {
    KeyCodec::new("/srv/store", Arc::new(PosixStyle::new())).unwrap()
}

fn key(segments: &[&str]) -> StorageKey {
    StorageKey::new(segments.iter().copied()).unwrap()
}

// =============================================================================
// Encode Tests
// =============================================================================

#[test]
fn test_encode_single_segment() {
    let path = posix_codec().encode(&key(&["ab12cd34"])).unwrap();
    assert_eq!(path, PathBuf::from("/srv/store/ab/12cd34"));
}

#[test]
fn test_encode_nested_segments() {
    let path = posix_codec()
        .encode(&key(&["ab12cd34", "incremental", "ff00"]))
        .unwrap();
    assert_eq!(path, PathBuf::from("/srv/store/ab/12cd34/incremental/ff00"));
}

#[test]
fn test_encode_two_character_first_segment_rejected() {
    let result = posix_codec().encode(&key(&["ab"]));
    assert!(matches!(result, Err(StoreError::InvalidKey(_))));
}

#[test]
fn test_encode_prefix_shard_directory() {
    let codec = posix_codec();
    assert_eq!(
        codec.encode_prefix(&key(&["ab"])).unwrap(),
        PathBuf::from("/srv/store/ab")
    );
    assert_eq!(
        codec.encode_prefix(&key(&["ab12cd34"])).unwrap(),
        PathBuf::from("/srv/store/ab/12cd34")
    );
    assert_eq!(
        codec.encode_prefix(&key(&["ab12cd34", "snap"])).unwrap(),
        PathBuf::from("/srv/store/ab/12cd34/snap")
    );
}

// =============================================================================
// Cache String Tests
// =============================================================================

#[test]
fn test_cache_string_joins_with_separator() {
    let codec = posix_codec();
    assert_eq!(codec.to_cache_string(&key(&["ab12cd34", "snap"])), "ab12cd34/snap");
}

#[test]
fn test_cache_string_round_trip() {
    let codec = posix_codec();
    let original = key(&["ab12cd34", "incremental", "ff00"]);
    let parsed = codec
        .from_cache_string(&codec.to_cache_string(&original))
        .unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn test_windows_cache_string_uses_backslash() {
    let codec = KeyCodec::new("/srv/store", Arc::new(WindowsStyle::new())).unwrap();
    let original = key(&["ab12cd34", "snap"]);
    let cache_key = codec.to_cache_string(&original);
    assert_eq!(cache_key, "ab12cd34\\snap");
    assert_eq!(codec.from_cache_string(&cache_key).unwrap(), original);
}

// =============================================================================
// Decode Tests
// =============================================================================

#[test]
fn test_decode_inverts_encode() {
    let codec = posix_codec();
    for segments in [
        &["ab12cd34"][..],
        &["ab12cd34", "snapshot"][..],
        &["zz9", "incremental", "00ff", "deep"][..],
    ] {
        let k = key(segments);
        let path = codec.encode(&k).unwrap();
        assert_eq!(codec.decode(&path), Some(codec.to_cache_string(&k)), "{}", k);
    }
}

#[test]
fn test_decode_rejects_paths_outside_base() {
    let codec = posix_codec();
    assert_eq!(codec.decode(Path::new("/srv/other/ab/12cd34")), None);
    assert_eq!(codec.decode(Path::new("/srv/store-2/ab/12cd34")), None);
}

#[test]
fn test_decode_rejects_shallow_and_staging_paths() {
    let codec = posix_codec();
    assert_eq!(codec.decode(Path::new("/srv/store/ab")), None);
    assert_eq!(codec.decode(Path::new("/srv/store/.staging/1-0.tmp")), None);
}

#[test]
fn test_codec_requires_absolute_base() {
    let result = KeyCodec::new("store", Arc::new(PosixStyle::new()));
    assert!(matches!(result, Err(StoreError::Config(_))));
}
