//! BlobCache Tests
//!
//! Tests verify:
//! - Basic get/put/delete operations
//! - Size tracking
//! - Prefix queries and prefix deletion
//! - Concurrent access patterns

use std::sync::Arc;
use std::thread;

use bytes::Bytes;
use shardstore::cache::BlobCache;

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_cache_is_empty() {
    let cache = BlobCache::new();
    assert_eq!(cache.len(), 0);
    assert_eq!(cache.size(), 0);
    assert!(cache.is_empty());
}

#[test]
fn test_put_and_get() {
    let cache = BlobCache::new();

    cache.put("ab12/snap".to_string(), Bytes::from_static(b"\x01\x02\x03"));

    assert_eq!(cache.get("ab12/snap"), Some(Bytes::from_static(b"\x01\x02\x03")));
    assert!(cache.contains("ab12/snap"));
}

#[test]
fn test_get_nonexistent_key() {
    let cache = BlobCache::new();
    assert_eq!(cache.get("missing"), None);
}

#[test]
fn test_put_overwrites_existing() {
    let cache = BlobCache::new();

    cache.put("k".to_string(), Bytes::from_static(b"first"));
    cache.put("k".to_string(), Bytes::from_static(b"second!"));

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("k"), Some(Bytes::from_static(b"second!")));
    assert_eq!(cache.size(), 7);
}

#[test]
fn test_put_if_absent_keeps_existing() {
    let cache = BlobCache::new();

    let stored = cache.put_if_absent("ab12/x".to_string(), Bytes::from_static(b"first"));
    assert_eq!(stored, Bytes::from_static(b"first"));

    let stored = cache.put_if_absent("ab12/x".to_string(), Bytes::from_static(b"second!"));
    assert_eq!(stored, Bytes::from_static(b"first"));
    assert_eq!(cache.get("ab12/x"), Some(Bytes::from_static(b"first")));
    assert_eq!(cache.size(), 5);
}

#[test]
fn test_delete_returns_removed_value() {
    let cache = BlobCache::new();

    cache.put("k".to_string(), Bytes::from_static(b"value"));

    assert_eq!(cache.delete("k"), Some(Bytes::from_static(b"value")));
    assert_eq!(cache.delete("k"), None);
    assert!(cache.is_empty());
    assert_eq!(cache.size(), 0);
}

#[test]
fn test_clear() {
    let cache = BlobCache::new();
    cache.put("a".to_string(), Bytes::from_static(b"1"));
    cache.put("b".to_string(), Bytes::from_static(b"22"));

    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.size(), 0);
}

// =============================================================================
// Prefix Tests
// =============================================================================

#[test]
fn test_keys_with_prefix() {
    let cache = BlobCache::new();
    cache.put("ab12/a".to_string(), Bytes::from_static(b"1"));
    cache.put("ab12/b".to_string(), Bytes::from_static(b"2"));
    cache.put("ab13/a".to_string(), Bytes::from_static(b"3"));

    let mut keys: Vec<String> = cache.keys_with_prefix("ab12").into_iter().collect();
    keys.sort();

    assert_eq!(keys, vec!["ab12/a".to_string(), "ab12/b".to_string()]);
}

#[test]
fn test_keys_with_prefix_is_string_prefix() {
    let cache = BlobCache::new();
    cache.put("ab12".to_string(), Bytes::from_static(b"1"));
    cache.put("ab123/x".to_string(), Bytes::from_static(b"2"));

    assert_eq!(cache.keys_with_prefix("ab12").len(), 2);
    assert_eq!(cache.keys_with_prefix("ab12/").len(), 0);
}

#[test]
fn test_delete_with_prefix() {
    let cache = BlobCache::new();
    cache.put("ab12/a".to_string(), Bytes::from_static(b"11"));
    cache.put("ab12/b".to_string(), Bytes::from_static(b"22"));
    cache.put("cd34/a".to_string(), Bytes::from_static(b"333"));

    let removed = cache.delete_with_prefix("ab12");

    assert_eq!(removed, 2);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.size(), 3);
    assert!(cache.contains("cd34/a"));
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_writers_and_readers() {
    let cache = Arc::new(BlobCache::new());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..100 {
                    let key = format!("t{}/{}", t, i);
                    cache.put(key.clone(), Bytes::from(vec![t as u8; 4]));
                    assert!(cache.get(&key).is_some());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), 800);
    assert_eq!(cache.size(), 3200);
    assert_eq!(cache.keys_with_prefix("t3/").len(), 100);
}
