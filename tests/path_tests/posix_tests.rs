//! POSIX relative path tests

use shardstore::path::{PathStyle, PosixStyle};

// =============================================================================
// Helper Functions
// =============================================================================

fn assert_relative(cases: &[(&str, &str, &str)]) {
    let style = PosixStyle::new();
    for (from, to, expected) in cases {
        assert_eq!(
            style.relative(from, to),
            *expected,
            "relative({:?}, {:?})",
            from,
            to
        );
    }
}

// =============================================================================
// Relative Path Tests
// =============================================================================

#[test]
fn test_relative_same_path_is_empty() {
    assert_relative(&[
        ("/a/b", "/a/b", ""),
        ("/var/lib", "/var/lib/", ""),
        ("/", "/", ""),
    ]);
}

#[test]
fn test_relative_to_child() {
    assert_relative(&[
        ("/a/b", "/a/b/c", "c"),
        ("/var/", "/var/lib", "lib"),
        ("/foo/test", "/foo/test/bar/package.json", "bar/package.json"),
    ]);
}

#[test]
fn test_relative_to_ancestor() {
    assert_relative(&[
        ("/a/b/c", "/a/b", ".."),
        ("/var/lib", "/var", ".."),
        ("/Users/a/web/b/test/mails", "/Users/a/web/b", "../.."),
    ]);
}

#[test]
fn test_relative_to_sibling() {
    assert_relative(&[
        ("/a/x", "/a/y", "../y"),
        ("/var/lib", "/var/apache", "../apache"),
        ("/var/lib", "/bin", "../../bin"),
    ]);
}

#[test]
fn test_relative_common_name_prefix_is_not_a_common_dir() {
    assert_relative(&[
        ("/foo/bar/baz-quux", "/foo/bar/baz", "../baz"),
        ("/foo/bar/baz", "/foo/bar/baz-quux", "../baz-quux"),
        ("/baz-quux", "/baz", "../baz"),
        ("/baz", "/baz-quux", "../baz-quux"),
    ]);
}

#[test]
fn test_relative_from_and_to_root() {
    assert_relative(&[
        ("/", "/var/lib", "var/lib"),
        ("/page1/page2/foo", "/", "../../.."),
    ]);
}

#[test]
fn test_relative_normalizes_inputs() {
    assert_relative(&[
        ("/a/./b/", "/a/b/c/../d", "d"),
        ("//a//b", "/a/c", "../c"),
    ]);
}

#[test]
fn test_relative_is_not_symmetric() {
    let style = PosixStyle::new();
    assert_eq!(style.relative("/a/b/c", "/a/d"), "../../d");
    assert_eq!(style.relative("/a/d", "/a/b/c"), "../b/c");
}

#[test]
fn test_relative_inputs_resolve_against_cwd() {
    let style = PosixStyle::with_cwd("/home/user");
    assert_eq!(style.relative("project", "/home/user/project/src"), "src");
    assert_eq!(style.relative("/home", "docs"), "user/docs");
}

// =============================================================================
// Resolve / Split Tests
// =============================================================================

#[test]
fn test_resolve_never_escapes_root() {
    let style = PosixStyle::new();
    assert_eq!(style.resolve("/a/../../b"), "/b");
}

#[test]
fn test_split_skips_empty_components() {
    let style = PosixStyle::new();
    assert_eq!(style.split("ab//12cd/snap/"), vec!["ab", "12cd", "snap"]);
}
