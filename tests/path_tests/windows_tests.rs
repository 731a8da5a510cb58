//! Windows relative path tests

use shardstore::path::{PathStyle, WindowsStyle};

// =============================================================================
// Helper Functions
// =============================================================================

fn assert_relative(cases: &[(&str, &str, &str)]) {
    let style = WindowsStyle::new();
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
        ("C:\\a\\b", "C:\\a\\b", ""),
        ("c:/aaaa/bbbb", "c:/aaaa/bbbb", ""),
    ]);
}

#[test]
fn test_relative_is_case_insensitive() {
    assert_relative(&[
        ("C:\\A", "C:\\a\\c", "c"),
        ("c:/AaAa/bbbb", "c:/aaaa/bbbb", ""),
    ]);
}

#[test]
fn test_relative_to_child() {
    assert_relative(&[
        ("C:\\a\\b", "C:\\a\\b\\c", "c"),
        ("c:/aaaa/", "c:/aaaa/cccc", "cccc"),
        ("C:\\foo\\test", "C:\\foo\\test\\bar\\package.json", "bar\\package.json"),
    ]);
}

#[test]
fn test_relative_to_ancestor() {
    assert_relative(&[
        ("c:/aaaa/bbbb", "c:/aaaa", ".."),
        ("C:\\foo\\bar\\baz\\quux", "C:\\", "..\\..\\..\\.."),
    ]);
}

#[test]
fn test_relative_to_sibling() {
    assert_relative(&[
        ("c:/aaaa/bbbb", "c:/aaaa/cccc", "..\\cccc"),
        ("c:/aaaa/bbbb", "c:/cccc", "..\\..\\cccc"),
        ("c:/aaaaa/", "c:/aaaa/cccc", "..\\aaaa\\cccc"),
    ]);
}

#[test]
fn test_relative_common_name_prefix_is_not_a_common_dir() {
    assert_relative(&[
        ("C:\\foo\\bar\\baz-quux", "C:\\foo\\bar\\baz", "..\\baz"),
        ("C:\\baz-quux", "C:\\baz", "..\\baz"),
        ("C:\\baz", "C:\\baz-quux", "..\\baz-quux"),
    ]);
}

#[test]
fn test_relative_from_drive_root() {
    assert_relative(&[("c:/", "c:\\aaaa\\bbbb", "aaaa\\bbbb")]);
}

#[test]
fn test_relative_across_drives_returns_target() {
    assert_relative(&[
        ("c:/blah\\blah", "d:/games", "d:\\games"),
        ("c:/aaaa/bbbb", "d:\\", "d:\\"),
    ]);
}

#[test]
fn test_relative_unc_paths() {
    assert_relative(&[
        ("\\\\foo\\bar", "\\\\foo\\bar\\baz", "baz"),
        ("\\\\foo\\bar\\baz", "\\\\foo\\bar", ".."),
        ("\\\\foo\\baz", "\\\\foo\\baz-quux", "..\\baz-quux"),
        ("C:\\baz", "\\\\foo\\bar\\baz", "\\\\foo\\bar\\baz"),
    ]);
}

#[test]
fn test_relative_keeps_target_case() {
    let style = WindowsStyle::new();
    assert_eq!(style.relative("c:\\store", "C:\\Store\\AB\\Cd"), "AB\\Cd");
}

// =============================================================================
// Split Tests
// =============================================================================

#[test]
fn test_split_accepts_both_separators() {
    let style = WindowsStyle::new();
    assert_eq!(style.split("ab\\12cd/snap"), vec!["ab", "12cd", "snap"]);
    assert_eq!(style.join(&["ab12cd", "snap"]), "ab12cd\\snap");
}
