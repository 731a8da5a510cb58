//! Path Module
//!
//! Pure, platform-aware path arithmetic over string paths. No I/O.
//!
//! ## Responsibilities
//! - Lexically resolve a path to canonical absolute form
//! - Compute the shortest relative path between two absolute paths
//! - Split and join paths with the platform separator
//!
//! The adapter picks one [`PathStyle`] when it opens and keeps it. Disk paths
//! found while walking a shard are turned back into cache keys through
//! [`PathStyle::relative`], so both tiers agree on one canonical key string.
//!
//! ## Examples
//! ```text
//! POSIX    relative("/a/b/c", "/a/b")        = ".."
//!          relative("/a/x",   "/a/y")        = "../y"
//! Windows  relative("C:\\A",  "C:\\a\\c")    = "c"
//!          relative("C:\\a",  "D:\\b")       = "D:\\b"
//! ```

mod posix;
mod windows;

use std::fmt;
use std::sync::Arc;

pub use posix::PosixStyle;
pub use windows::WindowsStyle;

/// Which family of path rules applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// `/`-separated, case-sensitive
    Posix,

    /// `\`-separated, case-insensitive, drive and UNC roots
    Windows,
}

impl Platform {
    /// Detect the platform this binary was built for
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Posix => f.write_str("posix"),
            Platform::Windows => f.write_str("windows"),
        }
    }
}

/// Strategy for string path arithmetic on one platform
pub trait PathStyle: fmt::Debug + Send + Sync {
    /// The platform these rules belong to
    fn platform(&self) -> Platform;

    /// Primary path separator
    fn separator(&self) -> char;

    /// Lexically resolve `path` to canonical absolute form.
    ///
    /// `.` is dropped, `..` pops a component (never above the root), repeated
    /// and trailing separators collapse. Relative input is resolved against
    /// the style's working directory.
    fn resolve(&self, path: &str) -> String;

    /// Shortest relative path leading from `from` to `to`.
    ///
    /// Returns `""` when both resolve to the same location. The result never
    /// starts with a separator unless the paths share no root at all.
    fn relative(&self, from: &str, to: &str) -> String;

    /// True if `c` separates components on this platform
    fn is_separator(&self, c: char) -> bool {
        c == self.separator()
    }

    /// Split a path into its non-empty components
    fn split<'a>(&self, path: &'a str) -> Vec<&'a str> {
        path.split(|c: char| self.is_separator(c))
            .filter(|part| !part.is_empty())
            .collect()
    }

    /// Join components with the primary separator
    fn join(&self, parts: &[&str]) -> String {
        let sep = self.separator().to_string();
        parts.join(sep.as_str())
    }
}

/// Build the path rules for `platform` with default working directories
pub fn path_style_for(platform: Platform) -> Arc<dyn PathStyle> {
    match platform {
        Platform::Posix => Arc::new(PosixStyle::new()),
        Platform::Windows => Arc::new(WindowsStyle::new()),
    }
}

/// `s[start..end]`, or `""` when the range is empty
fn tail(s: &str, start: usize, end: usize) -> &str {
    if start >= end || start >= s.len() {
        ""
    } else {
        &s[start..end.min(s.len())]
    }
}
