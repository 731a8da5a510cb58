//! POSIX path rules
//!
//! `/` separator, byte-exact comparison, a single root.

use super::{tail, Platform, PathStyle};

const SEP: u8 = b'/';

/// Path arithmetic for `/`-separated paths
#[derive(Debug, Clone)]
pub struct PosixStyle {
    /// Resolved absolute directory for relative inputs
    cwd: String,
}

impl PosixStyle {
    /// Rules with `/` as the working directory
    pub fn new() -> Self {
        Self {
            cwd: "/".to_string(),
        }
    }

    /// Rules resolving relative inputs against `cwd`
    pub fn with_cwd(cwd: impl AsRef<str>) -> Self {
        let cwd = Self::new().resolve(cwd.as_ref());
        Self { cwd }
    }

    /// The working directory relative inputs resolve against
    pub fn cwd(&self) -> &str {
        &self.cwd
    }
}

impl Default for PosixStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl PathStyle for PosixStyle {
    fn platform(&self) -> Platform {
        Platform::Posix
    }

    fn separator(&self) -> char {
        '/'
    }

    fn resolve(&self, path: &str) -> String {
        let base = if path.starts_with('/') { "" } else { self.cwd.as_str() };

        let mut parts: Vec<&str> = Vec::new();
        for part in base.split('/').chain(path.split('/')) {
            match part {
                "" | "." => {}
                ".." => {
                    parts.pop();
                }
                part => parts.push(part),
            }
        }

        format!("/{}", parts.join("/"))
    }

    fn relative(&self, from: &str, to: &str) -> String {
        if from == to {
            return String::new();
        }

        let from = self.resolve(from);
        let to = self.resolve(to);
        if from == to {
            return String::new();
        }

        // Both start with the root separator, so comparison starts after it
        let f = from.as_bytes();
        let t = to.as_bytes();
        let from_start = 1;
        let from_end = f.len();
        let from_len = from_end - from_start;
        let to_start = 1;
        let to_len = t.len() - to_start;

        // Longest common prefix, remembering the last separator inside it
        let length = from_len.min(to_len);
        let mut last_common_sep: Option<usize> = None;
        let mut i = 0;
        while i < length {
            let c = f[from_start + i];
            if c != t[to_start + i] {
                break;
            }
            if c == SEP {
                last_common_sep = Some(i);
            }
            i += 1;
        }

        if i == length {
            if to_len > length {
                if t[to_start + i] == SEP {
                    // `from` is an ancestor of `to`: /foo/bar -> /foo/bar/baz
                    return to[to_start + i + 1..].to_string();
                }
                if i == 0 {
                    // `from` is the root: / -> /foo
                    return to[to_start + i..].to_string();
                }
            } else if from_len > length {
                if f[from_start + i] == SEP {
                    // `to` is an ancestor of `from`: /foo/bar/baz -> /foo/bar
                    last_common_sep = Some(i);
                } else if i == 0 {
                    // `to` is the root: /foo/bar -> /
                    last_common_sep = Some(0);
                }
            }
        }

        // Offset just past the common separator (0 when nothing is shared)
        let cut = last_common_sep.map_or(0, |sep| sep + 1);

        let mut out = String::new();
        for idx in from_start + cut..=from_end {
            if idx == from_end || f[idx] == SEP {
                out.push_str(if out.is_empty() { ".." } else { "/.." });
            }
        }

        // The remainder of `to` keeps its leading separator
        out.push_str(tail(&to, to_start + cut - 1, to.len()));
        out
    }
}
