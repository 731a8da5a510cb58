//! Windows path rules
//!
//! `\` separator (`/` accepted on input), ASCII case-insensitive comparison,
//! drive roots (`C:\`), drive-relative paths (`C:foo`), rooted paths without
//! a drive (`\foo`) and UNC roots (`\\server\share`).

use super::{tail, Platform, PathStyle};

const SEP: u8 = b'\\';

/// A path split into its root and raw components
struct Parsed<'a> {
    /// `C:`, `\\server\share`, or empty
    device: String,

    /// Whether the path starts at the device root
    absolute: bool,

    /// Components after the root, `.` and `..` not yet applied
    parts: Vec<&'a str>,
}

impl<'a> Parsed<'a> {
    fn parse(path: &'a str) -> Self {
        let bytes = path.as_bytes();
        let is_sep = |b: u8| b == b'\\' || b == b'/';

        // UNC: two separators, a server name, a share name
        if bytes.len() > 2 && is_sep(bytes[0]) && is_sep(bytes[1]) && !is_sep(bytes[2]) {
            let mut names = path[2..].splitn(3, |c: char| c == '\\' || c == '/');
            let server = names.next().unwrap_or("");
            let share = names.next().unwrap_or("");
            if !server.is_empty() && !share.is_empty() {
                let rest = names.next().unwrap_or("");
                return Self {
                    device: format!("\\\\{}\\{}", server, share),
                    absolute: true,
                    parts: split_parts(rest),
                };
            }
        }

        // Drive letter
        if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
            let rest = &path[2..];
            return Self {
                device: path[..2].to_string(),
                absolute: rest.starts_with(['\\', '/']),
                parts: split_parts(rest),
            };
        }

        Self {
            device: String::new(),
            absolute: path.starts_with(['\\', '/']),
            parts: split_parts(path),
        }
    }
}

fn split_parts(path: &str) -> Vec<&str> {
    path.split(['\\', '/']).filter(|part| !part.is_empty()).collect()
}

/// Path arithmetic for `\`-separated paths
#[derive(Debug, Clone)]
pub struct WindowsStyle {
    /// Resolved absolute directory for relative inputs
    cwd: String,
}

impl WindowsStyle {
    /// Rules with `C:\` as the working directory
    pub fn new() -> Self {
        Self {
            cwd: "C:\\".to_string(),
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

impl Default for WindowsStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl PathStyle for WindowsStyle {
    fn platform(&self) -> Platform {
        Platform::Windows
    }

    fn separator(&self) -> char {
        '\\'
    }

    fn is_separator(&self, c: char) -> bool {
        c == '\\' || c == '/'
    }

    fn resolve(&self, path: &str) -> String {
        let target = Parsed::parse(path);
        let cwd = Parsed::parse(&self.cwd);

        let (device, mut parts) = if target.absolute {
            let device = if target.device.is_empty() {
                cwd.device.clone()
            } else {
                target.device.clone()
            };
            (device, Vec::new())
        } else if target.device.is_empty() || target.device.eq_ignore_ascii_case(&cwd.device) {
            (cwd.device.clone(), cwd.parts.clone())
        } else {
            // Drive-relative on another drive: no per-drive cwd, use its root
            (target.device.clone(), Vec::new())
        };

        for part in target.parts {
            match part {
                "." => {}
                ".." => {
                    parts.pop();
                }
                part => parts.push(part),
            }
        }

        format!("{}\\{}", device, parts.join("\\"))
    }

    fn relative(&self, from: &str, to: &str) -> String {
        if from == to {
            return String::new();
        }

        let from_orig = self.resolve(from);
        let to_orig = self.resolve(to);

        // ASCII folding keeps byte offsets identical between the folded and
        // original strings
        let from = from_orig.to_ascii_lowercase();
        let to = to_orig.to_ascii_lowercase();
        if from == to {
            return String::new();
        }

        let f = from.as_bytes();
        let t = to.as_bytes();

        // Leading separators (UNC) and trailing separators are not compared
        let mut from_start = 0;
        while from_start < f.len() && f[from_start] == SEP {
            from_start += 1;
        }
        let mut from_end = f.len();
        while from_end > from_start + 1 && f[from_end - 1] == SEP {
            from_end -= 1;
        }
        let from_len = from_end - from_start;

        let mut to_start = 0;
        while to_start < t.len() && t[to_start] == SEP {
            to_start += 1;
        }
        let mut to_end = t.len();
        while to_end > to_start + 1 && t[to_end - 1] == SEP {
            to_end -= 1;
        }
        let to_len = to_end - to_start;

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

        let common = if i != length {
            match last_common_sep {
                // Mismatch before any shared separator: different roots
                None => return to_orig,
                Some(sep) => sep,
            }
        } else {
            if to_len > length {
                if t[to_start + i] == SEP {
                    // `from` is an ancestor of `to`: C:\foo\bar -> C:\foo\bar\baz
                    return tail(&to_orig, to_start + i + 1, to_orig.len()).to_string();
                }
                if i == 2 {
                    // `from` is the drive root: C:\ -> C:\foo
                    return tail(&to_orig, to_start + i, to_orig.len()).to_string();
                }
            }
            if from_len > length {
                if f[from_start + i] == SEP {
                    // `to` is an ancestor of `from`: C:\foo\bar -> C:\foo
                    last_common_sep = Some(i);
                } else if i == 2 {
                    // `to` is the drive root: C:\foo\bar -> C:\
                    last_common_sep = Some(3);
                }
            }
            last_common_sep.unwrap_or(0)
        };

        let mut out = String::new();
        for idx in from_start + common + 1..=from_end {
            if idx == from_end || f[idx] == SEP {
                out.push_str(if out.is_empty() { ".." } else { "\\.." });
            }
        }

        let mut to_start = to_start + common;
        if !out.is_empty() {
            out.push_str(tail(&to_orig, to_start, to_end));
            return out;
        }

        if to_orig.as_bytes().get(to_start) == Some(&SEP) {
            to_start += 1;
        }
        tail(&to_orig, to_start, to_end).to_string()
    }
}
