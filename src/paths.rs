use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::PathBuf;

/// Resolves a leading `~` against `$HOME`. Returns `None` when the path has
/// no tilde prefix or `HOME` is unset.
pub fn expand_tilde(path: &str) -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    if path == "~" {
        Some(PathBuf::from(home))
    } else {
        path.strip_prefix("~/").map(|rest| PathBuf::from(home).join(rest))
    }
}

/// Last `/`-separated segment of `path`, empty when it ends in a slash.
pub fn base_name(path: &OsStr) -> &OsStr {
    let bytes = path.as_bytes();
    let start = bytes.iter().rposition(|&b| b == b'/').map_or(0, |i| i + 1);
    OsStr::from_bytes(&bytes[start..])
}

/// Byte offset of the first occurrence of `needle` in `haystack`.
pub fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Replaces every `from` in `s` with `to`, byte for byte.
pub fn replace_os(s: &OsStr, from: &str, to: &OsStr) -> OsString {
    let from = from.as_bytes();
    if from.is_empty() {
        return s.to_os_string();
    }
    let mut out = Vec::with_capacity(s.len());
    let mut rest = s.as_bytes();
    while let Some(i) = find_bytes(rest, from) {
        out.extend_from_slice(&rest[..i]);
        out.extend_from_slice(to.as_bytes());
        rest = &rest[i + from.len()..];
    }
    out.extend_from_slice(rest);
    OsString::from_vec(out)
}
