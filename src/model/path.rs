//! Helpers over `/`-separated internal paths.
//!
//! Paths are plain strings; these functions never allocate unless they
//! have to build a new path.

use smallvec::SmallVec;

use crate::vocab::markers::HASH;

pub const SEPARATOR: char = '/';
pub const ROOT: &str = "/";

/// Non-empty segments of a path, in order.
pub fn segments(path: &str) -> SmallVec<[&str; 8]> {
    path.split(SEPARATOR).filter(|s| !s.is_empty()).collect()
}

/// Parent of an absolute path; `None` for the root.
pub fn parent(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.rfind(SEPARATOR) {
        Some(0) => Some(ROOT),
        Some(ix) => Some(&trimmed[..ix]),
        None => None,
    }
}

/// Last segment of a path; empty for the root.
pub fn name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(SEPARATOR);
    match trimmed.rfind(SEPARATOR) {
        Some(ix) => &trimmed[ix + 1..],
        None => trimmed,
    }
}

/// Append a relative path to a parent path.
pub fn join(parent: &str, child: &str) -> String {
    let child = child.trim_start_matches(SEPARATOR);
    if child.is_empty() {
        return parent.to_string();
    }
    if parent.ends_with(SEPARATOR) {
        format!("{parent}{child}")
    } else {
        format!("{parent}{SEPARATOR}{child}")
    }
}

/// Path of `path` relative to `ancestor`, without a leading separator.
/// `None` when `ancestor` is not an ancestor-or-self of `path`.
pub fn relative_to<'a>(ancestor: &str, path: &'a str) -> Option<&'a str> {
    if ancestor == ROOT {
        return Some(path.trim_start_matches(SEPARATOR));
    }
    let rest = path.strip_prefix(ancestor)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix(SEPARATOR)
    }
}

/// Split a path at its hash section.
///
/// Returns the resource part and the hash suffix (starting with `/#`),
/// the suffix being empty when no `#` segment is present.
pub fn split_hash_section(path: &str) -> (&str, &str) {
    let mut offset = 0;
    for segment in path.split(SEPARATOR) {
        if segment == HASH && offset > 0 {
            return (&path[..offset - 1], &path[offset - 1..]);
        }
        offset += segment.len() + 1;
    }
    (path, "")
}

/// Whether any segment of the path is the hash marker.
pub fn has_hash_section(path: &str) -> bool {
    path.split(SEPARATOR).any(|s| s == HASH)
}
