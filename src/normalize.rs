//! Path normalization and traversal.
//!
//! Paths may contain jar entry separators (`!/`). Each region between
//! separators is normalized on its own, so `..` never climbs out of a jar
//! entry into the container path.

mod remove_dot_segments;

use crate::parser::str::rfind;
use crate::validate::Error;

use self::remove_dot_segments::remove_dot_segments;

/// Resolves `.` and `..` segments of a `/`-delimited path-like string.
///
/// Regions separated by `!/` are resolved independently. Empty segments
/// are kept as they are.
///
/// # Failures
///
/// Fails with [`ErrorKind::UnresolvablePath`][`crate::validate::ErrorKind::UnresolvablePath`]
/// if `..` climbs above the root of an absolute region.
///
/// # Examples
///
/// ```
/// use jar_uri::normalize::normalize_path_string;
///
/// assert_eq!(
///     normalize_path_string("/test/dummy/../abc.jar!/a/./b/../C.class").unwrap(),
///     "/test/abc.jar!/a/C.class"
/// );
/// assert_eq!(normalize_path_string("../dummy/nop/../a.txt").unwrap(), "../dummy/a.txt");
/// assert!(normalize_path_string("/a.jar!/../x").is_err());
/// ```
pub fn normalize_path_string(path: &str) -> Result<String, Error> {
    let mut buf = String::with_capacity(path.len());
    let mut start = 0;
    for (pos, _) in path.match_indices("!/") {
        remove_dot_segments(&mut buf, &path[start..pos])?;
        buf.push('!');
        start = pos + 1;
    }
    remove_dot_segments(&mut buf, &path[start..])?;
    Ok(buf)
}

/// Returns the offset where the innermost jar entry path starts.
///
/// This is right after the last `!`, or 0 for a path without one.
#[inline]
#[must_use]
fn entry_start(path: &str) -> usize {
    rfind(path.as_bytes(), b'!').map_or(0, |pos| pos + 1)
}

/// Returns the length of the directory part of a normalized path.
///
/// The file name, if any, is cut off; a path ending with `/` is kept whole.
#[must_use]
pub(crate) fn directory_len(path: &str) -> usize {
    if path.ends_with('/') {
        return path.len();
    }
    let floor = entry_start(path);
    rfind(path[floor..].as_bytes(), b'/').map_or(floor, |slash| floor + slash + 1)
}

/// Returns the length of the parent of a normalized path.
///
/// A file's parent is its directory; a directory's parent is the directory
/// above it. Returns `None` at the root, at the root of a jar entry, for a
/// relative path without a parent segment, and above an unresolved `..`.
#[must_use]
pub(crate) fn parent_len(path: &str) -> Option<usize> {
    let floor = entry_start(path);
    let region = &path[floor..];
    let last = rfind(region.as_bytes(), b'/')?;
    if last + 1 < region.len() {
        return Some(floor + last + 1);
    }
    let prev = rfind(region[..last].as_bytes(), b'/')?;
    if &region[(prev + 1)..last] == ".." {
        return None;
    }
    Some(floor + prev + 1)
}
