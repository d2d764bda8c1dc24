//! Functions for common string operations.

/// Returns the position of the first occurrence of the given byte.
#[cfg(feature = "memchr")]
#[inline]
#[must_use]
pub(crate) fn find(haystack: &[u8], needle: u8) -> Option<usize> {
    memchr::memchr(needle, haystack)
}

/// Returns the position of the first occurrence of the given byte.
#[cfg(not(feature = "memchr"))]
#[inline]
#[must_use]
pub(crate) fn find(haystack: &[u8], needle: u8) -> Option<usize> {
    haystack.iter().position(|&b| b == needle)
}

/// Returns the position of the last occurrence of the given byte.
#[cfg(feature = "memchr")]
#[inline]
#[must_use]
pub(crate) fn rfind(haystack: &[u8], needle: u8) -> Option<usize> {
    memchr::memrchr(needle, haystack)
}

/// Returns the position of the last occurrence of the given byte.
#[cfg(not(feature = "memchr"))]
#[inline]
#[must_use]
pub(crate) fn rfind(haystack: &[u8], needle: u8) -> Option<usize> {
    haystack.iter().rposition(|&b| b == needle)
}

/// Returns the position of the first occurrence of any of the two bytes.
#[cfg(feature = "memchr")]
#[inline]
#[must_use]
pub(crate) fn find_either(haystack: &[u8], needle1: u8, needle2: u8) -> Option<usize> {
    memchr::memchr2(needle1, needle2, haystack)
}

/// Returns the position of the first occurrence of any of the two bytes.
#[cfg(not(feature = "memchr"))]
#[inline]
#[must_use]
pub(crate) fn find_either(haystack: &[u8], needle1: u8, needle2: u8) -> Option<usize> {
    haystack.iter().position(|&b| b == needle1 || b == needle2)
}

/// Splits the string at the first occurrence of the byte, removing the delimiter.
///
/// Returns `(s, None)` if the delimiter is not found.
#[inline]
#[must_use]
pub(crate) fn find_split_hole(s: &str, delim: u8) -> (&str, Option<&str>) {
    debug_assert!(delim.is_ascii(), "[precondition] delimiter should be ASCII");
    match find(s.as_bytes(), delim) {
        Some(pos) => (&s[..pos], Some(&s[(pos + 1)..])),
        None => (s, None),
    }
}

/// Splits the string at the last occurrence of the byte, removing the delimiter.
///
/// Returns `(s, None)` if the delimiter is not found.
#[inline]
#[must_use]
pub(crate) fn rfind_split_hole(s: &str, delim: u8) -> (&str, Option<&str>) {
    debug_assert!(delim.is_ascii(), "[precondition] delimiter should be ASCII");
    match rfind(s.as_bytes(), delim) {
        Some(pos) => (&s[..pos], Some(&s[(pos + 1)..])),
        None => (s, None),
    }
}

/// Returns the length of the leading `scheme ":"` of a nested URI, including the colon.
///
/// Returns `None` if a `/` comes before the first colon or the scheme is malformed.
#[must_use]
pub(crate) fn nested_scheme_prefix_len(s: &str) -> Option<usize> {
    let colon = find_either(s.as_bytes(), b':', b'/')?;
    let scheme = &s[..colon];
    if s.as_bytes()[colon] != b':' || !super::char::is_scheme(scheme) {
        return None;
    }
    Some(colon + 1)
}
