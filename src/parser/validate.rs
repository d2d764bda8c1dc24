//! Validation of already encoded text against a legal set.

use crate::parser::char::{hex_value, LegalSet};
use crate::validate::{Error, ErrorKind};

/// Returns true if `bytes[pos]` starts a well-formed `%XX` triple.
#[inline]
#[must_use]
pub(crate) fn is_escape_at(bytes: &[u8], pos: usize) -> bool {
    bytes.get(pos) == Some(&b'%')
        && bytes.get(pos + 1).copied().and_then(hex_value).is_some()
        && bytes.get(pos + 2).copied().and_then(hex_value).is_some()
}

/// Returns the byte offset of the first character not accepted by `legal`.
pub(crate) fn find_illegal(s: &str, legal: LegalSet) -> Result<Option<usize>, Error> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while let Some(c) = s[i..].chars().next() {
        if c == '%' {
            if !is_escape_at(bytes, i) {
                return Err(Error::new(s, ErrorKind::InvalidEscape, Some(i)));
            }
            i += 3;
            continue;
        }
        if !legal.accepts(c) {
            return Ok(Some(i));
        }
        i += c.len_utf8();
    }
    Ok(None)
}

/// Validates a component located at `offset` in `input`.
///
/// Errors report `input` and offsets relative to it.
pub(crate) fn validate_component(
    input: &str,
    component: &str,
    offset: usize,
    legal: LegalSet,
    kind: ErrorKind,
) -> Result<(), Error> {
    match find_illegal(component, legal) {
        Ok(None) => Ok(()),
        Ok(Some(pos)) => Err(Error::new(input, kind, Some(offset + pos))),
        Err(e) => Err(e.relocate(input, offset)),
    }
}
