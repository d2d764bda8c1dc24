//! Comparison and formatting helpers for percent-encoded text.

use core::fmt::{self, Write as _};

use crate::parser::str::find;

/// Compares two encoded strings, ignoring the letter case of hex digits in escapes.
///
/// Literal characters are compared case-sensitively.
#[must_use]
pub(crate) fn eq_ignore_hex_case(lhs: &str, rhs: &str) -> bool {
    let (lhs, rhs) = (lhs.as_bytes(), rhs.as_bytes());
    if lhs.len() != rhs.len() {
        return false;
    }
    let mut i = 0;
    while i < lhs.len() {
        if lhs[i] != rhs[i] {
            return false;
        }
        if lhs[i] == b'%' {
            let end = (i + 3).min(lhs.len());
            if !lhs[(i + 1)..end].eq_ignore_ascii_case(&rhs[(i + 1)..end]) {
                return false;
            }
            i = end;
        } else {
            i += 1;
        }
    }
    true
}

/// A proxy writing an encoded string with lowercase hex digits in escapes.
///
/// Literal characters are written as-is.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LowercaseHex<'a>(pub(crate) &'a str);

impl fmt::Display for LowercaseHex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(pct) = find(rest.as_bytes(), b'%') {
            f.write_str(&rest[..=pct])?;
            rest = &rest[(pct + 1)..];
            let hex_len = rest.bytes().take(2).take_while(u8::is_ascii_hexdigit).count();
            for b in rest[..hex_len].bytes() {
                f.write_char(char::from(b.to_ascii_lowercase()))?;
            }
            rest = &rest[hex_len..];
        }
        f.write_str(rest)
    }
}
