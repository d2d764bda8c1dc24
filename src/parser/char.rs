//! Helpers for characters.

/// Set of ASCII punctuation allowed unescaped in a URI component.
///
/// ASCII letters and digits are always allowed, and so are non-ASCII
/// characters that are neither whitespace nor control characters.
/// Everything else must be percent-encoded.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegalSet(u128);

/// Unreserved punctuation of RFC 3986 section 2.3.
const UNRESERVED: &str = "_-.~";
/// Punctuation shared by several component sets.
const PUNCT: &str = ",;:$&+=";
/// Reserved punctuation of RFC 3986 section 2.2, fragment flavor.
const RESERVED: &str = "!*'()@/?#[]";
/// Reserved punctuation without `#`.
const RESERVED_NO_HASH: &str = "!*'()@/?[]";

impl LegalSet {
    /// Legal set for the userinfo part of an authority.
    pub const USER_INFO: Self = Self::EMPTY.with(UNRESERVED).with(PUNCT);
    /// Legal set for a whole authority.
    pub const AUTHORITY: Self = Self::USER_INFO.with("@[]");
    /// Legal set for a path.
    ///
    /// No reserved characters but `/` and `!`, the latter to allow jar entries.
    pub const PATH: Self = Self::EMPTY.with(UNRESERVED).with("/!");
    /// Legal set for a query.
    pub const QUERY: Self = Self::EMPTY
        .with(UNRESERVED)
        .with(PUNCT)
        .with(RESERVED_NO_HASH)
        .with("\\\"");
    /// Legal set for the scheme-specific part of an opaque URI.
    pub const SCHEME_SPECIFIC_PART: Self = Self::QUERY;
    /// Legal set for a fragment.
    pub const FRAGMENT: Self = Self::EMPTY
        .with(UNRESERVED)
        .with(PUNCT)
        .with(RESERVED);

    /// Set without any punctuation.
    const EMPTY: Self = Self(0);

    /// Returns the set extended with the given ASCII characters.
    #[must_use]
    const fn with(self, chars: &str) -> Self {
        let bytes = chars.as_bytes();
        let mut bits = self.0;
        let mut i = 0;
        while i < bytes.len() {
            assert!(bytes[i].is_ascii(), "[precondition] legal chars must be ASCII");
            bits |= 1 << bytes[i];
            i += 1;
        }
        Self(bits)
    }

    /// Returns the set without the given ASCII characters.
    #[must_use]
    pub(crate) const fn without(self, chars: &str) -> Self {
        let bytes = chars.as_bytes();
        let mut bits = self.0;
        let mut i = 0;
        while i < bytes.len() {
            assert!(bytes[i].is_ascii(), "[precondition] legal chars must be ASCII");
            bits &= !(1 << bytes[i]);
            i += 1;
        }
        Self(bits)
    }

    /// Returns true if the ASCII punctuation is a member of the set.
    #[inline]
    #[must_use]
    fn contains_ascii(self, b: u8) -> bool {
        b.is_ascii() && (self.0 & (1 << b)) != 0
    }

    /// Returns true if the character may appear unescaped.
    #[inline]
    #[must_use]
    pub fn accepts(self, c: char) -> bool {
        if c.is_ascii() {
            c.is_ascii_alphanumeric() || self.contains_ascii(c as u8)
        } else {
            !c.is_whitespace() && !c.is_control()
        }
    }
}

impl core::fmt::Debug for LegalSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let members = (0_u8..128)
            .filter(|&b| b.is_ascii_punctuation() && self.contains_ascii(b))
            .map(char::from);
        f.debug_tuple("LegalSet")
            .field(&members.collect::<String>())
            .finish()
    }
}

/// Checks if the string matches the `scheme` rule.
///
/// The first character is a letter, and the remaining ones are letters,
/// digits, `+`, `-`, or `.`.
#[must_use]
pub(crate) fn is_scheme(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() => bytes.all(is_ascii_scheme_continue),
        _ => false,
    }
}

/// Checks if the given character matches the non-first part of the `scheme` rule.
#[inline]
#[must_use]
pub(crate) fn is_ascii_scheme_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.')
}

/// Returns the value of the hexadecimal digit.
#[inline]
#[must_use]
pub(crate) fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_set() {
        for c in ['a', 'Z', '0', '/', '!', '_', '-', '.', '~', '\u{03B1}'] {
            assert!(LegalSet::PATH.accepts(c), "{c:?} should be legal in a path");
        }
        for c in [' ', ':', '?', '#', '@', '%', '\u{7F}', '\u{85}', '\u{3000}'] {
            assert!(!LegalSet::PATH.accepts(c), "{c:?} should be illegal in a path");
        }
    }

    #[test]
    fn query_and_fragment_sets() {
        assert!(LegalSet::QUERY.accepts('?'));
        assert!(LegalSet::QUERY.accepts('"'));
        assert!(LegalSet::QUERY.accepts('\\'));
        assert!(!LegalSet::QUERY.accepts('#'));
        assert!(LegalSet::FRAGMENT.accepts('#'));
        assert!(!LegalSet::FRAGMENT.accepts('"'));
        assert_eq!(LegalSet::SCHEME_SPECIFIC_PART, LegalSet::QUERY);
    }

    #[test]
    fn authority_sets() {
        assert!(!LegalSet::USER_INFO.accepts('@'));
        assert!(!LegalSet::USER_INFO.accepts('['));
        assert!(LegalSet::USER_INFO.accepts(':'));
        assert!(LegalSet::AUTHORITY.accepts('@'));
        assert!(LegalSet::AUTHORITY.accepts(']'));
        assert!(!LegalSet::AUTHORITY.accepts('/'));
    }

    #[test]
    fn scheme() {
        assert!(is_scheme("http"));
        assert!(is_scheme("svn+ssh"));
        assert!(is_scheme("a.b-c"));
        assert!(!is_scheme(""));
        assert!(!is_scheme("1http"));
        assert!(!is_scheme("ht tp"));
    }

    #[test]
    fn hex() {
        assert_eq!(hex_value(b'0'), Some(0));
        assert_eq!(hex_value(b'f'), Some(15));
        assert_eq!(hex_value(b'C'), Some(12));
        assert_eq!(hex_value(b'g'), None);
    }
}
