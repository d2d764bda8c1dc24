//! Percent-encoded string.

use core::fmt;

use std::sync::Arc;

use crate::parser::char::LegalSet;
use crate::percent_encode::{decode, PercentEncoded};
use crate::validate::Error;

/// Immutable string whose `%` characters always start a `%XX` escape.
///
/// Cloning is cheap: the text is shared.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EncodedString(Arc<str>);

impl EncodedString {
    /// Wraps an already encoded string without checking it.
    ///
    /// The caller is responsible for the encoding being correct.
    #[inline]
    #[must_use]
    pub fn cast<S: Into<Arc<str>>>(encoded: S) -> Self {
        Self(encoded.into())
    }

    /// Encodes a vanilla string against the legal set.
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_uri::{EncodedString, LegalSet};
    ///
    /// let path = EncodedString::encode("/a dir/\u{00E4}.txt", LegalSet::PATH);
    /// assert_eq!(path.as_str(), "/a%20dir/\u{00E4}.txt");
    /// ```
    #[must_use]
    pub fn encode(vanilla: &str, legal: LegalSet) -> Self {
        Self::cast(PercentEncoded::new(vanilla, legal).to_string())
    }

    /// Returns the encoded text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the string is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decodes every escape.
    ///
    /// # Failures
    ///
    /// Fails on malformed escapes, which only a careless [`cast`][`Self::cast`] can produce.
    pub fn decode(&self) -> Result<String, Error> {
        decode(&self.0)
    }

    /// Returns the string with every non-ASCII character percent-encoded.
    #[must_use]
    pub fn to_ascii(&self) -> Self {
        if self.0.is_ascii() {
            return self.clone();
        }
        Self::cast(PercentEncoded::ascii(self.as_str()).to_string())
    }

    /// Compares two strings, ignoring the letter case of hex digits in escapes.
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_uri::EncodedString;
    ///
    /// let a = EncodedString::cast("/a%2F");
    /// assert!(a.eq_ignore_hex_case(&EncodedString::cast("/a%2f")));
    /// assert!(!a.eq_ignore_hex_case(&EncodedString::cast("/A%2F")));
    /// ```
    #[inline]
    #[must_use]
    pub fn eq_ignore_hex_case(&self, other: &Self) -> bool {
        crate::format::eq_ignore_hex_case(self.as_str(), other.as_str())
    }
}

impl fmt::Debug for EncodedString {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for EncodedString {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EncodedString {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EncodedString {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        *self.0 == *other
    }
}

impl PartialEq<&str> for EncodedString {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        *self.0 == **other
    }
}

impl PartialEq<EncodedString> for str {
    #[inline]
    fn eq(&self, other: &EncodedString) -> bool {
        *self == *other.0
    }
}

impl PartialEq<EncodedString> for &str {
    #[inline]
    fn eq(&self, other: &EncodedString) -> bool {
        **self == *other.0
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl serde::Serialize for EncodedString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
