//! Percent encoding and decoding.

use core::fmt::{self, Write as _};

use crate::parser::char::{hex_value, LegalSet};
use crate::parser::str::find;
use crate::validate::{Error, ErrorKind};

/// Characters that are written as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    /// Letters, digits, members of the set, and printable non-ASCII characters.
    Legal(LegalSet),
    /// Everything ASCII; only non-ASCII characters are encoded.
    Ascii,
}

/// A proxy to percent-encode a string.
///
/// # Examples
///
/// ```
/// use jar_uri::percent_encode::PercentEncoded;
/// use jar_uri::LegalSet;
///
/// let raw = "/dir/a b/\u{03B1}.txt";
/// assert_eq!(
///     PercentEncoded::new(raw, LegalSet::PATH).to_string(),
///     "/dir/a%20b/\u{03B1}.txt"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PercentEncoded<T> {
    /// Encoding context.
    context: Context,
    /// Raw string before being encoded.
    raw: T,
}

impl<T: fmt::Display> PercentEncoded<T> {
    /// Creates a proxy encoding every character not accepted by `legal`.
    #[inline]
    #[must_use]
    pub fn new(raw: T, legal: LegalSet) -> Self {
        Self {
            context: Context::Legal(legal),
            raw,
        }
    }

    /// Creates a proxy encoding only non-ASCII characters.
    ///
    /// Existing escapes and ASCII characters are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_uri::percent_encode::PercentEncoded;
    ///
    /// assert_eq!(
    ///     PercentEncoded::ascii("/a%20\u{00E4}").to_string(),
    ///     "/a%20%C3%A4"
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn ascii(raw: T) -> Self {
        Self {
            context: Context::Ascii,
            raw,
        }
    }
}

impl<T: fmt::Display> fmt::Display for PercentEncoded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        /// Filter that encodes a character before written if necessary.
        struct Filter<'a, 'b> {
            /// Encoding context.
            context: Context,
            /// Writer.
            writer: &'a mut fmt::Formatter<'b>,
        }
        impl fmt::Write for Filter<'_, '_> {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                s.chars().try_for_each(|c| self.write_char(c))
            }
            fn write_char(&mut self, c: char) -> fmt::Result {
                let is_valid_char = match self.context {
                    Context::Legal(legal) => legal.accepts(c),
                    Context::Ascii => c.is_ascii(),
                };
                if is_valid_char {
                    self.writer.write_char(c)
                } else {
                    write_pct_encoded_char(&mut self.writer, c)
                }
            }
        }
        let mut filter = Filter {
            context: self.context,
            writer: f,
        };
        write!(filter, "{}", self.raw)
    }
}

/// Percent-encodes the given character and writes it.
#[inline]
fn write_pct_encoded_char<W: fmt::Write>(writer: &mut W, c: char) -> fmt::Result {
    let mut buf = [0_u8; 4];
    let buf = c.encode_utf8(&mut buf);
    buf.bytes().try_for_each(|b| write!(writer, "%{:02X}", b))
}

/// Decodes every `%XX` triple of the string.
///
/// A run of consecutive triples is decoded as UTF-8 as a whole, so
/// multi-byte characters survive. Invalid UTF-8 is replaced with U+FFFD.
///
/// # Failures
///
/// Fails with [`ErrorKind::InvalidEscape`] if a `%` is not followed by two
/// hexadecimal digits.
///
/// # Examples
///
/// ```
/// use jar_uri::percent_encode::decode;
///
/// assert_eq!(decode("/a%20b/%C3%A4").unwrap(), "/a b/\u{00E4}");
/// assert!(decode("/a%2").is_err());
/// ```
pub fn decode(s: &str) -> Result<String, Error> {
    let bytes = s.as_bytes();
    let mut decoded = String::with_capacity(s.len());
    let mut run = Vec::new();
    let mut i = 0;
    while let Some(pct) = find(&bytes[i..], b'%') {
        let start = i + pct;
        decoded.push_str(&s[i..start]);
        i = start;
        run.clear();
        while bytes.get(i) == Some(&b'%') {
            let upper = bytes.get(i + 1).copied().and_then(hex_value);
            let lower = bytes.get(i + 2).copied().and_then(hex_value);
            match (upper, lower) {
                (Some(upper), Some(lower)) => run.push((upper << 4) | lower),
                _ => return Err(Error::new(s, ErrorKind::InvalidEscape, Some(i))),
            }
            i += 3;
        }
        decoded.push_str(&String::from_utf8_lossy(&run));
    }
    decoded.push_str(&s[i..]);
    Ok(decoded)
}
