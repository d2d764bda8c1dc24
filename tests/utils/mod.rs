//! Utilities.
#![allow(dead_code, unused_macros)]

use jar_uri::Uri;

/// Asserts that the URI text equals the expected string.
macro_rules! assert_uri_text {
    ($uri:expr, $expected:expr $(,)?) => {{
        let uri = &$uri;
        let expected: &str = $expected;
        assert_eq!(uri.as_str(), expected, "uri={uri:?}");
    }};
    ($uri:expr, $expected:expr, $($arg:tt)+) => {{
        let uri = &$uri;
        let expected: &str = $expected;
        assert_eq!(uri.as_str(), expected, $($arg)+);
    }};
}

/// Parses the string strictly, panicking on failure.
#[must_use]
pub fn parse(s: &str) -> Uri {
    Uri::parse(s).unwrap_or_else(|e| panic!("{s:?} should be a valid URI: {e}"))
}

/// Returns the text of an optional component.
#[must_use]
pub fn text(v: Option<&jar_uri::EncodedString>) -> Option<&str> {
    v.map(jar_uri::EncodedString::as_str)
}
