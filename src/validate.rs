//! Validators and the URI syntax error type.

use core::fmt;

use std::error;

use crate::parser::char::LegalSet;

pub use crate::parser::host::{is_domain_name, is_ipv4, is_ipv6};

/// Kind of a URI syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input is empty.
    EmptyInput,
    /// Every component given to a constructor is empty.
    AllPartsEmpty,
    /// A colon appears at the very beginning, where a scheme is expected.
    MissingScheme,
    /// A scheme is present but nothing follows it.
    MissingSchemeSpecificPart,
    /// `//` is followed by nothing at all.
    MissingAuthority,
    /// Illegal character in the scheme.
    InvalidScheme,
    /// Illegal character in the scheme-specific part of an opaque URI.
    InvalidSchemeSpecificPart,
    /// Illegal character in the authority.
    InvalidAuthority,
    /// Illegal character in the userinfo.
    InvalidUserInfo,
    /// Illegal character in the path.
    InvalidPath,
    /// Illegal character in the query.
    InvalidQuery,
    /// Illegal character in the fragment.
    InvalidFragment,
    /// `%` not followed by two hexadecimal digits.
    InvalidEscape,
    /// Port is not a non-negative integer.
    InvalidPort,
    /// Host is empty where a server-based authority is required.
    EmptyHost,
    /// Host is neither a domain name nor an IPv4 address.
    InvalidHost,
    /// Malformed bracketed IPv6 literal.
    InvalidIpv6,
    /// Absolute URI whose path does not start with `/`.
    PathNotAbsolute,
    /// A jar URI without the `!` entry separator.
    MissingJarSeparator,
    /// A `..` segment climbs above the root of the path.
    UnresolvablePath,
    /// A file path is not valid Unicode.
    NonUnicodePath,
}

impl ErrorKind {
    /// Returns the human readable reason.
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::EmptyInput => "empty input",
            Self::AllPartsEmpty => "all parts are empty",
            Self::MissingScheme => "expecting scheme",
            Self::MissingSchemeSpecificPart => "expecting scheme-specific part",
            Self::MissingAuthority => "expecting authority, path [, query, fragment]",
            Self::InvalidScheme => "invalid scheme",
            Self::InvalidSchemeSpecificPart => "invalid scheme-specific part",
            Self::InvalidAuthority => "invalid authority",
            Self::InvalidUserInfo => "invalid userinfo",
            Self::InvalidPath => "invalid path",
            Self::InvalidQuery => "invalid query",
            Self::InvalidFragment => "invalid fragment",
            Self::InvalidEscape => "invalid escape sequence",
            Self::InvalidPort => "invalid port",
            Self::EmptyHost => "expecting host",
            Self::InvalidHost => "invalid host",
            Self::InvalidIpv6 => "invalid IPv6 address",
            Self::PathNotAbsolute => "path doesn't start with '/'",
            Self::MissingJarSeparator => "jar scheme without '!' separator",
            Self::UnresolvablePath => "path has no parent to resolve '..'",
            Self::NonUnicodePath => "file path is not valid Unicode",
        }
    }
}

impl fmt::Display for ErrorKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// URI syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// Offending input.
    input: Box<str>,
    /// Error kind.
    kind: ErrorKind,
    /// Byte offset of the problem in the input, if known.
    index: Option<usize>,
}

impl Error {
    /// Creates a new `Error`.
    ///
    /// For internal use.
    #[inline]
    #[must_use]
    pub(crate) fn new(input: &str, kind: ErrorKind, index: Option<usize>) -> Self {
        Self {
            input: input.into(),
            kind,
            index,
        }
    }

    /// Returns the error re-targeted to a larger input containing the old one at `offset`.
    #[must_use]
    pub(crate) fn relocate(self, input: &str, offset: usize) -> Self {
        Self {
            input: input.into(),
            kind: self.kind,
            index: self.index.map(|i| i + offset),
        }
    }

    /// Returns the input that failed to parse.
    #[inline]
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the error kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the byte offset of the problem, if known.
    #[inline]
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Returns the human readable reason.
    #[inline]
    #[must_use]
    pub fn reason(&self) -> &'static str {
        self.kind.reason()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{} at index {}: {}", self.reason(), index, self.input),
            None => write!(f, "{}: {}", self.reason(), self.input),
        }
    }
}

impl error::Error for Error {}

/// Returns the byte offset of the first character not accepted by `legal`.
///
/// Percent-encoded triples are always accepted.
///
/// # Failures
///
/// Fails with [`ErrorKind::InvalidEscape`] if a `%` is not followed by two
/// hexadecimal digits.
///
/// # Examples
///
/// ```
/// use jar_uri::validate::{find_illegal, ErrorKind};
/// use jar_uri::LegalSet;
///
/// assert_eq!(find_illegal("/a%20b/c", LegalSet::PATH), Ok(None));
/// assert_eq!(find_illegal("/a b", LegalSet::PATH), Ok(Some(2)));
/// assert_eq!(
///     find_illegal("/a%2", LegalSet::PATH).map_err(|e| e.kind()),
///     Err(ErrorKind::InvalidEscape)
/// );
/// ```
pub fn find_illegal(s: &str, legal: LegalSet) -> Result<Option<usize>, Error> {
    crate::parser::validate::find_illegal(s, legal)
}
