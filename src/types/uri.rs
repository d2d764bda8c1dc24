//! Immutable URI.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use std::sync::OnceLock;

use crate::components::{Authority, Body, UriComponents};
use crate::encoded::EncodedString;
use crate::format::{eq_ignore_hex_case, LowercaseHex};
use crate::normalize::{directory_len, normalize_path_string, parent_len};
use crate::parser::str::{find, find_split_hole, nested_scheme_prefix_len};
use crate::parser::{self, ParseOptions};
use crate::validate::Error;

/// Immutable URI, fully determined by its encoded text.
///
/// Derived operations never modify a `Uri`; they return a new one, or a
/// clone of `self` if nothing changed. Clones share their text.
///
/// # Equality
///
/// Schemes and hosts are compared case-insensitively. Other components are
/// compared case-sensitively, except for the hex digits of `%XX` escapes.
///
/// ```
/// use jar_uri::Uri;
///
/// let a = Uri::parse("http://EX.com/a%2F").unwrap();
/// let b = Uri::parse("http://ex.com/a%2f").unwrap();
/// assert_eq!(a, b);
/// assert_ne!(Uri::parse("http://ex.com/A").unwrap(), Uri::parse("http://ex.com/a").unwrap());
/// ```
#[derive(Clone)]
pub struct Uri {
    /// Whole encoded text.
    input: EncodedString,
    /// Scheme, without the trailing `:`.
    scheme: Option<EncodedString>,
    /// Text between the scheme and the fragment.
    scheme_specific_part: EncodedString,
    /// Opaque or hierarchical body.
    body: Body,
    /// Fragment, without the leading `#`.
    fragment: Option<EncodedString>,
    /// Cached ASCII-only rendering.
    ascii: OnceLock<EncodedString>,
    /// Cached canonical text for hashing.
    hash_key: OnceLock<String>,
}

/// Location of the rewritable path inside the input.
///
/// For an opaque URI, this is the path of the nested URI, without its
/// scheme, authority, and query.
#[derive(Debug, Clone, Copy)]
struct PathSpan {
    /// Start offset in the input.
    start: usize,
    /// End offset in the input.
    end: usize,
    /// Whether an authority (possibly empty) directly precedes the path.
    after_authority: bool,
}

impl Uri {
    /// Parses a URI, requiring any authority to be server-based.
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_uri::Uri;
    ///
    /// let uri = Uri::parse("jar:http://x/y.jar!/a/b.class").unwrap();
    /// assert!(uri.is_opaque());
    /// assert_eq!(uri.scheme().unwrap(), "jar");
    /// assert!(uri.path().is_none());
    /// ```
    pub fn parse(s: &str) -> Result<Self, Error> {
        Self::from_encoded(EncodedString::cast(s))
    }

    /// Parses already encoded text, requiring any authority to be server-based.
    pub fn from_encoded(input: EncodedString) -> Result<Self, Error> {
        Self::parse_with(input, ParseOptions::STRICT)
    }

    /// Parses the text with the given options.
    pub(crate) fn parse_with(input: EncodedString, options: ParseOptions) -> Result<Self, Error> {
        parser::uri::parse(input, options).map(Self::from_components)
    }

    /// Creates a URI from parsed components.
    fn from_components(components: UriComponents) -> Self {
        Self {
            input: components.input,
            scheme: components.scheme,
            scheme_specific_part: components.scheme_specific_part,
            body: components.body,
            fragment: components.fragment,
            ascii: OnceLock::new(),
            hash_key: OnceLock::new(),
        }
    }

    /// Returns the encoded text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.input.as_str()
    }

    /// Returns the encoded text.
    #[inline]
    #[must_use]
    pub fn input(&self) -> &EncodedString {
        &self.input
    }

    /// Returns the scheme.
    #[inline]
    #[must_use]
    pub fn scheme(&self) -> Option<&EncodedString> {
        self.scheme.as_ref()
    }

    /// Returns everything between the scheme and the fragment.
    #[inline]
    #[must_use]
    pub fn scheme_specific_part(&self) -> &EncodedString {
        &self.scheme_specific_part
    }

    /// Returns the opaque or hierarchical body.
    #[inline]
    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Returns true if the URI has a scheme.
    #[inline]
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    /// Returns true if the scheme-specific part does not start with `/`.
    #[inline]
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        matches!(self.body, Body::Opaque)
    }

    /// Returns the authority of a hierarchical URI.
    #[inline]
    #[must_use]
    fn authority_component(&self) -> &Authority {
        match &self.body {
            Body::Hierarchical { authority, .. } => authority,
            Body::Opaque => &Authority::None,
        }
    }

    /// Returns the raw authority, server-based or not.
    #[inline]
    #[must_use]
    pub fn authority(&self) -> Option<&EncodedString> {
        self.authority_component().as_encoded()
    }

    /// Returns true if the URI has a non-empty authority.
    #[inline]
    #[must_use]
    pub fn has_authority(&self) -> bool {
        self.authority().is_some()
    }

    /// Returns the userinfo of a server-based authority.
    #[inline]
    #[must_use]
    pub fn user_info(&self) -> Option<&EncodedString> {
        match self.authority_component() {
            Authority::Server { user_info, .. } => user_info.as_ref(),
            _ => None,
        }
    }

    /// Returns the host of a server-based authority.
    #[inline]
    #[must_use]
    pub fn host(&self) -> Option<&EncodedString> {
        match self.authority_component() {
            Authority::Server { host, .. } => Some(host),
            _ => None,
        }
    }

    /// Returns the port of a server-based authority.
    #[inline]
    #[must_use]
    pub fn port(&self) -> Option<u32> {
        match self.authority_component() {
            Authority::Server { port, .. } => *port,
            _ => None,
        }
    }

    /// Returns the path, or `None` for an opaque URI.
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&EncodedString> {
        match &self.body {
            Body::Hierarchical { path, .. } => Some(path),
            Body::Opaque => None,
        }
    }

    /// Returns the query of a hierarchical URI.
    #[inline]
    #[must_use]
    pub fn query(&self) -> Option<&EncodedString> {
        match &self.body {
            Body::Hierarchical { query, .. } => query.as_ref(),
            Body::Opaque => None,
        }
    }

    /// Returns the fragment.
    #[inline]
    #[must_use]
    pub fn fragment(&self) -> Option<&EncodedString> {
        self.fragment.as_ref()
    }

    /// Returns true if the scheme is `file`, ignoring case.
    #[inline]
    #[must_use]
    pub fn is_file_scheme(&self) -> bool {
        self.has_scheme("file")
    }

    /// Returns true if the scheme is `jar`, ignoring case.
    #[inline]
    #[must_use]
    pub fn is_jar_scheme(&self) -> bool {
        self.has_scheme("jar")
    }

    /// Returns true if the scheme equals the given one, ignoring ASCII case.
    #[inline]
    #[must_use]
    pub(crate) fn has_scheme(&self, scheme: &str) -> bool {
        self.scheme
            .as_ref()
            .map_or(false, |s| s.as_str().eq_ignore_ascii_case(scheme))
    }

    /// Returns the text with every non-ASCII character percent-encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_uri::Uri;
    ///
    /// let uri = Uri::parse("file:/Hallo%20Welt%20\u{00F6}\u{00E4}").unwrap();
    /// assert_eq!(uri.to_ascii_string(), "file:/Hallo%20Welt%20%C3%B6%C3%A4");
    /// ```
    #[must_use]
    pub fn to_ascii_string(&self) -> &EncodedString {
        self.ascii.get_or_init(|| self.input.to_ascii())
    }

    /// Returns the canonical text used for hashing.
    #[must_use]
    fn hash_key(&self) -> &str {
        self.hash_key.get_or_init(|| HashKey(self).to_string())
    }

    /// Locates the path that derived operations rewrite.
    #[must_use]
    fn path_span(&self) -> PathSpan {
        let ssp_start = self.scheme.as_ref().map_or(0, |scheme| scheme.len() + 1);
        let ssp = self.scheme_specific_part.as_str();
        match &self.body {
            Body::Hierarchical {
                authority, path, ..
            } => {
                let (start, after_authority) = if ssp.starts_with("//") {
                    let authority_len = authority.as_encoded().map_or(0, EncodedString::len);
                    (ssp_start + 2 + authority_len, true)
                } else {
                    (ssp_start, false)
                };
                PathSpan {
                    start,
                    end: start + path.len(),
                    after_authority,
                }
            }
            Body::Opaque => {
                let (head, _query) = find_split_hole(ssp, b'?');
                let (offset, after_authority) = nested_path_offset(head);
                PathSpan {
                    start: ssp_start + offset,
                    end: ssp_start + head.len(),
                    after_authority,
                }
            }
        }
    }

    /// Returns the normalized text of the path span.
    fn normalized_path(&self, span: PathSpan) -> Result<String, Error> {
        normalize_path_string(&self.as_str()[span.start..span.end])
            .map_err(|e| e.relocate(self.as_str(), span.start))
    }

    /// Returns the URI with the path span replaced.
    fn with_path(&self, span: PathSpan, path: &str) -> Result<Self, Error> {
        let input = self.as_str();
        // A bare relative reference cannot be empty.
        let path = if path.is_empty() && span.start == 0 && span.end == input.len() {
            "./"
        } else {
            path
        };
        if input[span.start..span.end] == *path {
            return Ok(self.clone());
        }
        // Without an authority, a leading `//` would turn the path into one.
        // Without a scheme, a colon in the first segment would turn it into one.
        let guard = if !span.after_authority && path.starts_with("//") {
            "/."
        } else if span.start == 0 && first_segment_has_colon(path) {
            "./"
        } else {
            ""
        };
        let rebuilt = format!(
            "{}{}{}{}",
            &input[..span.start],
            guard,
            path,
            &input[span.end..]
        );
        Self::parse_with(EncodedString::cast(rebuilt), ParseOptions::LENIENT)
    }

    /// Returns the URI with `.` and `..` path segments resolved.
    ///
    /// For an opaque URI, the path of the nested URI is normalized, each jar
    /// entry separately.
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_uri::Uri;
    ///
    /// let uri = Uri::parse("jar:http://localhost/test/dummy/../abc.jar!/a/./b/../C.class").unwrap();
    /// assert_eq!(
    ///     uri.normalize().unwrap().as_str(),
    ///     "jar:http://localhost/test/abc.jar!/a/C.class"
    /// );
    /// ```
    pub fn normalize(&self) -> Result<Self, Error> {
        let span = self.path_span();
        let normalized = self.normalized_path(span)?;
        self.with_path(span, &normalized)
    }

    /// Returns the normalized URI without the file name of its path.
    ///
    /// A path already ending with `/` is kept. The query and fragment are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_uri::Uri;
    ///
    /// let uri = Uri::parse("jar:file:/web1/file1.jar!/rootDir/file1.txt").unwrap();
    /// assert_eq!(uri.directory().unwrap().as_str(), "jar:file:/web1/file1.jar!/rootDir/");
    /// ```
    pub fn directory(&self) -> Result<Self, Error> {
        let span = self.path_span();
        let normalized = self.normalized_path(span)?;
        self.with_path(span, &normalized[..directory_len(&normalized)])
    }

    /// Returns the parent of the normalized URI.
    ///
    /// The parent of a file is its directory, and the parent of a directory
    /// is the one above it. Returns `Ok(None)` at the root of the path or of
    /// a jar entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_uri::Uri;
    ///
    /// let file = Uri::parse("file:/a/b/c.txt").unwrap();
    /// let dir = file.parent().unwrap().unwrap();
    /// assert_eq!(dir.as_str(), "file:/a/b/");
    /// assert_eq!(dir.parent().unwrap().unwrap().as_str(), "file:/a/");
    /// assert!(Uri::parse("file:/").unwrap().parent().unwrap().is_none());
    /// ```
    pub fn parent(&self) -> Result<Option<Self>, Error> {
        let span = self.path_span();
        let normalized = self.normalized_path(span)?;
        match parent_len(&normalized) {
            Some(len) => self.with_path(span, &normalized[..len]).map(Some),
            None => Ok(None),
        }
    }

    /// Returns the URI whose path is `suffix` appended to this directory.
    ///
    /// An empty suffix behaves like [`normalize`][`Self::normalize`].
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_uri::{EncodedString, Uri};
    ///
    /// let base = Uri::parse("http://localhost/dir/a.html").unwrap();
    /// let rel = base.relative_of(&EncodedString::cast("../img/b.png")).unwrap();
    /// assert_eq!(rel.as_str(), "http://localhost/img/b.png");
    /// ```
    pub fn relative_of(&self, suffix: &EncodedString) -> Result<Self, Error> {
        if suffix.is_empty() {
            return self.normalize();
        }
        let span = self.path_span();
        let normalized = self.normalized_path(span)?;
        let mut joined = String::from(&normalized[..directory_len(&normalized)]);
        joined.push_str(suffix.as_str());
        let joined =
            normalize_path_string(&joined).map_err(|e| e.relocate(self.as_str(), span.start))?;
        self.with_path(span, &joined)
    }

    /// Returns the URI with its query replaced.
    ///
    /// For an opaque URI, everything after the nested path is replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_uri::{EncodedString, Uri};
    ///
    /// let uri = Uri::parse("http://localhost/a?x=1#f").unwrap();
    /// let replaced = uri.with_query(Some(&EncodedString::cast("y=2"))).unwrap();
    /// assert_eq!(replaced.as_str(), "http://localhost/a?y=2#f");
    /// assert_eq!(uri.with_query(None).unwrap().as_str(), "http://localhost/a#f");
    /// ```
    pub fn with_query(&self, query: Option<&EncodedString>) -> Result<Self, Error> {
        let span = self.path_span();
        let mut rebuilt = String::from(&self.as_str()[..span.end]);
        if let Some(query) = query {
            rebuilt.push('?');
            rebuilt.push_str(query.as_str());
        }
        if let Some(fragment) = &self.fragment {
            rebuilt.push('#');
            rebuilt.push_str(fragment.as_str());
        }
        Self::parse_with(EncodedString::cast(rebuilt), ParseOptions::LENIENT)
    }
}

/// Returns the offset of the nested path in an opaque scheme-specific part.
///
/// Leading nested schemes and a `//authority` are skipped. The flag tells
/// whether an authority was skipped.
#[must_use]
fn nested_path_offset(ssp: &str) -> (usize, bool) {
    let mut start = 0;
    while let Some(len) = nested_scheme_prefix_len(&ssp[start..]) {
        start += len;
    }
    match ssp[start..].strip_prefix("//") {
        Some(rest) => {
            let authority_len = find(rest.as_bytes(), b'/').unwrap_or(rest.len());
            (start + 2 + authority_len, true)
        }
        None => (start, false),
    }
}

/// Returns true if the first segment of a path contains `:`.
#[must_use]
fn first_segment_has_colon(path: &str) -> bool {
    let end = find(path.as_bytes(), b'/').unwrap_or(path.len());
    find(path[..end].as_bytes(), b':').is_some()
}

/// Compares optional components with [`eq_ignore_hex_case`].
#[must_use]
fn opt_eq_ignore_hex_case(lhs: Option<&EncodedString>, rhs: Option<&EncodedString>) -> bool {
    match (lhs, rhs) {
        (Some(lhs), Some(rhs)) => eq_ignore_hex_case(lhs.as_str(), rhs.as_str()),
        (None, None) => true,
        _ => false,
    }
}

/// Compares authorities.
#[must_use]
fn authority_eq(lhs: &Authority, rhs: &Authority) -> bool {
    match (lhs, rhs) {
        (Authority::None, Authority::None) => true,
        (Authority::Registry(lhs), Authority::Registry(rhs)) => {
            eq_ignore_hex_case(lhs.as_str(), rhs.as_str())
        }
        (
            Authority::Server {
                user_info: lhs_user_info,
                host: lhs_host,
                port: lhs_port,
                ..
            },
            Authority::Server {
                user_info: rhs_user_info,
                host: rhs_host,
                port: rhs_port,
                ..
            },
        ) => {
            lhs_host.as_str().eq_ignore_ascii_case(rhs_host.as_str())
                && lhs_port == rhs_port
                && opt_eq_ignore_hex_case(lhs_user_info.as_ref(), rhs_user_info.as_ref())
        }
        _ => false,
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        let scheme_eq = match (&self.scheme, &other.scheme) {
            (Some(lhs), Some(rhs)) => lhs.as_str().eq_ignore_ascii_case(rhs.as_str()),
            (None, None) => true,
            _ => false,
        };
        if !scheme_eq || !opt_eq_ignore_hex_case(self.fragment(), other.fragment()) {
            return false;
        }
        match (&self.body, &other.body) {
            (Body::Opaque, Body::Opaque) => eq_ignore_hex_case(
                self.scheme_specific_part.as_str(),
                other.scheme_specific_part.as_str(),
            ),
            (
                Body::Hierarchical {
                    authority: lhs_authority,
                    path: lhs_path,
                    query: lhs_query,
                },
                Body::Hierarchical {
                    authority: rhs_authority,
                    path: rhs_path,
                    query: rhs_query,
                },
            ) => {
                eq_ignore_hex_case(lhs_path.as_str(), rhs_path.as_str())
                    && opt_eq_ignore_hex_case(lhs_query.as_ref(), rhs_query.as_ref())
                    && authority_eq(lhs_authority, rhs_authority)
            }
            _ => false,
        }
    }
}

impl Eq for Uri {}

impl Hash for Uri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_key().hash(state);
    }
}

/// A proxy writing the canonical form compared by `Eq`.
///
/// Scheme and host are lowercased, and so are the hex digits of escapes.
struct HashKey<'a>(&'a Uri);

impl fmt::Display for HashKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let uri = self.0;
        if let Some(scheme) = &uri.scheme {
            write!(f, "{}:", scheme.as_str().to_ascii_lowercase())?;
        }
        match &uri.body {
            Body::Opaque => fmt::Display::fmt(&LowercaseHex(uri.scheme_specific_part.as_str()), f)?,
            Body::Hierarchical {
                authority,
                path,
                query,
            } => {
                match authority {
                    Authority::None => {}
                    Authority::Registry(raw) => write!(f, "//{}", LowercaseHex(raw.as_str()))?,
                    Authority::Server {
                        user_info,
                        host,
                        port,
                        ..
                    } => {
                        f.write_str("//")?;
                        if let Some(user_info) = user_info {
                            write!(f, "{}@", LowercaseHex(user_info.as_str()))?;
                        }
                        f.write_str(&host.as_str().to_ascii_lowercase())?;
                        if let Some(port) = port {
                            write!(f, ":{port}")?;
                        }
                    }
                }
                fmt::Display::fmt(&LowercaseHex(path.as_str()), f)?;
                if let Some(query) = query {
                    write!(f, "?{}", LowercaseHex(query.as_str()))?;
                }
            }
        }
        if let Some(fragment) = &uri.fragment {
            write!(f, "#{}", LowercaseHex(fragment.as_str()))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Uri").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Uri {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Uri {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Uri {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = Error;

    #[inline]
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Uri {
    type Error = Error;

    #[inline]
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_encoded(EncodedString::cast(s))
    }
}

impl From<Uri> for EncodedString {
    #[inline]
    fn from(uri: Uri) -> Self {
        uri.input
    }
}

#[cfg(feature = "serde")]
mod __serde {
    use core::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Uri;

    impl Serialize for Uri {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.as_str())
        }
    }

    /// Custom deserializer.
    #[derive(Debug, Clone, Copy)]
    struct CustomVisitor;

    impl Visitor<'_> for CustomVisitor {
        type Value = Uri;

        #[inline]
        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("URI")
        }

        #[inline]
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Uri::parse(v).map_err(E::custom)
        }
    }

    impl<'de> Deserialize<'de> for Uri {
        #[inline]
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_str(CustomVisitor)
        }
    }
}
