//! URI builder.

use core::fmt;

use crate::encoded::EncodedString;
use crate::parser::char::LegalSet;
use crate::parser::ParseOptions;
use crate::percent_encode::PercentEncoded;
use crate::types::Uri;
use crate::validate::{Error, ErrorKind};

/// Legal set for a built fragment.
///
/// The parser splits the fragment at the last `#`, so it must not contain one.
const BUILT_FRAGMENT: LegalSet = LegalSet::FRAGMENT.without("#");

/// URI builder.
///
/// Setters take unencoded text, which is percent-encoded against the legal
/// set of its component when the URI is built. The host is written as-is,
/// and gets brackets if it looks like a bare IPv6 address.
///
/// Three forms are supported:
///
/// * opaque: scheme, scheme-specific part, and fragment;
/// * server-based: scheme, userinfo, host, port, path, query, and fragment;
///   the host must be valid;
/// * registry-based: scheme, authority, path, query, and fragment.
///
/// # Examples
///
/// ```
/// use jar_uri::build::Builder;
///
/// let mut builder = Builder::new();
/// builder.scheme("http");
/// builder.host("localhost");
/// builder.port(8080);
/// builder.path("/a dir/index.html");
/// builder.query("q=1");
/// let uri = builder.build().unwrap();
/// assert_eq!(uri.as_str(), "http://localhost:8080/a%20dir/index.html?q=1");
/// ```
#[derive(Default, Debug, Clone)]
pub struct Builder<'a> {
    /// Scheme.
    scheme: Option<&'a str>,
    /// Scheme-specific part of an opaque URI.
    scheme_specific_part: Option<&'a str>,
    /// Raw registry-based authority.
    registry_authority: Option<&'a str>,
    /// Userinfo of a server-based authority.
    user_info: Option<&'a str>,
    /// Host of a server-based authority.
    host: Option<&'a str>,
    /// Port of a server-based authority.
    port: Option<u32>,
    /// Path.
    path: Option<&'a str>,
    /// Query.
    query: Option<&'a str>,
    /// Fragment.
    fragment: Option<&'a str>,
}

impl<'a> Builder<'a> {
    /// Creates a builder with empty data.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scheme.
    #[inline]
    pub fn scheme(&mut self, v: &'a str) {
        self.scheme = Some(v);
    }

    /// Unsets the scheme.
    #[inline]
    pub fn unset_scheme(&mut self) {
        self.scheme = None;
    }

    /// Sets the scheme-specific part, making the URI opaque.
    ///
    /// Authority, path, and query settings are ignored while this is set.
    #[inline]
    pub fn scheme_specific_part(&mut self, v: &'a str) {
        self.scheme_specific_part = Some(v);
    }

    /// Unsets the scheme-specific part.
    #[inline]
    pub fn unset_scheme_specific_part(&mut self) {
        self.scheme_specific_part = None;
    }

    /// Sets a registry-based authority, replacing any server settings.
    #[inline]
    pub fn authority(&mut self, v: &'a str) {
        self.unset_authority();
        self.registry_authority = Some(v);
    }

    /// Unsets the authority, including server settings.
    #[inline]
    pub fn unset_authority(&mut self) {
        self.registry_authority = None;
        self.user_info = None;
        self.host = None;
        self.port = None;
    }

    /// Sets the userinfo, replacing a registry-based authority.
    #[inline]
    pub fn user_info(&mut self, v: &'a str) {
        self.registry_authority = None;
        self.user_info = Some(v);
    }

    /// Unsets the userinfo.
    #[inline]
    pub fn unset_user_info(&mut self) {
        self.user_info = None;
    }

    /// Sets the host, replacing a registry-based authority.
    #[inline]
    pub fn host(&mut self, v: &'a str) {
        self.registry_authority = None;
        self.host = Some(v);
    }

    /// Sets the port, replacing a registry-based authority.
    #[inline]
    pub fn port(&mut self, v: u32) {
        self.registry_authority = None;
        self.port = Some(v);
    }

    /// Unsets the port.
    #[inline]
    pub fn unset_port(&mut self) {
        self.port = None;
    }

    /// Sets the path.
    #[inline]
    pub fn path(&mut self, v: &'a str) {
        self.path = Some(v);
    }

    /// Sets the query.
    #[inline]
    pub fn query(&mut self, v: &'a str) {
        self.query = Some(v);
    }

    /// Unsets the query.
    #[inline]
    pub fn unset_query(&mut self) {
        self.query = None;
    }

    /// Sets the fragment.
    #[inline]
    pub fn fragment(&mut self, v: &'a str) {
        self.fragment = Some(v);
    }

    /// Unsets the fragment.
    #[inline]
    pub fn unset_fragment(&mut self) {
        self.fragment = None;
    }

    /// Returns the non-empty scheme.
    #[inline]
    #[must_use]
    fn nonempty_scheme(&self) -> Option<&'a str> {
        self.scheme.filter(|s| !s.is_empty())
    }

    /// Returns true if no component carries any text.
    #[must_use]
    fn is_all_empty(&self) -> bool {
        let empty = |v: Option<&str>| v.map_or(true, str::is_empty);
        let authority_empty =
            empty(self.registry_authority) && empty(self.user_info) && empty(self.host);
        let body_empty = match self.scheme_specific_part {
            Some(ssp) => ssp.is_empty(),
            None => authority_empty && empty(self.path) && empty(self.query),
        };
        empty(self.scheme) && body_empty && empty(self.fragment)
    }

    /// Builds the URI.
    ///
    /// # Failures
    ///
    /// Fails with [`ErrorKind::AllPartsEmpty`] if nothing is set, with
    /// [`ErrorKind::PathNotAbsolute`] if a scheme is set and the path does
    /// not start with `/`, and with any parse error of the composed text.
    pub fn build(self) -> Result<Uri, Error> {
        if self.is_all_empty() {
            return Err(Error::new("", ErrorKind::AllPartsEmpty, None));
        }
        if self.scheme_specific_part.is_none() && self.nonempty_scheme().is_some() {
            if let Some(path) = self.path.filter(|p| !p.is_empty() && !p.starts_with('/')) {
                return Err(Error::new(path, ErrorKind::PathNotAbsolute, None));
            }
        }
        let is_server = self.scheme_specific_part.is_none() && self.host.is_some();
        let options = if is_server {
            ParseOptions::STRICT
        } else {
            ParseOptions::LENIENT
        };
        let composed = Composed(&self).to_string();
        Uri::parse_with(EncodedString::cast(composed), options)
    }
}

/// A proxy writing the encoded text of the URI a builder describes.
struct Composed<'a, 'b>(&'a Builder<'b>);

impl fmt::Display for Composed<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let builder = self.0;
        if let Some(scheme) = builder.nonempty_scheme() {
            write!(f, "{scheme}:")?;
        }
        if let Some(ssp) = builder.scheme_specific_part {
            write!(
                f,
                "{}",
                PercentEncoded::new(ssp, LegalSet::SCHEME_SPECIFIC_PART)
            )?;
        } else {
            if let Some(host) = builder.host {
                f.write_str("//")?;
                if let Some(user_info) = builder.user_info {
                    write!(f, "{}@", PercentEncoded::new(user_info, LegalSet::USER_INFO))?;
                }
                if host.contains(':') && !host.contains(['[', ']']) {
                    write!(f, "[{host}]")?;
                } else {
                    f.write_str(host)?;
                }
                if let Some(port) = builder.port {
                    write!(f, ":{port}")?;
                }
            } else if let Some(raw) = builder.registry_authority.filter(|raw| !raw.is_empty()) {
                write!(f, "//{}", PercentEncoded::new(raw, LegalSet::AUTHORITY))?;
            } else if builder.path.map_or(false, |path| path.starts_with("//")) {
                // Empty authority, so the path is not taken for one.
                f.write_str("//")?;
            }
            if let Some(path) = builder.path {
                write!(f, "{}", PercentEncoded::new(path, LegalSet::PATH))?;
            }
            if let Some(query) = builder.query {
                write!(f, "?{}", PercentEncoded::new(query, LegalSet::QUERY))?;
            }
        }
        if let Some(fragment) = builder.fragment {
            write!(f, "#{}", PercentEncoded::new(fragment, BUILT_FRAGMENT))?;
        }
        Ok(())
    }
}
