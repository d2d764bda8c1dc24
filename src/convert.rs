//! Conversions from and to nested URIs, file paths, and re-encoded URIs.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::build::Builder;
use crate::encoded::EncodedString;
use crate::normalize::normalize_path_string;
use crate::parser::char::LegalSet;
use crate::parser::str::rfind;
use crate::parser::ParseOptions;
use crate::percent_encode::PercentEncoded;
use crate::types::Uri;
use crate::validate::{Error, ErrorKind};

/// Returns true if the slashified path starts with a drive letter, as `C:/`.
#[must_use]
fn is_drive_path(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
}

/// Decodes an optional component.
fn decode_opt(v: Option<&EncodedString>) -> Result<Option<String>, Error> {
    v.map(EncodedString::decode).transpose()
}

impl Uri {
    /// Returns the URI nested in the scheme-specific part.
    ///
    /// For a `jar` URI, the scheme-specific part is cut at the last `!`,
    /// dropping the entry path and anything after it. The fragment of this
    /// URI is carried over. The nested text may have an improperly escaped
    /// path, which is repaired.
    ///
    /// Returns `Ok(None)` if the nested text is not an absolute URI.
    ///
    /// # Failures
    ///
    /// Fails with [`ErrorKind::MissingJarSeparator`] for a `jar` URI without `!`.
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_uri::Uri;
    ///
    /// let uri = Uri::parse("jar:http://x/y.jar!/a/b.class#frag").unwrap();
    /// assert_eq!(
    ///     uri.contained_uri().unwrap(),
    ///     Some(Uri::parse("http://x/y.jar#frag").unwrap())
    /// );
    /// ```
    pub fn contained_uri(&self) -> Result<Option<Uri>, Error> {
        let ssp = self.scheme_specific_part().as_str();
        if ssp.is_empty() {
            return Ok(None);
        }
        let nested = if self.is_jar_scheme() {
            match rfind(ssp.as_bytes(), b'!') {
                Some(pos) => &ssp[..pos],
                None => {
                    return Err(Error::new(
                        self.as_str(),
                        ErrorKind::MissingJarSeparator,
                        None,
                    ))
                }
            }
        } else {
            ssp
        };
        let text = match self.fragment() {
            Some(fragment) => format!("{nested}#{fragment}"),
            None => nested.to_owned(),
        };
        match Uri::parse_with(EncodedString::cast(text), ParseOptions::NESTED) {
            Ok(uri) if uri.is_absolute() => Ok(Some(uri)),
            Ok(uri) => {
                tracing::debug!(uri = %self, nested = %uri, "nested URI is not absolute");
                Ok(None)
            }
            Err(e) => {
                tracing::debug!(uri = %self, error = %e, "no nested URI");
                Ok(None)
            }
        }
    }

    /// Creates a `file` URI from an absolute file path.
    ///
    /// Backslashes are turned into slashes, dot segments are resolved, and
    /// a drive path `C:\dir` becomes `/C:/dir`. A UNC path `\\host\share`
    /// stays part of the path, giving `file:////host/share`.
    ///
    /// # Failures
    ///
    /// Fails with [`ErrorKind::PathNotAbsolute`] for a relative path, and
    /// with [`ErrorKind::NonUnicodePath`] for a path that is not valid Unicode.
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_uri::Uri;
    ///
    /// let uri = Uri::from_file_path("/gluegen/build lala/gluegen-rt.jar").unwrap();
    /// assert_eq!(uri.as_str(), "file:/gluegen/build%20lala/gluegen-rt.jar");
    ///
    /// let uri = Uri::from_file_path("C:\\gluegen\\gluegen-rt.jar").unwrap();
    /// assert_eq!(uri.as_str(), "file:/C%3A/gluegen/gluegen-rt.jar");
    /// ```
    pub fn from_file_path<P: AsRef<Path>>(path: P) -> Result<Uri, Error> {
        let path = path.as_ref();
        let raw = match path.to_str() {
            Some(raw) => raw,
            None => {
                let lossy = path.to_string_lossy();
                return Err(Error::new(&lossy, ErrorKind::NonUnicodePath, None));
            }
        };
        if raw.is_empty() {
            return Err(Error::new(raw, ErrorKind::EmptyInput, None));
        }
        let slashified = raw.replace('\\', "/");
        let absolute = if slashified.starts_with('/') {
            slashified
        } else if is_drive_path(&slashified) {
            format!("/{slashified}")
        } else {
            return Err(Error::new(raw, ErrorKind::PathNotAbsolute, Some(0)));
        };
        let cleaned = normalize_path_string(&absolute)?;
        // A UNC host must not become the authority.
        let authority = if cleaned.starts_with("//") { "//" } else { "" };
        tracing::debug!(path = %raw, uri_path = %cleaned, "file path to URI");
        let text = format!(
            "file:{}{}",
            authority,
            PercentEncoded::new(cleaned.as_str(), LegalSet::PATH)
        );
        Uri::parse_with(EncodedString::cast(text), ParseOptions::LENIENT)
    }

    /// Returns the decoded file path of a `file` URI, using the given separator.
    ///
    /// A decoded authority is prepended as `//authority`. With a separator
    /// other than `/`, every `/` is replaced and a single leading separator
    /// is dropped, while a leading double separator (UNC) is kept.
    ///
    /// Returns `Ok(None)` for other schemes, opaque URIs, and empty paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_uri::Uri;
    ///
    /// let uri = Uri::parse("file:/C%3A/gluegen/build%20lala/gluegen-rt.jar").unwrap();
    /// assert_eq!(
    ///     uri.file_path_with_separator('\\').unwrap().unwrap(),
    ///     "C:\\gluegen\\build lala\\gluegen-rt.jar"
    /// );
    /// assert_eq!(
    ///     uri.file_path_with_separator('/').unwrap().unwrap(),
    ///     "/C:/gluegen/build lala/gluegen-rt.jar"
    /// );
    /// ```
    pub fn file_path_with_separator(&self, separator: char) -> Result<Option<String>, Error> {
        if !self.is_file_scheme() {
            return Ok(None);
        }
        let path = match self.path() {
            Some(path) if !path.is_empty() => path,
            _ => return Ok(None),
        };
        let mut decoded = String::new();
        if let Some(authority) = self.authority() {
            decoded.push_str("//");
            decoded.push_str(&authority.decode()?);
        }
        decoded.push_str(&path.decode()?);
        if separator == '/' {
            return Ok(Some(decoded));
        }

        let mut buf = [0_u8; 4];
        let replaced = decoded.replace('/', separator.encode_utf8(&mut buf));
        let sep_len = separator.len_utf8();
        let native = if replaced.starts_with(separator) && !replaced[sep_len..].starts_with(separator) {
            replaced[sep_len..].to_owned()
        } else {
            replaced
        };
        tracing::debug!(uri = %self, path = %native, "URI to file path");
        Ok(Some(native))
    }

    /// Returns the file path of a `file` URI for this platform.
    ///
    /// See [`file_path_with_separator`][`Self::file_path_with_separator`].
    pub fn to_file_path(&self) -> Result<Option<PathBuf>, Error> {
        self.file_path_with_separator(MAIN_SEPARATOR)
            .map(|path| path.map(PathBuf::from))
    }

    /// Decodes every component and builds the URI again.
    ///
    /// Useful for a URI taken from a source that escaped it incompletely
    /// or excessively.
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_uri::Uri;
    ///
    /// let uri = Uri::parse("http://localhost/%41%7e/b").unwrap();
    /// assert_eq!(uri.reencode().unwrap().as_str(), "http://localhost/A~/b");
    /// ```
    pub fn reencode(&self) -> Result<Uri, Error> {
        let scheme = decode_opt(self.scheme())?;
        let fragment = decode_opt(self.fragment())?;
        let opaque = if self.is_opaque() {
            Some(self.scheme_specific_part().decode()?)
        } else {
            None
        };
        let user_info = decode_opt(self.user_info())?;
        let host = decode_opt(self.host())?;
        let registry = match self.host() {
            Some(_) => None,
            None => decode_opt(self.authority())?,
        };
        let path = decode_opt(self.path())?;
        let query = decode_opt(self.query())?;

        let mut builder = Builder::new();
        if let Some(scheme) = scheme.as_deref() {
            builder.scheme(scheme);
        }
        if let Some(ssp) = opaque.as_deref() {
            builder.scheme_specific_part(ssp);
        }
        if let Some(host) = host.as_deref() {
            builder.host(host);
            if let Some(user_info) = user_info.as_deref() {
                builder.user_info(user_info);
            }
            if let Some(port) = self.port() {
                builder.port(port);
            }
        } else if let Some(registry) = registry.as_deref() {
            builder.authority(registry);
        }
        if let Some(path) = path.as_deref() {
            builder.path(path);
        }
        if let Some(query) = query.as_deref() {
            builder.query(query);
        }
        if let Some(fragment) = fragment.as_deref() {
            builder.fragment(fragment);
        }
        builder.build()
    }
}
