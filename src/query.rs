//! Query properties.
//!
//! A query is read as a list of `key[=value]` properties joined by a
//! separator, as in `?width=640;height=480`.

use core::fmt;

use crate::encoded::EncodedString;
use crate::parser::char::LegalSet;
use crate::percent_encode::PercentEncoded;
use crate::types::Uri;
use crate::validate::Error;

/// Separator of query properties.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuerySeparator {
    /// `;`.
    #[default]
    Semicolon,
    /// `&`.
    Ampersand,
}

impl QuerySeparator {
    /// Returns the separator character.
    #[inline]
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Semicolon => ';',
            Self::Ampersand => '&',
        }
    }
}

/// Legal set for a key or a value of a property.
const PROPERTY: LegalSet = LegalSet::QUERY.without(";&=");

/// Ordered query properties.
///
/// Keys and values are stored decoded, and encoded when written.
///
/// # Examples
///
/// ```
/// use jar_uri::query::{QueryProps, QuerySeparator};
/// use jar_uri::Uri;
///
/// let base = Uri::parse("camera://somewhere/0?mode=auto").unwrap();
/// let mut props = QueryProps::new(QuerySeparator::Ampersand);
/// props.insert("width", Some("640"));
/// props.insert("flag", None);
/// assert_eq!(
///     props.append_to(&base).unwrap().as_str(),
///     "camera://somewhere/0?mode=auto&width=640&flag"
/// );
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct QueryProps {
    /// Properties in insertion order.
    properties: Vec<(String, Option<String>)>,
    /// Separator.
    separator: QuerySeparator,
}

impl QueryProps {
    /// Creates an empty property list.
    #[inline]
    #[must_use]
    pub fn new(separator: QuerySeparator) -> Self {
        Self {
            properties: Vec::new(),
            separator,
        }
    }

    /// Reads the properties of the query of the URI.
    ///
    /// Empty properties are skipped. A later duplicate key replaces the
    /// value of the earlier one.
    pub fn parse(uri: &Uri, separator: QuerySeparator) -> Result<Self, Error> {
        let mut props = Self::new(separator);
        let query = match uri.query() {
            Some(query) => query.as_str(),
            None => return Ok(props),
        };
        for property in query.split(separator.as_char()).filter(|p| !p.is_empty()) {
            let (key, value) = match property.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (property, None),
            };
            let key = crate::percent_encode::decode(key)?;
            let value = value.map(crate::percent_encode::decode).transpose()?;
            props.insert(&key, value.as_deref());
        }
        Ok(props)
    }

    /// Returns the properties in order.
    #[inline]
    #[must_use]
    pub fn properties(&self) -> &[(String, Option<String>)] {
        &self.properties
    }

    /// Returns the separator.
    #[inline]
    #[must_use]
    pub fn separator(&self) -> QuerySeparator {
        self.separator
    }

    /// Returns true if there are no properties.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Returns the value of the key.
    ///
    /// The outer `None` means the key is absent, and the inner `None` means
    /// the key has no value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref())
    }

    /// Sets the property, keeping the position of an existing key.
    pub fn insert(&mut self, key: &str, value: Option<&str>) {
        let value = value.map(str::to_owned);
        match self.properties.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.properties.push((key.to_owned(), value)),
        }
    }

    /// Returns the query with the properties appended.
    ///
    /// A leading `?` of the base is ignored.
    #[must_use]
    pub fn append_to_query(&self, base: Option<&EncodedString>) -> EncodedString {
        let sep = self.separator.as_char();
        let mut query = base
            .map(|base| base.as_str().strip_prefix('?').unwrap_or(base.as_str()))
            .unwrap_or_default()
            .to_owned();
        if !query.is_empty() && !self.is_empty() && !query.ends_with(sep) {
            query.push(sep);
        }
        query.push_str(&self.to_string());
        EncodedString::cast(query)
    }

    /// Returns the URI with the properties appended to its query.
    ///
    /// The URI is returned unchanged if there are no properties.
    pub fn append_to(&self, uri: &Uri) -> Result<Uri, Error> {
        if self.is_empty() {
            return Ok(uri.clone());
        }
        let query = self.append_to_query(uri.query());
        uri.with_query(Some(&query))
    }
}

impl fmt::Display for QueryProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.properties.iter().enumerate() {
            if i != 0 {
                write!(f, "{}", self.separator.as_char())?;
            }
            write!(f, "{}", PercentEncoded::new(key.as_str(), PROPERTY))?;
            if let Some(value) = value {
                write!(f, "={}", PercentEncoded::new(value.as_str(), PROPERTY))?;
            }
        }
        Ok(())
    }
}
