//! Components of a URI.

use crate::encoded::EncodedString;

/// Authority of a hierarchical URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authority {
    /// No authority, or an empty one.
    None,
    /// Authority that does not parse as `[userinfo@]host[:port]`.
    ///
    /// The raw text is kept verbatim.
    Registry(EncodedString),
    /// Authority with a valid domain name, IPv4, or IPv6 host.
    Server {
        /// Raw authority text.
        raw: EncodedString,
        /// Userinfo, without the trailing `@`.
        user_info: Option<EncodedString>,
        /// Host, with brackets for IPv6 literals.
        host: EncodedString,
        /// Port, if present and non-empty.
        port: Option<u32>,
    },
}

impl Authority {
    /// Returns the raw authority text.
    #[inline]
    #[must_use]
    pub fn as_encoded(&self) -> Option<&EncodedString> {
        match self {
            Self::None => None,
            Self::Registry(raw) | Self::Server { raw, .. } => Some(raw),
        }
    }

    /// Returns true for a server-based authority.
    #[inline]
    #[must_use]
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }
}

/// Everything after the scheme, except the fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Opaque URI: the scheme-specific part does not start with `/`.
    Opaque,
    /// Hierarchical URI.
    Hierarchical {
        /// Authority.
        authority: Authority,
        /// Path, possibly empty.
        path: EncodedString,
        /// Query, without the leading `?`.
        query: Option<EncodedString>,
    },
}

/// Decomposed URI, as produced by the parser.
#[derive(Debug, Clone)]
pub(crate) struct UriComponents {
    /// Whole encoded text.
    pub(crate) input: EncodedString,
    /// Scheme, without the trailing `:`.
    pub(crate) scheme: Option<EncodedString>,
    /// Text between the scheme and the fragment.
    pub(crate) scheme_specific_part: EncodedString,
    /// Opaque or hierarchical body.
    pub(crate) body: Body,
    /// Fragment, without the leading `#`.
    pub(crate) fragment: Option<EncodedString>,
}
