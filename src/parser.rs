//! Common stuff for parsing.

pub(crate) mod char;
pub(crate) mod host;
pub(crate) mod str;
pub(crate) mod uri;
pub(crate) mod validate;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParseOptions {
    /// Whether the authority must be server-based.
    ///
    /// If false, an authority with an invalid host or port silently becomes
    /// registry-based.
    pub(crate) expect_server: bool,
    /// Whether an invalid path may be repaired by decoding and re-encoding it.
    pub(crate) fix_path: bool,
}

impl ParseOptions {
    /// Options for the public entry points.
    pub(crate) const STRICT: Self = Self {
        expect_server: true,
        fix_path: false,
    };
    /// Options for re-parsing text derived from an already accepted URI.
    pub(crate) const LENIENT: Self = Self {
        expect_server: false,
        fix_path: false,
    };
    /// Options for text extracted from inside an opaque URI.
    pub(crate) const NESTED: Self = Self {
        expect_server: false,
        fix_path: true,
    };
}
