//! Immutable URIs as used for jar and file resources.
//!
//! [`Uri`] follows [RFC 2396] in what it accepts, with the [RFC 3986]
//! legal character sets and a few repairs for real-world input:
//!
//! * URIs are opaque (`scheme:ssp`) or hierarchical
//!   (`[scheme:][//authority][path][?query]`), optionally followed by a
//!   `#fragment`.
//! * An authority is server-based (`[userinfo@]host[:port]`) if it can be
//!   parsed as such, and registry-based otherwise. [`Uri::parse`] insists
//!   on a server-based authority.
//! * Nested URIs, as in `jar:file:/dir/app.jar!/entry`, are kept opaque
//!   and can be extracted with [`Uri::contained_uri`]. An improperly
//!   escaped path of a nested URI is repaired on extraction.
//!
//! Derived URIs ([`normalize`][`Uri::normalize`],
//! [`directory`][`Uri::directory`], [`parent`][`Uri::parent`],
//! [`relative_of`][`Uri::relative_of`]) are new values; a `Uri` never
//! changes once parsed.
//!
//! # Text types
//!
//! [`EncodedString`] is text already in its percent-encoded form. Plain
//! `&str` is taken as unencoded by the encoding functions, and as encoded
//! by the parsers.
//!
//! ```
//! use jar_uri::{EncodedString, LegalSet, Uri};
//!
//! let path = EncodedString::encode("/a dir/app.jar", LegalSet::PATH);
//! assert_eq!(path, "/a%20dir/app.jar");
//!
//! let uri = Uri::parse("jar:file:/a%20dir/app.jar!/META-INF/MANIFEST.MF").unwrap();
//! let file = uri.contained_uri().unwrap().unwrap();
//! assert_eq!(file.path().unwrap().decode().unwrap(), "/a dir/app.jar");
//! ```
//!
//! # Features
//!
//! * `memchr`: uses [`memchr`] to search delimiters.
//! * `serde`: implements `Serialize` and `Deserialize` for [`Uri`], and
//!   `Serialize` for [`EncodedString`].
//!
//! [RFC 2396]: https://tools.ietf.org/html/rfc2396
//! [RFC 3986]: https://tools.ietf.org/html/rfc3986
//! [`memchr`]: https://crates.io/crates/memchr
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod build;
pub mod components;
mod convert;
mod encoded;
mod format;
pub mod normalize;
mod parser;
pub mod percent_encode;
pub mod query;
pub mod types;
pub mod validate;

pub use self::encoded::EncodedString;
pub use self::parser::char::LegalSet;
pub use self::types::Uri;
