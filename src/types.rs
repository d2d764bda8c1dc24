//! URI value type.

mod uri;

pub use self::uri::Uri;
