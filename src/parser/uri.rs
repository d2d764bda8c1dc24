//! Decomposition of URI text into components.

use crate::components::{Authority, Body, UriComponents};
use crate::encoded::EncodedString;
use crate::parser::char::{is_ascii_scheme_continue, LegalSet};
use crate::parser::host::validate_host;
use crate::parser::str::{find, find_split_hole, rfind, rfind_split_hole};
use crate::parser::validate::validate_component;
use crate::parser::ParseOptions;
use crate::percent_encode::{decode, PercentEncoded};
use crate::validate::{Error, ErrorKind};

/// Parses the encoded text into components.
pub(crate) fn parse(input: EncodedString, options: ParseOptions) -> Result<UriComponents, Error> {
    let s = input.as_str();
    if s.is_empty() {
        return Err(Error::new(s, ErrorKind::EmptyInput, None));
    }

    let (rest, fragment) = rfind_split_hole(s, b'#');
    if let Some(fragment) = fragment {
        validate_component(
            s,
            fragment,
            rest.len() + 1,
            LegalSet::FRAGMENT,
            ErrorKind::InvalidFragment,
        )?;
    }

    let (scheme, ssp, ssp_start) = match scheme_end(rest) {
        Some(0) => return Err(Error::new(s, ErrorKind::MissingScheme, Some(0))),
        Some(colon) => {
            let scheme = &rest[..colon];
            validate_scheme(s, scheme)?;
            let ssp = &rest[(colon + 1)..];
            if ssp.is_empty() {
                return Err(Error::new(
                    s,
                    ErrorKind::MissingSchemeSpecificPart,
                    Some(colon + 1),
                ));
            }
            (Some(scheme), ssp, colon + 1)
        }
        None => (None, rest, 0),
    };

    let body = if scheme.is_some() && !ssp.starts_with('/') {
        ensure_not_relative_path(s, ssp, ssp_start)?;
        validate_component(
            s,
            ssp,
            ssp_start,
            LegalSet::SCHEME_SPECIFIC_PART,
            ErrorKind::InvalidSchemeSpecificPart,
        )?;
        Body::Opaque
    } else {
        match parse_hierarchical(s, ssp, ssp_start, fragment.is_some(), options)? {
            Hierarchical::Parsed(body) => body,
            Hierarchical::Repaired(repaired) => {
                tracing::debug!(input = s, repaired = %repaired, "repaired path of URI");
                let options = ParseOptions {
                    fix_path: false,
                    ..options
                };
                return parse(repaired, options);
            }
        }
    };

    Ok(UriComponents {
        scheme: scheme.map(EncodedString::cast),
        scheme_specific_part: EncodedString::cast(ssp),
        body,
        fragment: fragment.map(EncodedString::cast),
        input,
    })
}

/// Returns the position of the scheme delimiter, if the text has a scheme.
///
/// A colon only ends a scheme if it comes before any `/` and `?`.
#[must_use]
fn scheme_end(s: &str) -> Option<usize> {
    let end = s.bytes().position(|b| matches!(b, b':' | b'/' | b'?'))?;
    (s.as_bytes()[end] == b':').then_some(end)
}

/// Validates a non-empty scheme.
fn validate_scheme(input: &str, scheme: &str) -> Result<(), Error> {
    let bytes = scheme.as_bytes();
    let bad = if bytes[0].is_ascii_alphabetic() {
        bytes
            .iter()
            .position(|&b| !is_ascii_scheme_continue(b))
    } else {
        Some(0)
    };
    match bad {
        Some(pos) => Err(Error::new(input, ErrorKind::InvalidScheme, Some(pos))),
        None => Ok(()),
    }
}

/// Rejects an absolute URI whose scheme-specific part is a relative path.
///
/// `scheme:seg/seg` is a relative path glued to a scheme, while a nested
/// `scheme:scheme:...` or a single segment stays a valid opaque URI.
fn ensure_not_relative_path(input: &str, ssp: &str, offset: usize) -> Result<(), Error> {
    let (head, _query) = find_split_hole(ssp, b'?');
    match find(head.as_bytes(), b'/') {
        Some(slash) if find(&head.as_bytes()[..slash], b':').is_none() => Err(Error::new(
            input,
            ErrorKind::PathNotAbsolute,
            Some(offset),
        )),
        _ => Ok(()),
    }
}

/// Result of parsing a hierarchical body.
enum Hierarchical {
    /// Successfully parsed body.
    Parsed(Body),
    /// Whole input with a repaired path, to be parsed again.
    Repaired(EncodedString),
}

/// Parses `[//authority]path[?query]`.
fn parse_hierarchical(
    input: &str,
    ssp: &str,
    ssp_start: usize,
    has_fragment: bool,
    options: ParseOptions,
) -> Result<Hierarchical, Error> {
    let (before_query, query) = find_split_hole(ssp, b'?');
    if let Some(query) = query {
        validate_component(
            input,
            query,
            ssp_start + before_query.len() + 1,
            LegalSet::QUERY,
            ErrorKind::InvalidQuery,
        )?;
    }

    let (authority, path, path_start) = match before_query.strip_prefix("//") {
        Some(after) => {
            let authority_start = ssp_start + 2;
            let (authority, path) = match find(after.as_bytes(), b'/') {
                Some(slash) => after.split_at(slash),
                None => {
                    if after.is_empty() && query.is_none() && !has_fragment {
                        return Err(Error::new(
                            input,
                            ErrorKind::MissingAuthority,
                            Some(authority_start),
                        ));
                    }
                    (after, "")
                }
            };
            let authority = (!authority.is_empty()).then_some((authority, authority_start));
            (authority, path, authority_start + after.len() - path.len())
        }
        None => (None, before_query, ssp_start),
    };

    if let Some((authority, authority_start)) = authority {
        validate_component(
            input,
            authority,
            authority_start,
            LegalSet::AUTHORITY,
            ErrorKind::InvalidAuthority,
        )?;
    }

    if let Err(e) = validate_component(
        input,
        path,
        path_start,
        LegalSet::PATH,
        ErrorKind::InvalidPath,
    ) {
        if !options.fix_path {
            return Err(e);
        }
        let decoded = decode(path).map_err(|e| e.relocate(input, path_start))?;
        let repaired = format!(
            "{}{}{}",
            &input[..path_start],
            PercentEncoded::new(decoded.as_str(), LegalSet::PATH),
            &input[(path_start + path.len())..]
        );
        return Ok(Hierarchical::Repaired(EncodedString::cast(repaired)));
    }

    let authority = match authority {
        Some((authority, authority_start)) => {
            decompose_authority(input, authority, authority_start, options.expect_server)?
        }
        None => Authority::None,
    };

    Ok(Hierarchical::Parsed(Body::Hierarchical {
        authority,
        path: EncodedString::cast(path),
        query: query.map(EncodedString::cast),
    }))
}

/// Decomposes a non-empty authority into `[userinfo@]host[:port]`.
///
/// Falls back to a registry-based authority unless `expect_server` is set.
fn decompose_authority(
    input: &str,
    authority: &str,
    offset: usize,
    expect_server: bool,
) -> Result<Authority, Error> {
    let raw = EncodedString::cast(authority);

    let (user_info, host_port, host_offset) = match rfind_split_hole(authority, b'@') {
        (user_info, Some(host_port)) => {
            if let Some(pos) = user_info.find(['[', ']']) {
                return Err(Error::new(
                    input,
                    ErrorKind::InvalidUserInfo,
                    Some(offset + pos),
                ));
            }
            (Some(user_info), host_port, offset + user_info.len() + 1)
        }
        (host_port, None) => (None, host_port, offset),
    };

    let bracket_end = find(host_port.as_bytes(), b']');
    let (host, port) = match rfind(host_port.as_bytes(), b':') {
        Some(colon) if bracket_end.map_or(true, |end| end < colon) => {
            let port = &host_port[(colon + 1)..];
            let port = if port.is_empty() {
                None
            } else {
                match parse_port(port) {
                    Some(port) => Some(port),
                    None if expect_server => {
                        return Err(Error::new(
                            input,
                            ErrorKind::InvalidPort,
                            Some(host_offset + colon + 1),
                        ))
                    }
                    None => return Ok(registry(raw)),
                }
            };
            (&host_port[..colon], port)
        }
        _ => (host_port, None),
    };

    if host.is_empty() {
        if expect_server {
            return Err(Error::new(input, ErrorKind::EmptyHost, Some(host_offset)));
        }
        return Ok(registry(raw));
    }
    if !validate_host(input, host, host_offset, expect_server)? {
        return Ok(registry(raw));
    }

    Ok(Authority::Server {
        raw,
        user_info: user_info.map(EncodedString::cast),
        host: EncodedString::cast(host),
        port,
    })
}

/// Parses a port as a non-negative 32-bit signed integer.
#[must_use]
fn parse_port(s: &str) -> Option<u32> {
    let port = s.parse::<i32>().ok()?;
    u32::try_from(port).ok()
}

/// Creates a registry-based authority.
fn registry(raw: EncodedString) -> Authority {
    tracing::trace!(authority = %raw, "authority is registry-based");
    Authority::Registry(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict(s: &str) -> Result<UriComponents, Error> {
        parse(EncodedString::cast(s), ParseOptions::STRICT)
    }

    fn lenient(s: &str) -> Result<UriComponents, Error> {
        parse(EncodedString::cast(s), ParseOptions::LENIENT)
    }

    fn error_of(s: &str) -> (ErrorKind, Option<usize>) {
        let err = strict(s).expect_err("should fail");
        (err.kind(), err.index())
    }

    #[test]
    fn scheme_detection() {
        assert_eq!(scheme_end("http://a"), Some(4));
        assert_eq!(scheme_end("a/b:c"), None);
        assert_eq!(scheme_end("a?b:c"), None);
        assert_eq!(scheme_end("abc"), None);
    }

    #[test]
    fn server_authority() {
        let c = strict("http://user:pw@example.com:8080/a/b?q=1#frag").unwrap();
        assert_eq!(c.scheme.unwrap(), "http");
        assert_eq!(c.fragment.unwrap(), "frag");
        assert_eq!(c.scheme_specific_part, "//user:pw@example.com:8080/a/b?q=1");
        match c.body {
            Body::Hierarchical {
                authority:
                    Authority::Server {
                        raw,
                        user_info,
                        host,
                        port,
                    },
                path,
                query,
            } => {
                assert_eq!(raw, "user:pw@example.com:8080");
                assert_eq!(user_info.unwrap(), "user:pw");
                assert_eq!(host, "example.com");
                assert_eq!(port, Some(8080));
                assert_eq!(path, "/a/b");
                assert_eq!(query.unwrap(), "q=1");
            }
            body => panic!("unexpected body {body:?}"),
        }
    }

    #[test]
    fn ipv6_authority() {
        let c = strict("http://[::1]:80/").unwrap();
        match c.body {
            Body::Hierarchical {
                authority: Authority::Server { host, port, .. },
                ..
            } => {
                assert_eq!(host, "[::1]");
                assert_eq!(port, Some(80));
            }
            body => panic!("unexpected body {body:?}"),
        }
        assert_eq!(error_of("http://[::g]/").0, ErrorKind::InvalidIpv6);
        assert_eq!(
            lenient("http://[::g]/").unwrap_err().kind(),
            ErrorKind::InvalidIpv6
        );
    }

    #[test]
    fn registry_fallback() {
        let c = lenient("http://under_score:99999999999/x").unwrap();
        match c.body {
            Body::Hierarchical {
                authority: Authority::Registry(raw),
                ..
            } => assert_eq!(raw, "under_score:99999999999"),
            body => panic!("unexpected body {body:?}"),
        }
        assert_eq!(
            error_of("http://host:99999999999/x"),
            (ErrorKind::InvalidPort, Some(12))
        );
        assert_eq!(
            error_of("http://under_score/x"),
            (ErrorKind::InvalidHost, Some(7))
        );
        assert_eq!(error_of("http://:80/x"), (ErrorKind::EmptyHost, Some(7)));
        assert_eq!(error_of("http://host:-1/x").0, ErrorKind::InvalidPort);
    }

    #[test]
    fn empty_port_and_authority() {
        let c = strict("http://host:/x").unwrap();
        assert!(matches!(
            c.body,
            Body::Hierarchical {
                authority: Authority::Server { port: None, .. },
                ..
            }
        ));
        let c = strict("file:///tmp/x").unwrap();
        assert!(matches!(
            c.body,
            Body::Hierarchical {
                authority: Authority::None,
                ..
            }
        ));
        assert_eq!(error_of("http://").0, ErrorKind::MissingAuthority);
        assert!(strict("http://?q").is_ok());
        assert!(strict("http://#f").is_ok());
    }

    #[test]
    fn opaque() {
        let c = strict("jar:http://x/y.jar!/a/b.class").unwrap();
        assert_eq!(c.body, Body::Opaque);
        assert_eq!(c.scheme_specific_part, "http://x/y.jar!/a/b.class");
        let c = strict("mailto:someone@example.com?subject=a/b").unwrap();
        assert_eq!(c.body, Body::Opaque);
    }

    #[test]
    fn relative() {
        let c = strict("../a/b?q#f").unwrap();
        assert!(c.scheme.is_none());
        match c.body {
            Body::Hierarchical { path, query, .. } => {
                assert_eq!(path, "../a/b");
                assert_eq!(query.unwrap(), "q");
            }
            body => panic!("unexpected body {body:?}"),
        }
    }

    #[test]
    fn fragment_at_last_hash() {
        let c = strict("http://h/p#a?b").unwrap();
        assert_eq!(c.fragment.unwrap(), "a?b");
        assert_eq!(error_of("http://h/p#a b"), (ErrorKind::InvalidFragment, Some(12)));
        // Only the last `#` delimits the fragment.
        assert_eq!(error_of("http://h/p#a#b"), (ErrorKind::InvalidPath, Some(10)));
    }

    #[test]
    fn errors() {
        assert_eq!(error_of(""), (ErrorKind::EmptyInput, None));
        assert_eq!(error_of(":x"), (ErrorKind::MissingScheme, Some(0)));
        assert_eq!(
            error_of("http:"),
            (ErrorKind::MissingSchemeSpecificPart, Some(5))
        );
        assert_eq!(error_of("1http:/x"), (ErrorKind::InvalidScheme, Some(0)));
        assert_eq!(error_of("ht_tp:/x"), (ErrorKind::InvalidScheme, Some(2)));
        assert_eq!(
            error_of("http:relative/path"),
            (ErrorKind::PathNotAbsolute, Some(5))
        );
        assert_eq!(error_of("http://h/a b"), (ErrorKind::InvalidPath, Some(10)));
        assert_eq!(error_of("http://h/a?b c"), (ErrorKind::InvalidQuery, Some(12)));
        assert_eq!(error_of("http://h/%zz"), (ErrorKind::InvalidEscape, Some(9)));
        assert_eq!(
            error_of("http://a[b@h/"),
            (ErrorKind::InvalidUserInfo, Some(8))
        );
        assert_eq!(
            error_of("http://h^/").0,
            ErrorKind::InvalidAuthority
        );
    }

    #[test]
    fn path_repair() {
        let c = parse(EncodedString::cast("file:/a b/c"), ParseOptions::NESTED).unwrap();
        assert_eq!(c.input, "file:/a%20b/c");
        assert_eq!(c.scheme_specific_part, "/a%20b/c");
        assert!(strict("file:/a b/c").is_err());
    }
}
