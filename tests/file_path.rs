//! Tests for conversion between URIs and file paths.

#[macro_use]
mod utils;

use jar_uri::validate::ErrorKind;
use jar_uri::Uri;

/// File path, URI, and the path converted back with `/`.
const UNIX_PATHS: &[(&str, &str, &str)] = &[
    (
        "/gluegen/build-x86_64/gluegen-rt.jar",
        "file:/gluegen/build-x86_64/gluegen-rt.jar",
        "/gluegen/build-x86_64/gluegen-rt.jar",
    ),
    (
        "/gluegen/\u{0394}/gluegen-rt.jar",
        "file:/gluegen/\u{0394}/gluegen-rt.jar",
        "/gluegen/\u{0394}/gluegen-rt.jar",
    ),
    (
        "/gluegen/build-x86_64 lala/gluegen-rt.jar",
        "file:/gluegen/build-x86_64%20lala/gluegen-rt.jar",
        "/gluegen/build-x86_64 lala/gluegen-rt.jar",
    ),
    (
        "/gluegen/build-x86_64 \u{00F6}\u{00E4} lala/gluegen-rt.jar",
        "file:/gluegen/build-x86_64%20\u{00F6}\u{00E4}%20lala/gluegen-rt.jar",
        "/gluegen/build-x86_64 \u{00F6}\u{00E4} lala/gluegen-rt.jar",
    ),
    (
        "/gluegen/A$/B^/C~/D#/E[/F]/gluegen-rt.jar",
        "file:/gluegen/A%24/B%5E/C~/D%23/E%5B/F%5D/gluegen-rt.jar",
        "/gluegen/A$/B^/C~/D#/E[/F]/gluegen-rt.jar",
    ),
    (
        "/gluegen/$/^/~/#/[/]/gluegen-rt.jar",
        "file:/gluegen/%24/%5E/~/%23/%5B/%5D/gluegen-rt.jar",
        "/gluegen/$/^/~/#/[/]/gluegen-rt.jar",
    ),
];

/// File path, URI, and the path converted back with `\`.
const WINDOWS_PATHS: &[(&str, &str, &str)] = &[
    (
        "C:/gluegen/build-x86_64/gluegen-rt.jar",
        "file:/C%3A/gluegen/build-x86_64/gluegen-rt.jar",
        "C:\\gluegen\\build-x86_64\\gluegen-rt.jar",
    ),
    (
        "C:/gluegen/\u{0394}/gluegen-rt.jar",
        "file:/C%3A/gluegen/\u{0394}/gluegen-rt.jar",
        "C:\\gluegen\\\u{0394}\\gluegen-rt.jar",
    ),
    (
        "C:\\gluegen\\build-x86_64 \u{00F6}\u{00E4} lala\\gluegen-rt.jar",
        "file:/C%3A/gluegen/build-x86_64%20\u{00F6}\u{00E4}%20lala/gluegen-rt.jar",
        "C:\\gluegen\\build-x86_64 \u{00F6}\u{00E4} lala\\gluegen-rt.jar",
    ),
    (
        "\\\\filehost\\gluegen\\build-x86_64 \u{00F6}\u{00E4} lala\\gluegen-rt.jar",
        "file:////filehost/gluegen/build-x86_64%20\u{00F6}\u{00E4}%20lala/gluegen-rt.jar",
        "\\\\filehost\\gluegen\\build-x86_64 \u{00F6}\u{00E4} lala\\gluegen-rt.jar",
    ),
    (
        "C:/gluegen/A$/B^/C~/D#/E[/F]/gluegen-rt.jar",
        "file:/C%3A/gluegen/A%24/B%5E/C~/D%23/E%5B/F%5D/gluegen-rt.jar",
        "C:\\gluegen\\A$\\B^\\C~\\D#\\E[\\F]\\gluegen-rt.jar",
    ),
    (
        "C:/gluegen/$/^/~/#/[/]/gluegen-rt.jar",
        "file:/C%3A/gluegen/%24/%5E/~/%23/%5B/%5D/gluegen-rt.jar",
        "C:\\gluegen\\$\\^\\~\\#\\[\\]\\gluegen-rt.jar",
    ),
];

#[test]
fn unix_paths() {
    for &(path, uri, back) in UNIX_PATHS {
        let converted = Uri::from_file_path(path).expect("absolute path");
        assert_uri_text!(converted, uri);
        assert_eq!(converted, Uri::parse(uri).expect("valid URI"));
        assert_eq!(
            converted.file_path_with_separator('/').expect("decodable").as_deref(),
            Some(back)
        );
    }
}

#[test]
fn windows_paths() {
    for &(path, uri, back) in WINDOWS_PATHS {
        let converted = Uri::from_file_path(path).expect("absolute path");
        assert_uri_text!(converted, uri);
        assert_eq!(
            converted.file_path_with_separator('\\').expect("decodable").as_deref(),
            Some(back)
        );
    }
}

#[test]
fn ascii_rendering() {
    let uri = Uri::from_file_path("/Hallo Welt \u{00F6}\u{00E4}").expect("absolute path");
    assert_uri_text!(uri, "file:/Hallo%20Welt%20\u{00F6}\u{00E4}");
    assert_eq!(uri.to_ascii_string(), "file:/Hallo%20Welt%20%C3%B6%C3%A4");
}

#[test]
fn resolves_dot_segments() {
    let uri = Uri::from_file_path("/a/b/../c/./d.jar").expect("absolute path");
    assert_uri_text!(uri, "file:/a/c/d.jar");
    assert_eq!(
        Uri::from_file_path("/..").expect_err("above the root").kind(),
        ErrorKind::UnresolvablePath
    );
}

#[test]
fn rejects_relative_paths() {
    for path in ["a/b", "C:", "./x"] {
        assert_eq!(
            Uri::from_file_path(path).expect_err(path).kind(),
            ErrorKind::PathNotAbsolute
        );
    }
    assert_eq!(
        Uri::from_file_path("").expect_err("empty").kind(),
        ErrorKind::EmptyInput
    );
}

#[test]
fn native_path() {
    let uri = Uri::parse("file:/tmp/a%20b/c.txt").expect("valid URI");
    let path = uri.to_file_path().expect("decodable").expect("file URI");
    if cfg!(windows) {
        assert_eq!(path, std::path::Path::new("tmp\\a b\\c.txt"));
    } else {
        assert_eq!(path, std::path::Path::new("/tmp/a b/c.txt"));
    }
}

#[test]
fn not_a_file() {
    let uri = Uri::parse("jar:file:/a.jar!/b").expect("valid URI");
    assert!(uri.file_path_with_separator('/').expect("ok").is_none());
    let file = uri.contained_uri().expect("jar URI").expect("nested URI");
    assert_eq!(
        file.file_path_with_separator('/').expect("decodable").as_deref(),
        Some("/a.jar")
    );
}
