//! Tests for nested URIs.

#[macro_use]
mod utils;

use jar_uri::validate::ErrorKind;

use self::utils::parse;

#[test]
fn jar_of_http() {
    let uri = parse("jar:http://x/y.jar!/a/b.class#frag");
    let contained = uri.contained_uri().expect("jar URI").expect("nested URI");
    assert_eq!(contained, parse("http://x/y.jar#frag"));
}

#[test]
fn resource_jars() {
    let cases = [
        (
            "jar:file:/gluegen/build-x86_64/gluegen-rt.jar!/com/jogamp/common/os/Platform.class",
            "file:/gluegen/build-x86_64/gluegen-rt.jar",
        ),
        (
            "jar:file://filehost/gluegen/gluegen-rt.jar!/",
            "file://filehost/gluegen/gluegen-rt.jar",
        ),
        (
            "jar:file:///C%3A/gluegen/gluegen-rt.jar!/com/Platform.class",
            "file:///C%3A/gluegen/gluegen-rt.jar",
        ),
        (
            "jar:http://localhost/gluegen/R%23/gluegen-rt.jar!/",
            "http://localhost/gluegen/R%23/gluegen-rt.jar",
        ),
    ];
    for (source, expected) in cases {
        let contained = parse(source)
            .contained_uri()
            .expect("jar URI")
            .expect("nested URI");
        assert_uri_text!(contained, expected);
        assert!(contained.is_absolute());
    }
}

#[test]
fn nested_jars() {
    let uri = parse("jar:jar:file:/outer.jar!/inner.jar!/a/B.class");
    let inner = uri.contained_uri().expect("jar URI").expect("nested URI");
    assert_uri_text!(inner, "jar:file:/outer.jar!/inner.jar");
    assert!(inner.is_opaque());
    let outer = inner.contained_uri().expect("jar URI").expect("nested URI");
    assert_uri_text!(outer, "file:/outer.jar");
}

/// Anything after the last `!` is dropped, a query included.
#[test]
fn drops_entry_query() {
    let uri = parse("jar:http://h/a.jar!/b.txt?x=1");
    let contained = uri.contained_uri().expect("jar URI").expect("nested URI");
    assert_uri_text!(contained, "http://h/a.jar");
}

#[test]
fn missing_separator() {
    let err = parse("jar:file:/a.jar")
        .contained_uri()
        .expect_err("no `!`");
    assert_eq!(err.kind(), ErrorKind::MissingJarSeparator);
}

#[test]
fn not_nested() {
    assert!(parse("http://h/a.jar").contained_uri().expect("ok").is_none());
    assert!(parse("mailto:someone@example.com").contained_uri().expect("ok").is_none());

    let isbn = parse("urn:isbn:0451450523").contained_uri().expect("ok");
    assert_uri_text!(isbn.expect("nested URI"), "isbn:0451450523");
}

#[test]
fn repairs_nested_path() {
    let uri = parse("jar:file:/build%20dir/a.jar!/x");
    let contained = uri.contained_uri().expect("jar URI").expect("nested URI");
    assert_uri_text!(contained, "file:/build%20dir/a.jar");

    let uri = parse("jar:file:/dir/E[/a.jar!/x");
    let contained = uri.contained_uri().expect("jar URI").expect("nested URI");
    assert_uri_text!(contained, "file:/dir/E%5B/a.jar");
}
