//! Components.
#![allow(dead_code)]

/// Test case.
#[derive(Debug, Clone, Copy)]
pub struct TestCase<'a> {
    /// Test case name.
    pub name: &'a str,
    /// Composed string.
    pub composed: &'a str,
    /// Components.
    pub components: Components<'a>,
    /// Normalized string.
    pub normalized: &'a str,
}

/// Components of a URI.
#[derive(Default, Debug, Clone, Copy)]
pub struct Components<'a> {
    /// Scheme.
    pub scheme: Option<&'a str>,
    /// Whether the URI is opaque.
    pub opaque: bool,
    /// Raw authority.
    pub authority: Option<&'a str>,
    /// Userinfo.
    pub user_info: Option<&'a str>,
    /// Host.
    pub host: Option<&'a str>,
    /// Port.
    pub port: Option<u32>,
    /// Path.
    pub path: Option<&'a str>,
    /// Query.
    pub query: Option<&'a str>,
    /// Fragment.
    pub fragment: Option<&'a str>,
}

pub static TEST_CASES: &[TestCase<'static>] = &[
    TestCase {
        name: "server authority with everything",
        composed: "http://user:pw@example.com:8080/a/./b/../c?q=1#frag",
        components: Components {
            scheme: Some("http"),
            opaque: false,
            authority: Some("user:pw@example.com:8080"),
            user_info: Some("user:pw"),
            host: Some("example.com"),
            port: Some(8080),
            path: Some("/a/./b/../c"),
            query: Some("q=1"),
            fragment: Some("frag"),
        },
        normalized: "http://user:pw@example.com:8080/a/c?q=1#frag",
    },
    TestCase {
        name: "jar of file",
        composed: "jar:file:/web1/file1.jar!/rootDir/../file1.txt",
        components: Components {
            scheme: Some("jar"),
            opaque: true,
            authority: None,
            user_info: None,
            host: None,
            port: None,
            path: None,
            query: None,
            fragment: None,
        },
        normalized: "jar:file:/web1/file1.jar!/file1.txt",
    },
    TestCase {
        name: "jar of http",
        composed: "jar:http://localhost/test/dummy/../abc.jar!/a/./b/../C.class",
        components: Components {
            scheme: Some("jar"),
            opaque: true,
            authority: None,
            user_info: None,
            host: None,
            port: None,
            path: None,
            query: None,
            fragment: None,
        },
        normalized: "jar:http://localhost/test/abc.jar!/a/C.class",
    },
    TestCase {
        name: "escaped drive letter",
        composed: "file:/C%3A/gluegen/build%20lala/gluegen-rt.jar",
        components: Components {
            scheme: Some("file"),
            opaque: false,
            authority: None,
            user_info: None,
            host: None,
            port: None,
            path: Some("/C%3A/gluegen/build%20lala/gluegen-rt.jar"),
            query: None,
            fragment: None,
        },
        normalized: "file:/C%3A/gluegen/build%20lala/gluegen-rt.jar",
    },
    TestCase {
        name: "IPv6 host",
        composed: "http://[::1]:80/index.html",
        components: Components {
            scheme: Some("http"),
            opaque: false,
            authority: Some("[::1]:80"),
            user_info: None,
            host: Some("[::1]"),
            port: Some(80),
            path: Some("/index.html"),
            query: None,
            fragment: None,
        },
        normalized: "http://[::1]:80/index.html",
    },
    TestCase {
        name: "IPv4 host",
        composed: "http://192.168.0.1/",
        components: Components {
            scheme: Some("http"),
            opaque: false,
            authority: Some("192.168.0.1"),
            user_info: None,
            host: Some("192.168.0.1"),
            port: None,
            path: Some("/"),
            query: None,
            fragment: None,
        },
        normalized: "http://192.168.0.1/",
    },
    TestCase {
        name: "opaque mail address",
        composed: "mailto:someone@example.com",
        components: Components {
            scheme: Some("mailto"),
            opaque: true,
            authority: None,
            user_info: None,
            host: None,
            port: None,
            path: None,
            query: None,
            fragment: None,
        },
        normalized: "mailto:someone@example.com",
    },
    TestCase {
        name: "relative reference",
        composed: "../relative/./path.txt?x#y",
        components: Components {
            scheme: None,
            opaque: false,
            authority: None,
            user_info: None,
            host: None,
            port: None,
            path: Some("../relative/./path.txt"),
            query: Some("x"),
            fragment: Some("y"),
        },
        normalized: "../relative/path.txt?x#y",
    },
    TestCase {
        name: "empty authority",
        composed: "file:///tmp/x",
        components: Components {
            scheme: Some("file"),
            opaque: false,
            authority: None,
            user_info: None,
            host: None,
            port: None,
            path: Some("/tmp/x"),
            query: None,
            fragment: None,
        },
        normalized: "file:///tmp/x",
    },
    TestCase {
        name: "empty path with query",
        composed: "http://localhost?q",
        components: Components {
            scheme: Some("http"),
            opaque: false,
            authority: Some("localhost"),
            user_info: None,
            host: Some("localhost"),
            port: None,
            path: Some(""),
            query: Some("q"),
            fragment: None,
        },
        normalized: "http://localhost?q",
    },
];
