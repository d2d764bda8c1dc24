//! Tests for percent encoding.

use jar_uri::percent_encode::{decode, PercentEncoded};
use jar_uri::validate::{find_illegal, ErrorKind};
use jar_uri::{EncodedString, LegalSet};

const SETS: [LegalSet; 6] = [
    LegalSet::USER_INFO,
    LegalSet::AUTHORITY,
    LegalSet::PATH,
    LegalSet::QUERY,
    LegalSet::SCHEME_SPECIFIC_PART,
    LegalSet::FRAGMENT,
];

/// Decoding encoded text gives the input back.
#[test]
fn round_trip() {
    let inputs = [
        "",
        "plain",
        "a b/c?d#e%f",
        "build-x86_64 \u{00F6}\u{00E4} lala",
        "\u{0394}\u{3000}\u{7F}\u{85}\t\n",
        "$^~#[]@!*'()",
        "\u{1F600} emoji",
    ];
    for legal in SETS {
        for input in inputs {
            let encoded = EncodedString::encode(input, legal);
            assert_eq!(encoded.decode().expect("valid"), input, "legal={legal:?}");
            assert_eq!(find_illegal(encoded.as_str(), legal), Ok(None));
        }
    }
}

#[test]
fn encodes_utf8_bytes() {
    assert_eq!(
        PercentEncoded::new("a\u{3000}b", LegalSet::PATH).to_string(),
        "a%E3%80%80b"
    );
    assert_eq!(
        PercentEncoded::ascii("\u{00F6}%20").to_string(),
        "%C3%B6%20"
    );
}

#[test]
fn decodes_runs() {
    assert_eq!(decode("%C3%B6%C3%A4").expect("valid"), "\u{00F6}\u{00E4}");
    assert_eq!(decode("a%2fb").expect("valid"), "a/b");
    assert_eq!(decode("%FF").expect("valid"), "\u{FFFD}");
    let long = "%41".repeat(100);
    assert_eq!(decode(&long).expect("valid"), "A".repeat(100));
}

#[test]
fn invalid_escapes() {
    for s in ["%", "%2", "a%g0", "%%41"] {
        let err = decode(s).expect_err(s);
        assert_eq!(err.kind(), ErrorKind::InvalidEscape, "input={s:?}");
    }
    let err = find_illegal("a%2x", LegalSet::PATH).expect_err("bad escape");
    assert_eq!(err.kind(), ErrorKind::InvalidEscape);
    assert_eq!(find_illegal("a b", LegalSet::PATH), Ok(Some(1)));
}
