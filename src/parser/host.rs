//! Host validators.

use crate::validate::{Error, ErrorKind};

/// Returns true if the host is a syntactically valid domain name.
///
/// Every character is an ASCII letter, digit, `-`, or `.`, and no label
/// starts or ends with `-`. A host with a single label starting with a digit
/// is rejected, while the last label of a multi-label host may be numeric.
///
/// # Examples
///
/// ```
/// use jar_uri::validate::is_domain_name;
///
/// assert!(is_domain_name("www.example.com"));
/// assert!(is_domain_name("localhost"));
/// assert!(is_domain_name("host.42"));
/// assert!(!is_domain_name("42host"));
/// assert!(!is_domain_name("-bad.example.com"));
/// ```
#[must_use]
pub fn is_domain_name(host: &str) -> bool {
    if !host
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'.')
    {
        return false;
    }
    let mut num_labels = 0_usize;
    let mut last = None;
    for label in host.split('.').filter(|label| !label.is_empty()) {
        if label.starts_with('-') || label.ends_with('-') {
            return false;
        }
        num_labels += 1;
        last = Some(label);
    }
    match last {
        None => false,
        Some(label) if num_labels == 1 => !label.as_bytes()[0].is_ascii_digit(),
        Some(_) => true,
    }
}

/// Returns true if the host is a dotted-quad IPv4 address.
///
/// # Examples
///
/// ```
/// use jar_uri::validate::is_ipv4;
///
/// assert!(is_ipv4("255.255.255.255"));
/// assert!(!is_ipv4("256.0.0.1"));
/// assert!(!is_ipv4("1.2.3"));
/// ```
#[must_use]
pub fn is_ipv4(host: &str) -> bool {
    let mut octets = 0;
    for octet in host.split('.') {
        if octets == 4 || octet.parse::<u8>().is_err() {
            return false;
        }
        octets += 1;
    }
    octets == 4
}

/// Returns true if the string is one IPv4 octet of one to three digits.
#[must_use]
fn is_ipv4_word(word: &[u8]) -> bool {
    (1..=3).contains(&word.len())
        && word.iter().all(u8::is_ascii_digit)
        && word.iter().fold(0_u32, |acc, &b| acc * 10 + u32::from(b - b'0')) <= 255
}

/// Returns true if the address is an IPv6 literal, with or without brackets.
///
/// Words hold at most four hex digits, at most one `::` compression is
/// allowed, and a trailing IPv4 dotted-quad must follow either six colons or
/// a `::`.
///
/// # Examples
///
/// ```
/// use jar_uri::validate::is_ipv6;
///
/// assert!(is_ipv6("[::1]"));
/// assert!(is_ipv6("2001:db8::ff00:42:8329"));
/// assert!(is_ipv6("[::ffff:192.0.2.128]"));
/// assert!(!is_ipv6("[1:2:3:4:5:6:7:8:9]"));
/// assert!(!is_ipv6("[:::1]"));
/// ```
#[must_use]
pub fn is_ipv6(addr: &str) -> bool {
    let bytes = addr.as_bytes();
    let len = bytes.len();
    if len < 2 {
        return false;
    }
    let at = |i: usize| bytes.get(i).copied().unwrap_or(0);

    let mut offset = 0;
    let mut colons = 0;
    let mut periods = 0;
    let mut double_colon = false;
    let mut word = [0_u8; 4];
    let mut word_len = 0;
    let mut prev = 0_u8;

    for (i, &c) in bytes.iter().enumerate() {
        match c {
            b'[' => {
                if i != 0 || bytes[len - 1] != b']' {
                    return false;
                }
                if at(1) == b':' && at(2) != b':' {
                    return false;
                }
                offset = 1;
                if len < 4 {
                    return false;
                }
            }
            b']' => {
                if i != len - 1 || bytes[0] != b'[' {
                    return false;
                }
            }
            b'.' => {
                periods += 1;
                if periods > 3 || !is_ipv4_word(&word[..word_len]) {
                    return false;
                }
                if colons != 6 && !double_colon {
                    return false;
                }
                if colons == 7 && at(offset) != b':' && at(offset + 1) != b':' {
                    return false;
                }
                word_len = 0;
            }
            b':' => {
                colons += 1;
                if colons > 7 || periods > 0 {
                    return false;
                }
                if prev == b':' {
                    if double_colon {
                        return false;
                    }
                    double_colon = true;
                }
                word_len = 0;
            }
            _ => {
                if word_len == word.len() || !c.is_ascii_hexdigit() {
                    return false;
                }
                word[word_len] = c;
                word_len += 1;
            }
        }
        prev = c;
    }

    if periods > 0 {
        periods == 3 && is_ipv4_word(&word[..word_len])
    } else {
        if colons != 7 && !double_colon {
            return false;
        }
        // A trailing colon is only fine as part of `::`.
        word_len != 0
            || at(len - 1 - offset) == b':'
            || len
                .checked_sub(2 + offset)
                .map_or(false, |i| at(i) == b':')
    }
}

/// Validates a host, returning whether it is usable for a server-based authority.
///
/// Bracketed hosts must be valid IPv6 literals regardless of `expect_server`.
/// Otherwise the host is tried as an IPv4 address when its rightmost label
/// starts with a digit, and as a domain name else. When that fails, it is an
/// error if `expect_server` is set and `Ok(false)` otherwise.
pub(crate) fn validate_host(
    input: &str,
    host: &str,
    offset: usize,
    expect_server: bool,
) -> Result<bool, Error> {
    if host.starts_with('[') {
        if !host.ends_with(']') || !is_ipv6(host) {
            return Err(Error::new(input, ErrorKind::InvalidIpv6, Some(offset)));
        }
        return Ok(true);
    }
    if host.contains(['[', ']']) {
        return Err(Error::new(input, ErrorKind::InvalidHost, Some(offset)));
    }

    let last_label = host.rsplit('.').next().unwrap_or(host);
    let valid = if last_label.starts_with(|c: char| c.is_ascii_digit()) {
        is_ipv4(host)
    } else {
        is_domain_name(host)
    };
    if valid {
        Ok(true)
    } else if expect_server {
        Err(Error::new(input, ErrorKind::InvalidHost, Some(offset)))
    } else {
        Ok(false)
    }
}
