//! Algorithm to remove dot segments.

use crate::validate::{Error, ErrorKind};

/// Removes `.` and `..` segments of one `/`-delimited region, appending the result to `buf`.
///
/// Empty segments are kept. A path ending with a dot segment keeps a
/// trailing slash. A relative region keeps leading `..` segments it cannot
/// resolve, while `..` above the root of an absolute region is an error.
/// A relative region whose first remaining segment is empty gets a `./`
/// prefix, so it does not turn into an absolute path.
pub(super) fn remove_dot_segments(buf: &mut String, region: &str) -> Result<(), Error> {
    let (absolute, rest) = match region.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, region),
    };

    let mut segments: Vec<&str> = Vec::new();
    let mut trailing_slash = false;
    for segment in rest.split('/') {
        trailing_slash = false;
        match segment {
            "." => trailing_slash = true,
            ".." => {
                trailing_slash = true;
                match segments.last() {
                    Some(&last) if last != ".." => {
                        segments.pop();
                    }
                    _ if !absolute => segments.push(".."),
                    _ => {
                        return Err(Error::new(region, ErrorKind::UnresolvablePath, None));
                    }
                }
            }
            segment => segments.push(segment),
        }
    }

    if absolute {
        buf.push('/');
    } else if segments.len() > 1 && segments[0].is_empty() {
        buf.push_str("./");
    }
    for (i, segment) in segments.iter().enumerate() {
        if i != 0 {
            buf.push('/');
        }
        buf.push_str(segment);
    }
    if trailing_slash && !segments.is_empty() {
        buf.push('/');
    }
    Ok(())
}
