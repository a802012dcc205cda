use crate::http::request::{Method, RequestLine};

/// Splits a request line into method, target and version.
///
/// `line` is the text read up to (not including) the first `\r` or `\n`.
/// Tokens are separated by runs of whitespace; anything after the third
/// token is ignored. Parsing never fails: a blank line yields an empty
/// method, which the handler routes to the not-implemented branch.
pub fn parse_request_line(line: &str) -> RequestLine {
    let mut parts = line.split_whitespace();

    let method = Method::from_token(parts.next().unwrap_or(""));
    let target = parts.next().unwrap_or("").to_string();
    let version = parts.next().unwrap_or("").to_string();

    RequestLine {
        method,
        target,
        version,
    }
}
