use bytes::Bytes;

use crate::http::request::{Method, Request};

/// Longest request line accepted, terminator included.
pub const MAX_REQUEST_LINE: usize = 2048;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No line terminator yet; more bytes are needed
    Incomplete,
    /// Not `METHOD SP TARGET SP VERSION`
    Malformed,
    UnsupportedMethod,
    InvalidVersion,
    /// Request line longer than `MAX_REQUEST_LINE`
    TooLarge,
}

/// Parses the request line at the start of `buf`.
///
/// `buf` holds everything read so far and is kept as the request's raw
/// bytes. Headers after the request line are ignored.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let line_end = request_line_end(buf)?;
    parse_request_line(&buf[..line_end], buf)
}

/// Parses a request the client stopped sending mid-line (end of stream).
///
/// The bytes read so far are taken as the whole request line.
pub fn parse_truncated_request(buf: &[u8]) -> Result<Request, ParseError> {
    if buf.len() > MAX_REQUEST_LINE {
        return Err(ParseError::TooLarge);
    }
    let line = buf.strip_suffix(b"\r").unwrap_or(buf);
    parse_request_line(line, buf)
}

/// Index of the request line terminator: the `\n`, or the `\r` before it.
pub fn request_line_end(buf: &[u8]) -> Result<usize, ParseError> {
    match buf.iter().position(|&b| b == b'\n') {
        Some(nl) if nl >= MAX_REQUEST_LINE => Err(ParseError::TooLarge),
        Some(nl) if nl > 0 && buf[nl - 1] == b'\r' => Ok(nl - 1),
        Some(nl) => Ok(nl),
        None if buf.len() >= MAX_REQUEST_LINE => Err(ParseError::TooLarge),
        None => Err(ParseError::Incomplete),
    }
}

fn parse_request_line(line: &[u8], raw: &[u8]) -> Result<Request, ParseError> {
    let line = std::str::from_utf8(line).map_err(|_| ParseError::Malformed)?;

    let mut parts = line.split(' ');

    let method_str = parts.next().ok_or(ParseError::Malformed)?;
    let target = parts.next().ok_or(ParseError::Malformed)?;
    let version = parts.next().ok_or(ParseError::Malformed)?;

    if parts.next().is_some() || method_str.is_empty() || target.is_empty() {
        return Err(ParseError::Malformed);
    }

    let method = Method::from_token(method_str).ok_or(ParseError::UnsupportedMethod)?;

    if !is_http_version(version) {
        return Err(ParseError::InvalidVersion);
    }

    Ok(Request {
        method,
        target: target.to_string(),
        version: version.to_string(),
        raw: Bytes::copy_from_slice(raw),
    })
}

fn is_http_version(token: &str) -> bool {
    token
        .strip_prefix("HTTP/")
        .and_then(|v| v.split_once('.'))
        .map(|(major, minor)| {
            !major.is_empty()
                && !minor.is_empty()
                && major.bytes().all(|b| b.is_ascii_digit())
                && minor.bytes().all(|b| b.is_ascii_digit())
        })
        .unwrap_or(false)
}

/// Position of the blank line ending the request head, if it has arrived.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
