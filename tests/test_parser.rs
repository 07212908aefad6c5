use verbatim::http::parser::{
    MAX_REQUEST_LINE, ParseError, parse_http_request, parse_truncated_request, request_line_end,
};
use verbatim::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET /index.html HTTP/1.0\r\nHost: example.com\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.target, "/index.html");
    assert_eq!(parsed.version, "HTTP/1.0");
    assert_eq!(&parsed.raw[..], &req[..]);
}

#[test]
fn test_parse_keeps_query_in_target() {
    let req = b"GET /search?q=rust HTTP/1.1\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.target, "/search?q=rust");
}

#[test]
fn test_parse_bare_newline_terminator() {
    let parsed = parse_http_request(b"GET /a.css HTTP/1.0\n").unwrap();
    assert_eq!(parsed.target, "/a.css");
}

#[test]
fn test_parse_incomplete_request_line() {
    let result = parse_http_request(b"GET /index.ht");
    assert_eq!(result.unwrap_err(), ParseError::Incomplete);
}

#[test]
fn test_parse_non_get_methods_rejected() {
    for method in ["POST", "PUT", "DELETE", "HEAD", "get"] {
        let req = format!("{} / HTTP/1.0\r\n\r\n", method);
        let result = parse_http_request(req.as_bytes());
        assert_eq!(result.unwrap_err(), ParseError::UnsupportedMethod, "{method}");
    }
}

#[test]
fn test_parse_missing_target() {
    assert_eq!(parse_http_request(b"GET\r\n\r\n").unwrap_err(), ParseError::Malformed);
    assert_eq!(parse_http_request(b"GET /a\r\n\r\n").unwrap_err(), ParseError::Malformed);
    assert_eq!(parse_http_request(b"\r\n").unwrap_err(), ParseError::Malformed);
}

#[test]
fn test_parse_extra_spaces_rejected() {
    let result = parse_http_request(b"GET  /a HTTP/1.0\r\n\r\n");
    assert_eq!(result.unwrap_err(), ParseError::Malformed);

    let result = parse_http_request(b"GET /a HTTP/1.0 extra\r\n\r\n");
    assert_eq!(result.unwrap_err(), ParseError::Malformed);
}

#[test]
fn test_parse_invalid_version() {
    let result = parse_http_request(b"GET / FTP/1.0\r\n\r\n");
    assert_eq!(result.unwrap_err(), ParseError::InvalidVersion);

    let result = parse_http_request(b"GET / HTTP/one\r\n\r\n");
    assert_eq!(result.unwrap_err(), ParseError::InvalidVersion);
}

#[test]
fn test_parse_non_utf8_line() {
    let result = parse_http_request(b"GET /\xff\xfe HTTP/1.0\r\n\r\n");
    assert_eq!(result.unwrap_err(), ParseError::Malformed);
}

#[test]
fn test_parse_request_line_too_large() {
    let mut req = b"GET /".to_vec();
    req.extend(std::iter::repeat(b'a').take(MAX_REQUEST_LINE));
    assert_eq!(request_line_end(&req).unwrap_err(), ParseError::TooLarge);

    req.extend_from_slice(b" HTTP/1.0\r\n\r\n");
    assert_eq!(parse_http_request(&req).unwrap_err(), ParseError::TooLarge);
}

#[test]
fn test_request_line_end_excludes_crlf() {
    assert_eq!(request_line_end(b"GET / HTTP/1.0\r\nHost: x\r\n"), Ok(14));
    assert_eq!(request_line_end(b"GET / HTTP/1.0\n"), Ok(14));
}

#[test]
fn test_parse_truncated_request() {
    let parsed = parse_truncated_request(b"GET /style.css HTTP/1.0").unwrap();
    assert_eq!(parsed.target, "/style.css");

    let result = parse_truncated_request(b"GET /style.css");
    assert_eq!(result.unwrap_err(), ParseError::Malformed);
}

#[test]
fn test_parse_truncated_request_drops_dangling_cr() {
    let parsed = parse_truncated_request(b"GET /x HTTP/1.0\r").unwrap();

    assert_eq!(parsed.target, "/x");
    assert_eq!(parsed.version, "HTTP/1.0");
    assert_eq!(&parsed.raw[..], b"GET /x HTTP/1.0\r");
}
