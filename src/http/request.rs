use bytes::Bytes;

/// HTTP request methods.
///
/// Only GET is served. Anything else is rejected by the parser before a
/// `Request` is built, so this stays a single-variant enum for now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a file
    GET,
}

impl Method {
    /// Parses an HTTP method token.
    ///
    /// # Example
    ///
    /// ```
    /// # use verbatim::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_token("get"), None);
    /// assert_eq!(Method::from_token("POST"), None);
    /// ```
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
        }
    }
}

/// A request as read off one connection.
///
/// Lives only until its target has been resolved.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method
    pub method: Method,
    /// Raw request target exactly as the client sent it (e.g. "/index.html?v=2")
    pub target: String,
    /// HTTP version token (e.g. "HTTP/1.0")
    pub version: String,
    /// Every byte read from the socket for this request
    pub raw: Bytes,
}
