use tokio::fs::File;

/// Status codes this server can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use verbatim::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
        }
    }

    /// `"HTTP/1.0 404 Not Found"`, without the line terminator.
    pub fn status_line(&self) -> String {
        format!("{} {} {}", HTTP_VERSION, self.as_u16(), self.reason_phrase())
    }
}

pub const HTTP_VERSION: &str = "HTTP/1.0";

/// A response waiting to be written.
///
/// Owns the open file it streams from; the handle closes when the response
/// is dropped, whichever way the write ends.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    /// `Content-Type` value, omitted from the head when `None`
    pub content_type: Option<&'static str>,
    /// File to stream as the body
    pub body: Option<File>,
}

impl Response {
    /// A 200 response streaming `file`.
    pub fn file(file: File, content_type: Option<&'static str>) -> Self {
        Self {
            status: StatusCode::Ok,
            content_type,
            body: Some(file),
        }
    }

    /// A bare status line with no headers and no body.
    pub fn status_only(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            body: None,
        }
    }

    pub fn not_found() -> Self {
        Self::status_only(StatusCode::NotFound)
    }

    pub fn forbidden() -> Self {
        Self::status_only(StatusCode::Forbidden)
    }

    pub fn bad_request() -> Self {
        Self::status_only(StatusCode::BadRequest)
    }

    /// Serialises the response head.
    ///
    /// A response with a body gets its optional `Content-Type` line and the
    /// blank line ending the head. Body-less responses are the status line
    /// alone, and the closing connection ends them.
    pub fn head_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        buf.extend_from_slice(self.status.status_line().as_bytes());
        buf.extend_from_slice(b"\r\n");

        if self.body.is_some() {
            if let Some(content_type) = self.content_type {
                buf.extend_from_slice(b"Content-Type: ");
                buf.extend_from_slice(content_type.as_bytes());
                buf.extend_from_slice(b"\r\n");
            }
            buf.extend_from_slice(b"\r\n");
        }

        buf
    }
}
