//! Per-connection failures.

use std::fmt;
use std::io;

/// An I/O failure that ends a single connection.
///
/// Malformed requests, traversal attempts and missing files are answered
/// with a status line and are not errors. This type only covers the cases
/// where the socket itself failed, and it never escapes the task that owns
/// the connection.
#[derive(Debug)]
pub enum ConnectionError {
    /// Reading the request from the client failed
    Read(io::Error),
    /// Writing the response (head or body) failed, or the peer went away
    Write(io::Error),
    /// Reading the file being served failed mid-transfer
    Body(io::Error),
    /// The client sent nothing usable within the configured read timeout
    ReadTimeout,
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::Read(e) => write!(f, "read: {e}"),
            ConnectionError::Write(e) => write!(f, "write: {e}"),
            ConnectionError::Body(e) => write!(f, "body file: {e}"),
            ConnectionError::ReadTimeout => write!(f, "read: timed out"),
        }
    }
}

impl std::error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConnectionError::Read(e) | ConnectionError::Write(e) | ConnectionError::Body(e) => {
                Some(e)
            }
            ConnectionError::ReadTimeout => None,
        }
    }
}
