use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::BytesMut;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::error::ConnectionError;
use crate::files::{ResolveError, ResolvedPath};
use crate::http::mime::content_type_for;
use crate::http::parser::{
    ParseError, find_headers_end, parse_http_request, parse_truncated_request, request_line_end,
};
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;

/// Bytes asked of the socket per read.
pub const READ_CHUNK: usize = 2048;

/// Cap on request head bytes buffered (request line plus headers).
pub const MAX_REQUEST_HEAD: usize = 8192;

/// One accepted socket, handled from first byte to close.
///
/// `run` consumes the connection, so the socket is closed exactly once when
/// it returns, on success and on every error path.
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    config: Arc<ServerConfig>,
    buffer: BytesMut,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Resolving(Request),
    Writing(ResponseWriter),
    Closed,
}

/// What reading the request produced.
enum ReadOutcome {
    Request(Request),
    Malformed(ParseError),
    /// Peer closed without sending anything
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, peer: SocketAddr, config: Arc<ServerConfig>) -> Self {
        Self {
            stream,
            peer,
            config,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(mut self) -> Result<(), ConnectionError> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        ReadOutcome::Request(req) => ConnectionState::Resolving(req),
                        ReadOutcome::Malformed(e) => {
                            warn!(peer = %self.peer, error = ?e, "400 Bad Request");
                            ConnectionState::Writing(ResponseWriter::new(Response::bad_request()))
                        }
                        ReadOutcome::Closed => {
                            debug!(peer = %self.peer, "closed before sending a request");
                            ConnectionState::Closed
                        }
                    };
                }

                ConnectionState::Resolving(req) => {
                    let response = self.respond_to(&req).await;
                    self.state = ConnectionState::Writing(ResponseWriter::new(response));
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    debug!(peer = %self.peer, body_bytes = writer.body_written(), "response sent");

                    // Closing is what delimits the body; send FIN now.
                    if let Err(e) = self.stream.shutdown().await {
                        debug!(peer = %self.peer, "shutdown failed: {}", e);
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    /// Reads until the request line is complete, then parses it.
    ///
    /// Requests split across several packets are reassembled. At end of
    /// stream, whatever arrived is parsed as the request line.
    async fn read_request(&mut self) -> Result<ReadOutcome, ConnectionError> {
        loop {
            match request_line_end(&self.buffer) {
                Err(ParseError::Incomplete) => {}
                _ => {
                    self.drain_ready()?;
                    return Ok(match parse_http_request(&self.buffer) {
                        Ok(req) => ReadOutcome::Request(req),
                        Err(e) => ReadOutcome::Malformed(e),
                    });
                }
            }

            if self.read_some().await? == 0 {
                if self.buffer.is_empty() {
                    return Ok(ReadOutcome::Closed);
                }
                return Ok(match parse_truncated_request(&self.buffer) {
                    Ok(req) => ReadOutcome::Request(req),
                    Err(e) => ReadOutcome::Malformed(e),
                });
            }
        }
    }

    async fn read_some(&mut self) -> Result<usize, ConnectionError> {
        self.buffer.reserve(READ_CHUNK);
        let read = self.stream.read_buf(&mut self.buffer);

        let n = match self.config.read_timeout {
            Some(limit) => tokio::time::timeout(limit, read)
                .await
                .map_err(|_| ConnectionError::ReadTimeout)?,
            None => read.await,
        };

        n.map_err(ConnectionError::Read)
    }

    /// Pulls in header bytes the client already sent, without waiting.
    ///
    /// Unread bytes left in the receive buffer make the kernel reset the
    /// connection on close, which can destroy the response in flight.
    fn drain_ready(&mut self) -> Result<(), ConnectionError> {
        let mut chunk = [0u8; READ_CHUNK];

        while find_headers_end(&self.buffer).is_none() && self.buffer.len() < MAX_REQUEST_HEAD {
            match self.stream.try_read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => self.buffer.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) => return Err(ConnectionError::Read(e)),
            }
        }

        Ok(())
    }

    async fn respond_to(&self, req: &Request) -> Response {
        let response = match ResolvedPath::probe(&self.config.document_root, &req.target).await {
            Ok(resolved) if resolved.exists => {
                match File::open(&resolved.absolute_path).await {
                    Ok(file) => Response::file(file, content_type_for(&resolved.absolute_path)),
                    Err(e) => {
                        debug!(path = %resolved.absolute_path.display(), "open failed: {}", e);
                        Response::not_found()
                    }
                }
            }
            Ok(_) => Response::not_found(),
            Err(ResolveError::PathTraversal) => Response::forbidden(),
            Err(ResolveError::BadTarget) => Response::bad_request(),
        };

        match response.status {
            StatusCode::Ok | StatusCode::NotFound => {
                info!(
                    peer = %self.peer,
                    method = req.method.as_str(),
                    target = %req.target,
                    "{}",
                    status_text(response.status)
                )
            }
            status => {
                warn!(peer = %self.peer, target = %req.target, "{}", status_text(status))
            }
        }

        response
    }
}

fn status_text(status: StatusCode) -> String {
    format!("{} {}", status.as_u16(), status.reason_phrase())
}
