use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::ConnectionError;
use crate::http::response::Response;

/// Chunk size for streaming file bodies.
pub const CHUNK_SIZE: usize = 2048;

/// Streams one response: head first, then the body file chunk by chunk.
pub struct ResponseWriter {
    head: Vec<u8>,
    response: Response,
    /// Body bytes flushed to the peer so far
    body_written: u64,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        Self {
            head: response.head_bytes(),
            response,
            body_written: 0,
        }
    }

    pub fn body_written(&self) -> u64 {
        self.body_written
    }

    /// Writes the whole response to `stream`.
    ///
    /// Any error means the peer did not get the full response; the caller
    /// should drop the connection. Socket failures come back as `Write`,
    /// failures reading the file as `Body`. The body file is closed when the
    /// writer is dropped.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> Result<(), ConnectionError>
    where
        W: AsyncWrite + Unpin,
    {
        write_fully(stream, &self.head)
            .await
            .map_err(ConnectionError::Write)?;

        if let Some(file) = self.response.body.as_mut() {
            self.body_written = copy_chunked(file, stream).await?;
        }

        stream.flush().await.map_err(ConnectionError::Write)
    }
}

/// Streams everything `source` yields to `stream`, chunk by chunk.
///
/// Returns the number of bytes transferred.
pub async fn copy_chunked<R, W>(source: &mut R, stream: &mut W) -> Result<u64, ConnectionError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut chunk = [0u8; CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let n = source.read(&mut chunk).await.map_err(ConnectionError::Body)?;
        if n == 0 {
            return Ok(total);
        }
        write_fully(stream, &chunk[..n])
            .await
            .map_err(ConnectionError::Write)?;
        total += n as u64;
    }
}

/// Loops until every byte of `buf` has been accepted by `stream`.
async fn write_fully<W>(stream: &mut W, buf: &[u8]) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    while written < buf.len() {
        let n = stream.write(&buf[written..]).await?;

        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "connection closed while writing",
            ));
        }

        written += n;
    }
    Ok(())
}
