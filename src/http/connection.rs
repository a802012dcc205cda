use std::io::ErrorKind;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufStream};
use tokio::time::timeout;

use crate::http::response::ResponseDocument;
use crate::http::writer::ResponseWriter;

/// Most unread client input discarded on close.
const DRAIN_LIMIT: u64 = 1024 * 1024;

/// How long close waits for the client to finish sending.
const DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

/// One accepted connection: a buffered byte stream plus the peer it came from.
///
/// Generic over the stream so the handler can be driven by a `TcpStream` or
/// by an in-memory duplex pipe.
pub struct Connection<S> {
    stream: BufStream<S>,
    peer: String,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: impl Into<String>) -> Self {
        Self {
            stream: BufStream::new(stream),
            peer: peer.into(),
        }
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Reads bytes until the first `\r` or `\n`.
    ///
    /// The terminator is consumed but not returned. End of stream before a
    /// terminator, or more than `limit` bytes without one, is an error.
    pub async fn read_line(&mut self, limit: usize) -> anyhow::Result<String> {
        let mut line = Vec::new();

        loop {
            let byte = match self.stream.read_u8().await {
                Ok(byte) => byte,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                    anyhow::bail!(
                        "connection closed after {} bytes without a line terminator",
                        line.len()
                    );
                }
                Err(e) => return Err(e.into()),
            };

            if byte == b'\r' || byte == b'\n' {
                break;
            }

            if line.len() >= limit {
                anyhow::bail!("request line exceeds {limit} bytes");
            }

            line.push(byte);
        }

        Ok(String::from_utf8_lossy(&line).into_owned())
    }

    /// Sends the whole response and flushes it. Returns the byte count.
    pub async fn write_response(&mut self, response: &ResponseDocument) -> anyhow::Result<usize> {
        let mut writer = ResponseWriter::new(response);
        writer.write_to_stream(&mut self.stream).await?;
        Ok(writer.written())
    }

    /// Shuts the write side down, drains what the client still sends, then
    /// drops the stream.
    ///
    /// Request headers after the first line are never read. A socket dropped
    /// with unread input is reset, cutting off the response, so input is
    /// discarded up to EOF first (bounded in bytes and time).
    ///
    /// Takes `self` so a connection can only be closed once.
    pub async fn close(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!(peer = %self.peer, error = %e, "Shutdown failed");
        }

        let mut unread = (&mut self.stream).take(DRAIN_LIMIT);
        match timeout(DRAIN_TIMEOUT, tokio::io::copy(&mut unread, &mut tokio::io::sink())).await {
            Ok(Ok(drained)) => {
                tracing::trace!(peer = %self.peer, bytes = drained, "Drained unread input");
            }
            Ok(Err(e)) => {
                tracing::debug!(peer = %self.peer, error = %e, "Drain failed");
            }
            Err(_) => {
                tracing::debug!(peer = %self.peer, "Client did not finish sending before close");
            }
        }
    }
}
