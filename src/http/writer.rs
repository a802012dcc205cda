use bytes::Bytes;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::ResponseDocument;

/// Writes one serialized response as a single contiguous buffer.
pub struct ResponseWriter {
    buffer: Bytes,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &ResponseDocument) -> Self {
        Self {
            buffer: response.to_bytes(),
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub async fn write_to_stream<S>(&mut self, stream: &mut S) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
