use std::sync::LazyLock;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

/// Version token of every response, whatever the request said.
pub const HTTP_VERSION: &str = "HTTP/1.0";

/// The 404 response, rendered once for the life of the process.
pub static NOT_FOUND: LazyLock<Vec<u8>> =
    LazyLock::new(|| serialize_response(&Response::not_found()));

/// The 400 response, rendered once for the life of the process.
pub static BAD_REQUEST: LazyLock<Vec<u8>> =
    LazyLock::new(|| serialize_response(&Response::bad_request()));

/// Frames a response as status line, headers, blank line and body.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128 + resp.body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(b"\r\n");
    buf.extend_from_slice(&resp.body);

    buf
}

/// Holds framed response bytes and tracks how many reached the peer.
#[derive(Debug)]
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self::from_bytes(serialize_response(response))
    }

    /// Wraps bytes that are already framed, such as [`NOT_FOUND`].
    pub fn from_bytes(buffer: Vec<u8>) -> Self {
        Self { buffer, written: 0 }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buffer
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
