use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::http::outcome::Outcome;
use crate::http::parser::parse_http_request;
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;

/// Most bytes read from a client. Anything past this is never looked at.
pub const MAX_REQUEST_BYTES: usize = 1024;

/// One accepted client, served a single request and then closed.
pub struct Connection<S> {
    stream: S,
    peer: SocketAddr,
    config: Arc<ServerConfig>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: SocketAddr, config: Arc<ServerConfig>) -> Self {
        Self {
            stream,
            peer,
            config,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection to `Closed` and shuts the stream down.
    ///
    /// The stream is shut down even when reading or writing failed; the
    /// error is then handed back for the caller to log.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let result = self.drive().await;

        if let Err(e) = self.stream.shutdown().await {
            debug!(peer = %self.peer, error = %e, "Shutdown failed");
        }

        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::Reading => match self.read_request().await? {
                    Some(req) => ConnectionState::Processing(req),
                    None => ConnectionState::Closed,
                },

                ConnectionState::Processing(req) => {
                    let outcome = self.handle_request(&req).await;

                    info!(
                        peer = %self.peer,
                        method = %req.method,
                        path = %req.target,
                        status = outcome.status().map(|s| s.as_u16()),
                        "Request handled"
                    );

                    match outcome.into_writer() {
                        Some(writer) => ConnectionState::Writing(writer),
                        None => ConnectionState::Closed,
                    }
                }

                ConnectionState::Writing(mut writer) => {
                    timeout(
                        self.config.write_timeout,
                        writer.write_to_stream(&mut self.stream),
                    )
                    .await
                    .context("timed out writing response")??;
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }

        Ok(())
    }

    /// Reads once, up to [`MAX_REQUEST_BYTES`].
    ///
    /// Returns `None` when the peer closed without sending anything.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        let Some(data) = self.read_once().await? else {
            debug!(peer = %self.peer, "Connection closed before any data");
            return Ok(None);
        };

        info!(
            peer = %self.peer,
            data = ?String::from_utf8_lossy(&data),
            "Request received"
        );

        Ok(Some(parse_http_request(&data)))
    }

    async fn read_once(&mut self) -> anyhow::Result<Option<Bytes>> {
        let mut buf = BytesMut::with_capacity(MAX_REQUEST_BYTES);

        let n = timeout(
            self.config.read_timeout,
            self.stream.read_buf(&mut (&mut buf).limit(MAX_REQUEST_BYTES)),
        )
        .await
        .context("timed out waiting for request")?
        .context("failed to read request")?;

        if n == 0 {
            return Ok(None);
        }

        Ok(Some(buf.freeze()))
    }

    async fn handle_request(&self, req: &Request) -> Outcome {
        if !req.is_retrieval() {
            debug!(peer = %self.peer, method = %req.method, "Unsupported method");
            return Outcome::BadRequest;
        }

        self.config.static_files.serve(&req.target).await
    }
}
