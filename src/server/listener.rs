use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::http::connection::Connection;

/// Binds the listening socket. A failure here is fatal for the process.
pub async fn bind(cfg: &ServerConfig) -> anyhow::Result<TcpListener> {
    let addr = cfg.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        address = %cfg.address,
        port = cfg.port,
        root = %cfg.root().display(),
        "Listening"
    );
    Ok(listener)
}

/// Accepts connections forever, one spawned task per connection.
///
/// Tasks are never joined. With `max_connections` set, a permit is taken
/// before each accept, so clients past the limit wait in the backlog.
pub async fn serve(listener: TcpListener, cfg: Arc<ServerConfig>) -> anyhow::Result<()> {
    let limit = (cfg.max_connections > 0).then(|| Arc::new(Semaphore::new(cfg.max_connections)));

    loop {
        let permit = match &limit {
            Some(sem) => Some(
                Arc::clone(sem)
                    .acquire_owned()
                    .await
                    .context("connection limiter closed")?,
            ),
            None => None,
        };

        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "Failed to accept connection");
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let cfg = Arc::clone(&cfg);
        tokio::spawn(async move {
            let _permit = permit;
            let mut conn = Connection::new(socket, peer, cfg);
            if let Err(e) = conn.run().await {
                warn!(peer = %peer, "Connection error: {:#}", e);
            }
        });
    }
}

pub async fn run(cfg: Arc<ServerConfig>) -> anyhow::Result<()> {
    let listener = bind(&cfg).await?;
    serve(listener, cfg).await
}
