//! HTTP protocol implementation.
//!
//! A deliberately small subset of HTTP/1.0: one `GET` per connection, no
//! headers read, every reply closes the connection.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection session state machine
//! - **`parser`**: Pulls the method and target out of the first read
//! - **`request`**: Request line and method types
//! - **`decode`**: Strict percent-decoding of targets
//! - **`outcome`**: Classification of a handled request
//! - **`response`**: Status codes, fixed bodies and the response builder
//! - **`writer`**: Serializes responses and writes them to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One read, up to 1024 bytes
//!        └──────┬──────┘
//!               │ Bytes received (no bytes → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Resolve target, read file
//!        └──────┬───────────┘
//!               │ Outcome framed (internal error → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │
//!               ▼
//!             Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use warden::config::ServerConfig;
//! use warden::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cfg = Arc::new(ServerConfig::new([127, 0, 0, 1].into(), 8080, "/srv/www"));
//!     let listener = TcpListener::bind(cfg.socket_addr()).await?;
//!
//!     loop {
//!         let (socket, peer) = listener.accept().await?;
//!         let cfg = Arc::clone(&cfg);
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, peer, cfg);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod decode;
pub mod outcome;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
