//! Sessions driven over in-memory streams.

mod common;

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use common::{TempRoot, header_value, split_response};
use tokio::io::{AsyncReadExt, AsyncWriteExt, duplex};
use warden::config::ServerConfig;
use warden::http::connection::{Connection, MAX_REQUEST_BYTES};
use warden::http::response::{BAD_REQUEST_BODY, NOT_FOUND_BODY};

fn peer() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

fn config(root: &TempRoot) -> Arc<ServerConfig> {
    Arc::new(ServerConfig::new(Ipv4Addr::LOCALHOST, 8080, root.path()))
}

/// Sends `request`, lets the session run to completion and returns
/// everything it wrote.
async fn exchange(cfg: Arc<ServerConfig>, request: &[u8]) -> (anyhow::Result<()>, Vec<u8>) {
    let (mut client, server) = duplex(64 * 1024);
    client.write_all(request).await.unwrap();

    let mut conn = Connection::new(server, peer(), cfg);
    let result = conn.run().await;
    drop(conn);

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    (result, out)
}

#[tokio::test]
async fn test_session_serves_index() {
    let root = TempRoot::new();
    let page = b"<html><body>Welcome</body></html>";
    root.write("index.html", page);

    let (result, raw) = exchange(config(&root), b"GET / HTTP/1.0\r\n\r\n").await;
    assert!(result.is_ok());

    let (head, body) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.0 200 OK"));
    assert_eq!(header_value(&head, "Content-Length"), Some(page.len().to_string()));
    assert_eq!(header_value(&head, "Content-Type").as_deref(), Some("text/html"));
    assert_eq!(header_value(&head, "Connection").as_deref(), Some("close"));
    assert_eq!(body, page.to_vec());
}

#[tokio::test]
async fn test_session_missing_file() {
    let root = TempRoot::new();

    let (result, raw) = exchange(config(&root), b"GET /missing.txt HTTP/1.0\r\n\r\n").await;
    assert!(result.is_ok());

    let (head, body) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.0 404 Not Found"));
    assert_eq!(body, NOT_FOUND_BODY.as_bytes());
    assert_eq!(
        header_value(&head, "Content-Length"),
        Some(NOT_FOUND_BODY.len().to_string())
    );
}

#[tokio::test]
async fn test_session_malformed_escape() {
    let root = TempRoot::new();

    let (_, raw) = exchange(config(&root), b"GET /%2 HTTP/1.0\r\n\r\n").await;

    let (head, body) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.0 400 Bad Request"));
    assert_eq!(body, BAD_REQUEST_BODY.as_bytes());
}

#[tokio::test]
async fn test_session_rejects_post() {
    let root = TempRoot::new();
    root.write("index.html", b"home");

    let (_, raw) = exchange(
        config(&root),
        b"POST / HTTP/1.0\r\nContent-Length: 3\r\n\r\nabc",
    )
    .await;

    let (head, _) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.0 400 "));
}

#[tokio::test]
async fn test_session_rejects_traversal() {
    let root = TempRoot::new();

    let (_, raw) = exchange(config(&root), b"GET /../../etc/passwd HTTP/1.0\r\n\r\n").await;

    let (head, _) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.0 400 "));
}

#[tokio::test]
async fn test_session_missing_target_is_bad_request() {
    let root = TempRoot::new();

    let (_, raw) = exchange(config(&root), b"GET\r\n\r\n").await;

    let (head, _) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.0 400 "));
}

#[tokio::test]
async fn test_session_ignores_query_string() {
    let root = TempRoot::new();
    root.write("page.html", b"page");

    let (_, raw) = exchange(config(&root), b"GET /page.html?v=2 HTTP/1.1\r\n\r\n").await;

    let (head, body) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.0 200 OK"));
    assert_eq!(body, b"page".to_vec());
}

#[tokio::test]
async fn test_session_empty_connection_writes_nothing() {
    let root = TempRoot::new();
    let (mut client, server) = duplex(1024);
    client.shutdown().await.unwrap();

    let mut conn = Connection::new(server, peer(), config(&root));
    assert!(conn.run().await.is_ok());
    drop(conn);

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_session_serves_only_one_request() {
    let root = TempRoot::new();
    root.write("a.txt", b"A");
    root.write("b.txt", b"B");

    let (_, raw) = exchange(
        config(&root),
        b"GET /a.txt HTTP/1.0\r\n\r\nGET /b.txt HTTP/1.0\r\n\r\n",
    )
    .await;

    let text = String::from_utf8_lossy(&raw);
    assert_eq!(text.matches("HTTP/1.0 ").count(), 1);
    assert!(text.ends_with("\r\n\r\nA"));
}

#[tokio::test]
async fn test_session_request_longer_than_buffer() {
    let root = TempRoot::new();
    root.write("a.txt", b"A");

    // Only the first read is looked at; the padding past it is never read.
    let mut request = b"GET /a.txt HTTP/1.0\r\nX-Pad: ".to_vec();
    request.extend(vec![b'x'; MAX_REQUEST_BYTES * 4]);
    request.extend_from_slice(b"\r\n\r\n");

    let (result, raw) = exchange(config(&root), &request).await;
    assert!(result.is_ok());

    let (head, body) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.0 200 OK"), "{}", head);
    assert_eq!(body, b"A".to_vec());
}

#[tokio::test]
async fn test_session_read_timeout_closes_without_response() {
    let root = TempRoot::new();
    let mut cfg = ServerConfig::new(Ipv4Addr::LOCALHOST, 8080, root.path());
    cfg.read_timeout = Duration::from_millis(50);

    let (mut client, server) = duplex(1024);
    let mut conn = Connection::new(server, peer(), Arc::new(cfg));

    let result = conn.run().await;
    assert!(result.is_err());
    drop(conn);

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    assert!(out.is_empty());
}
