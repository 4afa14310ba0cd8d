//! Warden - minimal static file server
//!
//! Core library: connection handling, request parsing, path resolution and
//! response framing.

pub mod config;
pub mod http;
pub mod logging;
pub mod server;
pub mod static_files;
