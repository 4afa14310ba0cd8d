//! Startup configuration.
//!
//! Settings come from three layers, highest priority first: command-line
//! flags (or their `WARDEN_*` environment variables), an optional YAML file,
//! and built-in defaults. The served root has no default.
//!
//! ```yaml
//! server:
//!   address: 127.0.0.1
//!   port: 8080
//!   root: /srv/www
//!   read_timeout_ms: 30000
//!   write_timeout_ms: 30000
//!   max_connections: 0
//! logging:
//!   file: /var/log/warden.log
//!   level: info
//! ```

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{ArgAction, Parser};
use serde::Deserialize;
use thiserror::Error;

use crate::static_files::{ServedRoot, StaticFiles};

pub const DEFAULT_ADDRESS: Ipv4Addr = Ipv4Addr::LOCALHOST;
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid bind address {0:?}: expected an IPv4 literal")]
    InvalidAddress(String),
    #[error("port must be between 1 and 65535")]
    InvalidPort,
    #[error("no served root directory given")]
    MissingRoot,
    #[error("{0} must be at least 1 ms")]
    InvalidTimeout(&'static str),
}

/// Command-line flags. `-h` is the host, so help is only `--help`.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "warden", version, about = "Minimal static file server")]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// IPv4 address to bind
    #[arg(short = 'h', long = "host", env = "WARDEN_HOST")]
    pub host: Option<String>,

    /// Port to bind
    #[arg(short, long, env = "WARDEN_PORT")]
    pub port: Option<u16>,

    /// Directory to serve files from
    #[arg(short = 'd', long = "directory", env = "WARDEN_ROOT")]
    pub directory: Option<PathBuf>,

    /// YAML config file
    #[arg(short, long, env = "WARDEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Append log lines to this file instead of stderr
    #[arg(long, env = "WARDEN_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Maximum concurrent connections (0 = unbounded)
    #[arg(long, env = "WARDEN_MAX_CONNECTIONS")]
    pub max_connections: Option<usize>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

/// The whole configuration as read from a YAML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerSection,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub address: String,
    pub port: u16,
    pub root: Option<PathBuf>,
    pub read_timeout_ms: u64,
    pub write_timeout_ms: u64,
    pub max_connections: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            root: None,
            read_timeout_ms: DEFAULT_TIMEOUT_MS,
            write_timeout_ms: DEFAULT_TIMEOUT_MS,
            max_connections: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append to this file; stderr when unset.
    pub file: Option<PathBuf>,
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

/// Validated settings the server runs with. Never changes after startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: Ipv4Addr,
    pub port: u16,
    pub static_files: StaticFiles,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    /// 0 means no limit.
    pub max_connections: usize,
}

impl ServerConfig {
    /// Settings with default timeouts and no connection limit.
    pub fn new(address: Ipv4Addr, port: u16, root: impl Into<PathBuf>) -> Self {
        Self {
            address,
            port,
            static_files: StaticFiles::new(ServedRoot::new(root)),
            read_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            write_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_connections: 0,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.address, self.port))
    }

    pub fn root(&self) -> &Path {
        self.static_files.root().as_path()
    }
}

impl Config {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Reads the file named by `--config`, if any, then applies the flags.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut cfg = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        cfg.apply_cli(cli);
        Ok(cfg)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.address = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(dir) = &cli.directory {
            self.server.root = Some(dir.clone());
        }
        if let Some(max) = cli.max_connections {
            self.server.max_connections = max;
        }
        if let Some(file) = &cli.log_file {
            self.logging.file = Some(file.clone());
        }
    }

    /// Checks the server section and builds the runtime settings.
    pub fn server_config(&self) -> Result<ServerConfig, ConfigError> {
        let s = &self.server;

        let address: Ipv4Addr = s
            .address
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(s.address.clone()))?;
        if s.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        let root = match &s.root {
            Some(root) if !root.as_os_str().is_empty() => root.clone(),
            _ => return Err(ConfigError::MissingRoot),
        };
        if s.read_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout("read_timeout_ms"));
        }
        if s.write_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout("write_timeout_ms"));
        }

        Ok(ServerConfig {
            address,
            port: s.port,
            static_files: StaticFiles::new(ServedRoot::new(root)),
            read_timeout: Duration::from_millis(s.read_timeout_ms),
            write_timeout: Duration::from_millis(s.write_timeout_ms),
            max_connections: s.max_connections,
        })
    }
}
