use std::sync::Arc;

use clap::Parser;
use warden::config::{Cli, Config};
use warden::{logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = Config::load(&cli)?;

    logging::init(&cfg.logging)?;

    let server_cfg = Arc::new(cfg.server_config()?);
    let root = server_cfg.root();
    if !root.is_dir() {
        tracing::warn!(root = %root.display(), "Served root is not a directory");
    }

    tokio::select! {
        res = server::run(server_cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
