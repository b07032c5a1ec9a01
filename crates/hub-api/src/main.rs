//! hub-server binary.
//!
//! Serves the document service under `/api`. Settings come from a TOML file
//! (`--config`, default `config.toml`, optional) and `HUB_*` environment
//! variables, e.g. `HUB_PORT=8080 hub-server`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use hub_api::ServerConfig;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Source code hub document service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

  let store_path = home_relative(&cfg.store_path);
  let store = hub_api::open_store(&store_path)
    .await
    .with_context(|| format!("opening document store {}", store_path.display()))?;

  let address = cfg.bind_address();
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("binding {address}"))?;
  tracing::info!(%address, store = %store_path.display(), "document service listening");

  axum::serve(listener, hub_api::app(Arc::new(store)))
    .await
    .context("server error")
}

/// `~/x` → `$HOME/x`; anything else is returned unchanged.
fn home_relative(path: &Path) -> PathBuf {
  match (path.strip_prefix("~"), std::env::var_os("HOME")) {
    (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
    _ => path.to_path_buf(),
  }
}
