//! Client settings: command-line flags over the optional TOML file over
//! built-in defaults.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context, Result};
use hub_sync::{RemoteConfig, assets::AssetConfig};
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Shape of the optional TOML config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
  #[serde(default)]
  pub api_url:        String,
  #[serde(default)]
  pub cache_path:     Option<PathBuf>,
  /// Seconds; absent means no timeout beyond the transport default.
  #[serde(default)]
  pub timeout_secs:   Option<u64>,
  #[serde(default)]
  pub asset_endpoint: String,
  #[serde(default)]
  pub upload_preset:  String,
}

impl ConfigFile {
  pub fn load(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")
  }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Default)]
pub struct Overrides {
  pub api_url:    Option<String>,
  pub cache_path: Option<PathBuf>,
}

/// Fully resolved client settings.
#[derive(Debug)]
pub struct Settings {
  pub remote:     RemoteConfig,
  pub cache_path: PathBuf,
  pub assets:     Option<AssetConfig>,
}

impl Settings {
  pub fn resolve(file: ConfigFile, overrides: Overrides) -> Self {
    let base_url = overrides
      .api_url
      .or_else(|| (!file.api_url.is_empty()).then(|| file.api_url.clone()))
      .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let cache_path = overrides
      .cache_path
      .or(file.cache_path)
      .unwrap_or_else(default_cache_path);

    let assets = (!file.asset_endpoint.is_empty()).then(|| AssetConfig {
      endpoint:      file.asset_endpoint,
      upload_preset: if file.upload_preset.is_empty() {
        "ml_default".to_string()
      } else {
        file.upload_preset
      },
    });

    Self {
      remote: RemoteConfig {
        base_url,
        timeout: file.timeout_secs.map(Duration::from_secs),
      },
      cache_path: expand_tilde(&cache_path),
      assets,
    }
  }
}

fn default_cache_path() -> PathBuf { PathBuf::from("~/.hub/cache.db") }

/// `~/x` → `$HOME/x`; anything else is returned unchanged.
fn expand_tilde(path: &Path) -> PathBuf {
  match (path.strip_prefix("~"), std::env::var_os("HOME")) {
    (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
    _ => path.to_path_buf(),
  }
}
