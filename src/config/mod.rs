//! Configuration loading and management

mod env;
mod settings;

pub use settings::{ProviderSettings, ServerSettings, StorageSettings, TileSettings};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "earthwalker.toml";

/// Injection fragment location, relative to `storage.static_path`
const INJECTION_FRAGMENT: &str = "public/modify_frontend/modify.html";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub provider: ProviderSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub tiles: TileSettings,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from an explicit path, or from `earthwalker.toml` if it exists,
    /// or fall back to defaults. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    tracing::info!("[earthwalker:config] No {DEFAULT_CONFIG_FILE}, using defaults");
                    Self::default()
                }
            }
        };
        env::apply_overrides(&mut config, |key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Path of the HTML fragment injected into every served location page
    pub fn injection_path(&self) -> PathBuf {
        self.storage.static_path.join(INJECTION_FRAGMENT)
    }

    /// Directory served under `/public/`
    pub fn public_dir(&self) -> PathBuf {
        self.storage.static_path.join("public")
    }
}
