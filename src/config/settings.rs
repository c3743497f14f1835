//! Configuration sections

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of threads pulling requests off the listener
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Street-level imagery provider endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Viewer page URL with `{lat}`, `{lng}` and `{pano}` placeholders
    #[serde(default = "default_viewer_url_template")]
    pub viewer_url_template: String,

    /// Scheme and host that passthrough requests are forwarded to
    #[serde(default = "default_proxy_origin")]
    pub proxy_origin: String,

    /// Upper bound on a single upstream request, connect to last byte
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts after a transport failure
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// On-disk locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Root holding `public/` (frontend assets and the injection fragment)
    #[serde(default = "default_static_path")]
    pub static_path: PathBuf,

    /// Root of the JSON challenge/result store
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// Map tile servers handed to the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileSettings {
    #[serde(default = "default_tile_server_url")]
    pub tile_server_url: String,

    #[serde(default = "default_no_label_tile_server_url")]
    pub no_label_tile_server_url: String,
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    8
}

fn default_viewer_url_template() -> String {
    "https://www.google.com/maps/@{lat},{lng},3a,90y,0h,90t/data=!3m7!1e1!3m5!1s{pano}!2e0!3e11!7i3512!8i894?hl=en"
        .to_string()
}

fn default_proxy_origin() -> String {
    "https://www.google.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_retries() -> u32 {
    1
}

fn default_static_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_tile_server_url() -> String {
    "https://mt.google.com/vt/lyrs=m&hl=en&x={x}&y={y}&z={z}".to_string()
}

fn default_no_label_tile_server_url() -> String {
    "https://mt.google.com/vt/lyrs=s&hl=en&x={x}&y={y}&z={z}".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            viewer_url_template: default_viewer_url_template(),
            proxy_origin: default_proxy_origin(),
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            static_path: default_static_path(),
            data_dir: default_data_dir(),
        }
    }
}

impl Default for TileSettings {
    fn default() -> Self {
        Self {
            tile_server_url: default_tile_server_url(),
            no_label_tile_server_url: default_no_label_tile_server_url(),
        }
    }
}
