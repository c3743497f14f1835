//! `EARTHWALKER_*` environment overrides

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use tracing::info;

use super::Config;

/// Apply overrides using `lookup` to read variables (injected for tests)
pub(super) fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(bind) = lookup("EARTHWALKER_BIND") {
        config.server.bind = bind;
    }
    if let Some(port) = parse_var(&lookup, "EARTHWALKER_PORT")? {
        config.server.port = port;
    }
    if let Some(path) = lookup("EARTHWALKER_STATIC_PATH") {
        config.storage.static_path = PathBuf::from(path);
    }
    if let Some(path) = lookup("EARTHWALKER_DATA_DIR") {
        config.storage.data_dir = PathBuf::from(path);
    }
    if let Some(url) = lookup("EARTHWALKER_TILESERVER") {
        config.tiles.tile_server_url = url;
    }
    if let Some(url) = lookup("EARTHWALKER_NOLABEL_TILESERVER") {
        config.tiles.no_label_tile_server_url = url;
    }
    Ok(())
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    info!("[earthwalker:config] {key} set from environment");
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e| anyhow!("Invalid {key} value '{raw}': {e}"))
}
