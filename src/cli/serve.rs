//! Serve command implementation

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use earthwalker::config::Config;
use earthwalker::server::{AppState, start_server};

/// Run the server until the process is killed
pub fn serve_command(mut config: Config, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    let state = Arc::new(AppState::from_config(config)?);
    let handle = start_server(state)?;
    info!("[earthwalker:serve] Ready on http://{}/play", handle.addr());

    handle.join();
    Ok(())
}
