//! Frontend files under `<static_path>/public`

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use super::super::reply::Reply;

/// Content type by file extension
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "html" => "text/html; charset=utf-8",
        "js" => "text/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "ico" => "image/x-icon",
        "tif" | "tiff" => "image/tiff",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}

/// Join `relative` under `root`, refusing anything that climbs out of it
fn confined(root: &Path, relative: &str) -> Option<PathBuf> {
    let relative = Path::new(relative);
    let plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    (plain && !relative.as_os_str().is_empty()).then(|| root.join(relative))
}

/// `GET /public/<relative>`
pub fn serve_public(public_dir: &Path, relative: &str) -> Reply {
    let Some(path) = confined(public_dir, relative) else {
        return Reply::not_found();
    };
    match std::fs::read(&path) {
        Ok(bytes) => Reply::new(200, bytes).with_header("Content-Type", content_type_for(&path)),
        Err(e) => {
            debug!("[earthwalker:assets] {}: {}", path.display(), e);
            Reply::not_found()
        }
    }
}

/// Frontend page routes all load the single-page app shell
pub fn serve_frontend(public_dir: &Path) -> Reply {
    serve_public(public_dir, "index.html")
}
