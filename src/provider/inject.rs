//! Local HTML fragment spliced into every served location page

use std::path::{Path, PathBuf};

/// Startup-class failure: without the fragment the service must not run
#[derive(Debug, thiserror::Error)]
#[error("Injection fragment {path} unavailable: {source}")]
pub struct InjectionError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(Debug, Clone)]
pub struct InjectionFragment {
    content: String,
}

impl InjectionFragment {
    /// Read the fragment once, at startup
    pub fn load(path: &Path) -> Result<Self, InjectionError> {
        let content = std::fs::read_to_string(path).map_err(|source| InjectionError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { content })
    }

    pub fn from_string(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Insert the fragment right after the first `<head>` tag
    pub fn apply(&self, html: &str) -> String {
        html.replacen("<head>", &format!("<head> {}", self.content), 1)
    }
}
