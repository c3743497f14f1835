use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::provider::{HttpUpstream, InjectionFragment, Provider};
use crate::store::{ChallengeResultStore, ChallengeStore, JsonDirStore};

/// Everything a request handler needs, shared read-only across workers
pub struct AppState {
    pub config: Config,
    pub challenges: Arc<dyn ChallengeStore>,
    pub results: Arc<dyn ChallengeResultStore>,
    pub provider: Provider,
}

impl AppState {
    pub fn new(
        config: Config,
        challenges: Arc<dyn ChallengeStore>,
        results: Arc<dyn ChallengeResultStore>,
        provider: Provider,
    ) -> Self {
        Self {
            config,
            challenges,
            results,
            provider,
        }
    }

    /// Wire up the production collaborators.
    ///
    /// Fails when the injection fragment is missing: serving unmodified
    /// provider pages is never an acceptable fallback.
    pub fn from_config(config: Config) -> Result<Self> {
        let injection_path = config.injection_path();
        let injection = InjectionFragment::load(&injection_path)
            .context("Refusing to start without the injection fragment")?;
        info!(
            "[earthwalker:state] Loaded injection fragment from {}",
            injection_path.display()
        );

        let store = Arc::new(JsonDirStore::open(&config.storage.data_dir).with_context(|| {
            format!(
                "Failed to open data directory: {}",
                config.storage.data_dir.display()
            )
        })?);
        info!(
            "[earthwalker:state] Using JSON store at {}",
            store.root().display()
        );

        let upstream = Arc::new(HttpUpstream::from_settings(&config.provider));
        let provider = Provider::new(config.provider.clone(), upstream, injection);

        Ok(Self::new(config, store.clone(), store, provider))
    }
}
