//! Street-level imagery provider: URL building, fetching and rewriting
//!
//! Two kinds of traffic go through here:
//! - the viewer page for a location, which gets the injection fragment and
//!   has provider links pointed back at us
//! - same-origin sub-resources the injected frontend requests through us,
//!   forwarded to the provider and filtered by payload type

mod fetch;
mod filter;
mod inject;
mod location_url;

pub use fetch::{FetchError, HttpUpstream, Upstream, UpstreamResponse};
pub use filter::{Pipeline, filter_photometa, filter_urls, filter_urls_bytes, pipeline_for};
pub use inject::{InjectionError, InjectionFragment};
pub use location_url::build_location_url;

use std::borrow::Cow;
use std::sync::Arc;

use tracing::debug;

use crate::config::ProviderSettings;
use crate::domain::Location;
use crate::error::PlayError;

/// Request headers forwarded on passthrough requests
pub const FORWARDED_HEADERS: [&str; 2] = ["User-Agent", "Accept"];

pub struct Provider {
    settings: ProviderSettings,
    upstream: Arc<dyn Upstream>,
    injection: InjectionFragment,
}

impl Provider {
    pub fn new(
        settings: ProviderSettings,
        upstream: Arc<dyn Upstream>,
        injection: InjectionFragment,
    ) -> Self {
        Self {
            settings,
            upstream,
            injection,
        }
    }

    /// Viewer URL for `location`
    pub fn location_url(&self, location: &Location) -> String {
        build_location_url(&self.settings.viewer_url_template, location)
    }

    /// Fetch the viewer page for `location` and return it rewritten.
    ///
    /// No request headers are forwarded here; the page is the same for
    /// every player.
    pub fn serve_location(&self, location: &Location) -> Result<String, PlayError> {
        let target = self.location_url(location);
        debug!("[earthwalker:provider] Serving location page {}", target);

        let response = self.upstream.get(&target, &[])?;
        let html = String::from_utf8(response.body).map_err(|e| {
            PlayError::UpstreamReadFailed(FetchError::Read {
                url: target.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            })
        })?;

        Ok(filter_urls(&self.injection.apply(&html)))
    }

    /// Map a local path and query onto the provider origin
    pub fn passthrough_url(&self, path_and_query: &str) -> String {
        let origin = self.settings.proxy_origin.trim_end_matches('/');
        if path_and_query.starts_with('/') {
            format!("{origin}{path_and_query}")
        } else {
            format!("{origin}/{path_and_query}")
        }
    }

    /// Forward a sub-resource request and filter the answer.
    ///
    /// `headers` are the caller's request headers; only [`FORWARDED_HEADERS`]
    /// are passed on.
    pub fn passthrough(
        &self,
        path_and_query: &str,
        headers: &[(&str, &str)],
    ) -> Result<UpstreamResponse, FetchError> {
        let target = self.passthrough_url(path_and_query);
        let forwarded: Vec<(&str, &str)> = FORWARDED_HEADERS
            .iter()
            .filter_map(|wanted| {
                headers
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
                    .map(|(_, value)| (*wanted, *value))
            })
            .collect();

        let mut response = self.upstream.get(&target, &forwarded)?;
        let pipeline = pipeline_for(&target);
        debug!(
            "[earthwalker:provider] Passthrough {} -> {} ({} filter)",
            path_and_query,
            response.status,
            pipeline.name()
        );
        let filtered = match pipeline.apply(&response.body) {
            Cow::Owned(bytes) => Some(bytes),
            Cow::Borrowed(_) => None,
        };
        if let Some(bytes) = filtered {
            response.body = bytes;
        }
        Ok(response)
    }
}
