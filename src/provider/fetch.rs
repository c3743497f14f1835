//! Outbound requests to the imagery provider

use std::io::Read;
use std::time::Duration;

use tracing::warn;

use crate::config::ProviderSettings;

/// Largest upstream body we are willing to buffer for rewriting
const MAX_UPSTREAM_BYTES: u64 = 32 * 1024 * 1024; // 32 MiB

/// Headers that describe the upstream framing rather than the content.
/// The body is decoded and rewritten, so these would lie to the client.
const FRAMING_HEADERS: [&str; 4] = [
    "content-length",
    "transfer-encoding",
    "content-encoding",
    "connection",
];

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("GET {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Reading body of {url} failed: {source}")]
    Read {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// A fully buffered upstream response
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    /// Headers safe to copy onto a response carrying a rewritten body
    pub fn forwardable_headers(&self) -> impl Iterator<Item = &(String, String)> {
        self.headers
            .iter()
            .filter(|(name, _)| !FRAMING_HEADERS.contains(&name.to_ascii_lowercase().as_str()))
    }
}

/// Something that can GET a provider URL
pub trait Upstream: Send + Sync {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<UpstreamResponse, FetchError>;
}

/// [`Upstream`] over a shared `ureq` agent with a bounded timeout and retry
pub struct HttpUpstream {
    agent: ureq::Agent,
    retries: u32,
}

impl HttpUpstream {
    pub fn new(timeout: Duration, retries: u32) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent, retries }
    }

    pub fn from_settings(settings: &ProviderSettings) -> Self {
        Self::new(settings.timeout(), settings.retries)
    }
}

impl Upstream for HttpUpstream {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<UpstreamResponse, FetchError> {
        let attempts = self.retries.saturating_add(1);

        for attempt in 1..=attempts {
            let mut request = self.agent.get(url);
            for (name, value) in headers {
                if !value.is_empty() {
                    request = request.set(name, value);
                }
            }

            match request.call() {
                Ok(response) => return read_response(url, response),
                // Error statuses are still provider answers, forward them as-is
                Err(ureq::Error::Status(_, response)) => return read_response(url, response),
                Err(ureq::Error::Transport(transport)) => {
                    warn!(
                        "[earthwalker:upstream] GET {} attempt {}/{} failed: {}",
                        url, attempt, attempts, transport
                    );
                    if attempt == attempts {
                        return Err(FetchError::Transport {
                            url: url.to_string(),
                            message: transport.to_string(),
                        });
                    }
                }
            }
        }

        Err(FetchError::Transport {
            url: url.to_string(),
            message: "no attempts made".to_string(),
        })
    }
}

fn read_response(url: &str, response: ureq::Response) -> Result<UpstreamResponse, FetchError> {
    let status = response.status();
    let headers = response
        .headers_names()
        .into_iter()
        .filter_map(|name| {
            let value = response.header(&name)?.to_string();
            Some((name, value))
        })
        .collect();

    let mut body = Vec::new();
    response
        .into_reader()
        .take(MAX_UPSTREAM_BYTES + 1)
        .read_to_end(&mut body)
        .map_err(|source| FetchError::Read {
            url: url.to_string(),
            source,
        })?;

    if body.len() as u64 > MAX_UPSTREAM_BYTES {
        return Err(FetchError::Read {
            url: url.to_string(),
            source: std::io::Error::other("upstream body too large"),
        });
    }

    Ok(UpstreamResponse {
        status,
        headers,
        body,
    })
}
