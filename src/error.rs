//! Error taxonomy for the play and proxy flows

use crate::provider::FetchError;
use crate::store::StoreError;

/// Everything that can stop a location from being served.
///
/// The `Display` text carries full detail for operator logs; clients only
/// ever see [`PlayError::public_message`].
#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error("No challenge ID in request URL or cookies")]
    MissingIdentifier,

    #[error("Failed to retrieve result '{result_id}' from store: {source}")]
    ResultLookupFailed {
        result_id: String,
        #[source]
        source: StoreError,
    },

    #[error("Failed to retrieve challenge '{challenge_id}' from store: {source}")]
    ChallengeLookupFailed {
        challenge_id: String,
        #[source]
        source: StoreError,
    },

    #[error("Upstream request failed: {0}")]
    UpstreamFetchFailed(#[source] FetchError),

    #[error("Upstream response unreadable: {0}")]
    UpstreamReadFailed(#[source] FetchError),
}

impl PlayError {
    /// HTTP status sent to the client
    pub fn status(&self) -> u16 {
        match self {
            PlayError::MissingIdentifier => 400,
            PlayError::ResultLookupFailed { .. } | PlayError::ChallengeLookupFailed { .. } => 500,
            PlayError::UpstreamFetchFailed(_) | PlayError::UpstreamReadFailed(_) => 403,
        }
    }

    /// Generic message sent to the client, free of IDs and internals
    pub fn public_message(&self) -> &'static str {
        match self {
            PlayError::MissingIdentifier => "no challenge ID in request URL or cookies",
            PlayError::ResultLookupFailed { .. } => "failed to retrieve result",
            PlayError::ChallengeLookupFailed { .. } => "failed to retrieve challenge",
            PlayError::UpstreamFetchFailed(_) | PlayError::UpstreamReadFailed(_) => {
                "failed to load location"
            }
        }
    }
}

impl From<FetchError> for PlayError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Read { .. } => PlayError::UpstreamReadFailed(err),
            FetchError::Transport { .. } => PlayError::UpstreamFetchFailed(err),
        }
    }
}
