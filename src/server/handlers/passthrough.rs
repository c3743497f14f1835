//! Catch-all proxy for provider sub-resources

use tracing::warn;

use super::super::reply::Reply;
use super::super::request::Inbound;
use super::super::state::AppState;

/// Forward the request path and query to the provider and relay the
/// filtered answer with the provider's status and headers.
///
/// Failures come back as 403 with the error text: these are same-origin
/// XHRs whose error handling lives in the injected frontend.
pub fn handle_passthrough(state: &AppState, request: &Inbound) -> Reply {
    match state.provider.passthrough(&request.url, &request.header_pairs()) {
        Ok(upstream) => {
            let headers = upstream.forwardable_headers().cloned().collect();
            Reply {
                status: upstream.status,
                headers,
                body: upstream.body,
            }
        }
        Err(err) => {
            warn!("[earthwalker:proxy] {}", err);
            Reply::text(403, &err.to_string())
        }
    }
}
