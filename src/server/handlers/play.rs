//! `GET /play`: resolve the player's session and serve their next place

use tracing::{debug, error, warn};

use super::super::reply::Reply;
use super::super::state::AppState;
use crate::error::PlayError;
use crate::session::{
    CHALLENGE_COOKIE, Cookie, CookieJar, Resolution, SessionResolver, result_cookie_name,
};

/// Where players without a result for `challenge_id` are sent
pub fn join_location(challenge_id: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(challenge_id.as_bytes()).collect();
    format!("/join?id={encoded}")
}

pub fn handle_play(state: &AppState, query: Option<&str>, cookies: &mut dyn CookieJar) -> Reply {
    let resolver = SessionResolver::new(state.challenges.as_ref(), state.results.as_ref());

    let progress = match resolver.resolve(query, &*cookies) {
        Resolution::Continue(progress) => progress,
        Resolution::RedirectToJoin(challenge_id) => {
            debug!(
                "[earthwalker:play] Challenge '{}' has no result yet, sending to join",
                challenge_id
            );
            return Reply::redirect(&join_location(&challenge_id));
        }
        Resolution::RedirectToSummary => {
            debug!("[earthwalker:play] Result complete, sending to summary");
            return Reply::redirect("/summary");
        }
        Resolution::Failure(err) => return failure_reply(&err),
    };

    let challenge_id = &progress.result.challenge_id;
    cookies.set(Cookie::tracking(CHALLENGE_COOKIE, challenge_id));
    cookies.set(Cookie::tracking(
        result_cookie_name(challenge_id),
        &progress.result.id,
    ));

    debug!(
        "[earthwalker:play] Result '{}' round {}/{} at {:?}",
        progress.result.id,
        progress.result.progress() + 1,
        progress.challenge.rounds(),
        progress.place.location
    );

    match state.provider.serve_location(&progress.place.location) {
        Ok(html) => Reply::html(html),
        Err(err) => failure_reply(&err),
    }
}

/// Log the full error, answer with the generic message only
fn failure_reply(err: &PlayError) -> Reply {
    if err.status() >= 500 {
        error!("[earthwalker:play] {}", err);
    } else {
        warn!("[earthwalker:play] {}", err);
    }
    Reply::text(err.status(), err.public_message())
}
