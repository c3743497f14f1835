//! Player session tracking
//!
//! There is no server-side session table. A player's place in a challenge
//! is rebuilt on every request from two cookies plus the stores:
//! - `earthwalker_lastChallenge` holds the challenge being played
//! - `earthwalker_lastResult_<challenge id>` holds that player's result
//!
//! Keying the result cookie by challenge ID means a client holds at most
//! one in-flight result per challenge.

mod cookies;
mod resolver;

pub use cookies::{
    CHALLENGE_COOKIE, COOKIE_MAX_AGE_SECS, Cookie, CookieJar, RESULT_COOKIE_PREFIX,
    RequestCookies, result_cookie_name,
};
pub use resolver::{Progress, Resolution, SessionResolver, challenge_id_from_query};
