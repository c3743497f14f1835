//! Request -> challenge/result resolution
//!
//! Resolution runs as a short-circuiting chain: challenge ID (query, then
//! cookie) -> result ID (cookie) -> result (store) -> challenge (store) ->
//! next place. Each step either hands its value on or ends the chain with
//! the [`Resolution`] to act on.

use tracing::debug;

use super::cookies::{CHALLENGE_COOKIE, CookieJar, result_cookie_name};
use crate::domain::{Challenge, ChallengeId, ChallengeResult, Place};
use crate::error::PlayError;
use crate::store::{ChallengeResultStore, ChallengeStore};

/// An incomplete result and the place it should be shown next
#[derive(Debug, Clone)]
pub struct Progress {
    pub challenge: Challenge,
    pub result: ChallengeResult,
    pub place: Place,
}

/// What to do with a play request
#[derive(Debug)]
pub enum Resolution {
    Continue(Progress),
    /// A challenge is known but this client has no result for it yet
    RedirectToJoin(ChallengeId),
    /// The result has a guess for every place
    RedirectToSummary,
    Failure(PlayError),
}

/// First non-empty `id` query parameter
pub fn challenge_id_from_query(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

pub struct SessionResolver<'a> {
    challenges: &'a dyn ChallengeStore,
    results: &'a dyn ChallengeResultStore,
}

impl<'a> SessionResolver<'a> {
    pub fn new(challenges: &'a dyn ChallengeStore, results: &'a dyn ChallengeResultStore) -> Self {
        Self {
            challenges,
            results,
        }
    }

    /// Resolve a request from its query string and cookies
    pub fn resolve(&self, query: Option<&str>, cookies: &dyn CookieJar) -> Resolution {
        match self.progress(query, cookies) {
            Ok(progress) => Resolution::Continue(progress),
            Err(outcome) => outcome,
        }
    }

    fn progress(&self, query: Option<&str>, cookies: &dyn CookieJar) -> Result<Progress, Resolution> {
        let challenge_id = challenge_id_from_query(query)
            .or_else(|| non_empty(cookies.get(CHALLENGE_COOKIE)))
            .ok_or(Resolution::Failure(PlayError::MissingIdentifier))?;

        // The requested ID only picks which cookie to read; from here on
        // the stored result is authoritative.
        let result_id = non_empty(cookies.get(&result_cookie_name(&challenge_id))).ok_or_else(|| {
            debug!(
                "[earthwalker:session] No result cookie for challenge '{}'",
                challenge_id
            );
            Resolution::RedirectToJoin(challenge_id.clone())
        })?;

        let result = self.results.get(&result_id).map_err(|source| {
            Resolution::Failure(PlayError::ResultLookupFailed {
                result_id: result_id.clone(),
                source,
            })
        })?;

        let challenge = self.challenges.get(&result.challenge_id).map_err(|source| {
            Resolution::Failure(PlayError::ChallengeLookupFailed {
                challenge_id: result.challenge_id.clone(),
                source,
            })
        })?;

        let place = result
            .next_place(&challenge)
            .cloned()
            .ok_or(Resolution::RedirectToSummary)?;

        Ok(Progress {
            challenge,
            result,
            place,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Guess, Location};
    use crate::session::cookies::RequestCookies;
    use crate::store::{MemoryStore, StoreError};

    fn store_with(rounds: usize, guesses: usize) -> MemoryStore {
        let store = MemoryStore::new();
        let places = (0..rounds)
            .map(|i| Place::at(Location::new(i as f64, i as f64, format!("pano{i}"))))
            .collect();
        ChallengeStore::insert(&store, &Challenge::new("c1", places)).unwrap();

        let mut result = ChallengeResult::new("r1", "c1");
        result.guesses = (0..guesses)
            .map(|round| Guess {
                round,
                location: Location::new(0.0, 0.0, ""),
            })
            .collect();
        ChallengeResultStore::insert(&store, &result).unwrap();
        store
    }

    fn resolve(store: &MemoryStore, query: Option<&str>, cookies: &[&str]) -> Resolution {
        let jar = RequestCookies::parse(cookies.iter().copied());
        SessionResolver::new(store, store).resolve(query, &jar)
    }

    #[test]
    fn test_no_id_anywhere_is_missing_identifier() {
        let store = store_with(3, 0);
        let outcome = resolve(&store, None, &[]);
        assert!(matches!(
            outcome,
            Resolution::Failure(PlayError::MissingIdentifier)
        ));
    }

    #[test]
    fn test_empty_id_param_and_cookie_is_missing_identifier() {
        let store = store_with(3, 0);
        let outcome = resolve(&store, Some("id="), &["earthwalker_lastChallenge="]);
        assert!(matches!(
            outcome,
            Resolution::Failure(PlayError::MissingIdentifier)
        ));
    }

    #[test]
    fn test_no_result_cookie_redirects_to_join() {
        let store = store_with(3, 0);
        match resolve(&store, Some("id=c1"), &[]) {
            Resolution::RedirectToJoin(id) => assert_eq!(id, "c1"),
            other => panic!("expected join redirect, got {other:?}"),
        }
    }

    #[test]
    fn test_challenge_cookie_used_without_query() {
        let store = store_with(3, 1);
        let outcome = resolve(
            &store,
            None,
            &["earthwalker_lastChallenge=c1; earthwalker_lastResult_c1=r1"],
        );
        match outcome {
            Resolution::Continue(progress) => assert_eq!(progress.place.location.pano_id, "pano1"),
            other => panic!("expected continue, got {other:?}"),
        }
    }

    #[test]
    fn test_query_param_beats_cookie() {
        let store = store_with(3, 0);
        // Cookie names challenge c2, but the query asks for c1
        match resolve(&store, Some("id=c1"), &["earthwalker_lastChallenge=c2"]) {
            Resolution::RedirectToJoin(id) => assert_eq!(id, "c1"),
            other => panic!("expected join redirect, got {other:?}"),
        }
    }

    #[test]
    fn test_two_of_three_guessed_continues_with_last_place() {
        let store = store_with(3, 2);
        match resolve(&store, Some("id=c1"), &["earthwalker_lastResult_c1=r1"]) {
            Resolution::Continue(progress) => {
                assert_eq!(progress.place.location.pano_id, "pano2");
                assert_eq!(progress.result.id, "r1");
                assert_eq!(progress.challenge.id, "c1");
            }
            other => panic!("expected continue, got {other:?}"),
        }
    }

    #[test]
    fn test_all_guessed_redirects_to_summary() {
        let store = store_with(3, 3);
        let outcome = resolve(&store, Some("id=c1"), &["earthwalker_lastResult_c1=r1"]);
        assert!(matches!(outcome, Resolution::RedirectToSummary));
    }

    #[test]
    fn test_unknown_result_is_lookup_failure() {
        let store = store_with(3, 0);
        let outcome = resolve(&store, Some("id=c1"), &["earthwalker_lastResult_c1=ghost"]);
        match outcome {
            Resolution::Failure(PlayError::ResultLookupFailed { result_id, source }) => {
                assert_eq!(result_id, "ghost");
                assert!(matches!(source, StoreError::NotFound { .. }));
            }
            other => panic!("expected result lookup failure, got {other:?}"),
        }
    }

    #[test]
    fn test_result_decides_which_challenge_is_loaded() {
        let store = store_with(2, 0);
        // Result r2 belongs to a challenge that was never stored
        ChallengeResultStore::insert(&store, &ChallengeResult::new("r2", "gone")).unwrap();

        let outcome = resolve(&store, Some("id=c1"), &["earthwalker_lastResult_c1=r2"]);
        match outcome {
            Resolution::Failure(PlayError::ChallengeLookupFailed { challenge_id, .. }) => {
                assert_eq!(challenge_id, "gone");
            }
            other => panic!("expected challenge lookup failure, got {other:?}"),
        }
    }

    #[test]
    fn test_query_id_is_percent_decoded() {
        assert_eq!(
            challenge_id_from_query(Some("x=1&id=a%20b&id=second")),
            Some("a b".to_string())
        );
        assert_eq!(challenge_id_from_query(Some("id=")), None);
        assert_eq!(challenge_id_from_query(None), None);
    }
}
