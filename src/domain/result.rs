use serde::{Deserialize, Serialize};

use super::{Challenge, ChallengeId, Location, Place};

/// Opaque result identifier, as issued by the result store
pub type ChallengeResultId = String;

/// A single submitted guess
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guess {
    /// Zero-based round this guess answers
    pub round: usize,
    pub location: Location,
}

/// One player's attempt at a challenge.
///
/// Guesses are appended by the guess submission flow; the play flow only
/// reads how many there are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeResult {
    pub id: ChallengeResultId,
    pub challenge_id: ChallengeId,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub guesses: Vec<Guess>,
}

impl ChallengeResult {
    pub fn new(id: impl Into<ChallengeResultId>, challenge_id: impl Into<ChallengeId>) -> Self {
        Self {
            id: id.into(),
            challenge_id: challenge_id.into(),
            nickname: String::new(),
            guesses: Vec::new(),
        }
    }

    /// Number of rounds already answered
    pub fn progress(&self) -> usize {
        self.guesses.len()
    }

    /// Whether every place of `challenge` has been guessed
    pub fn is_complete(&self, challenge: &Challenge) -> bool {
        self.progress() >= challenge.rounds()
    }

    /// The place to show next, or `None` once the challenge is complete.
    ///
    /// Every entry point that serves a place goes through here, so a
    /// finished result can never index past the last place.
    pub fn next_place<'a>(&self, challenge: &'a Challenge) -> Option<&'a Place> {
        if self.is_complete(challenge) {
            return None;
        }
        challenge.places.get(self.progress())
    }
}
