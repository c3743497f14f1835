//! Core domain types for Earthwalker

mod challenge;
mod result;

pub use challenge::{Challenge, ChallengeId, Location, Place};
pub use result::{ChallengeResult, ChallengeResultId, Guess};
