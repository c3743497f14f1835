//! Challenge and result storage
//!
//! The play flow only ever looks records up by ID. Writes happen through
//! `insert`, used by the join/guess flows and by test fixtures.

mod json_dir;
mod memory;

pub use json_dir::JsonDirStore;
pub use memory::MemoryStore;

use crate::domain::{Challenge, ChallengeResult};

/// Error type for store lookups
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("No {kind} with ID '{id}'")]
    NotFound { kind: &'static str, id: String },

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt record: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: &str) -> Self {
        StoreError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Key lookup for challenges
pub trait ChallengeStore: Send + Sync {
    fn get(&self, id: &str) -> Result<Challenge, StoreError>;
    fn insert(&self, challenge: &Challenge) -> Result<(), StoreError>;
}

/// Key lookup for challenge results
pub trait ChallengeResultStore: Send + Sync {
    fn get(&self, id: &str) -> Result<ChallengeResult, StoreError>;
    fn insert(&self, result: &ChallengeResult) -> Result<(), StoreError>;
}
