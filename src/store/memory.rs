use std::collections::HashMap;
use std::sync::RwLock;

use super::{ChallengeResultStore, ChallengeStore, StoreError};
use crate::domain::{Challenge, ChallengeId, ChallengeResult, ChallengeResultId};

/// In-process store holding both challenges and results
#[derive(Debug, Default)]
pub struct MemoryStore {
    challenges: RwLock<HashMap<ChallengeId, Challenge>>,
    results: RwLock<HashMap<ChallengeResultId, ChallengeResult>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChallengeStore for MemoryStore {
    fn get(&self, id: &str) -> Result<Challenge, StoreError> {
        let guard = self.challenges.read().map_err(|_| StoreError::Poisoned)?;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("challenge", id))
    }

    fn insert(&self, challenge: &Challenge) -> Result<(), StoreError> {
        let mut guard = self.challenges.write().map_err(|_| StoreError::Poisoned)?;
        guard.insert(challenge.id.clone(), challenge.clone());
        Ok(())
    }
}

impl ChallengeResultStore for MemoryStore {
    fn get(&self, id: &str) -> Result<ChallengeResult, StoreError> {
        let guard = self.results.read().map_err(|_| StoreError::Poisoned)?;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("result", id))
    }

    fn insert(&self, result: &ChallengeResult) -> Result<(), StoreError> {
        let mut guard = self.results.write().map_err(|_| StoreError::Poisoned)?;
        guard.insert(result.id.clone(), result.clone());
        Ok(())
    }
}
