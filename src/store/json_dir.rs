//! File-backed store: one pretty-printed JSON document per record.
//!
//! ```text
//! <root>/challenges/<challenge id>.json
//! <root>/results/<result id>.json
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{ChallengeResultStore, ChallengeStore, StoreError};
use crate::domain::{Challenge, ChallengeResult};

const CHALLENGES_DIR: &str = "challenges";
const RESULTS_DIR: &str = "results";

#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    /// Open (and create if needed) a store rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(root.join(CHALLENGES_DIR))?;
        fs::create_dir_all(root.join(RESULTS_DIR))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// IDs come straight from cookies and query strings, so anything that
    /// could escape the store directory is treated as unknown.
    fn record_path(&self, dir: &str, id: &str) -> Option<PathBuf> {
        let safe = !id.is_empty()
            && !id.contains(&['/', '\\', '\0'][..])
            && id != "."
            && id != "..";
        safe.then(|| self.root.join(dir).join(format!("{id}.json")))
    }

    fn read<T: DeserializeOwned>(
        &self,
        dir: &str,
        kind: &'static str,
        id: &str,
    ) -> Result<T, StoreError> {
        let path = self
            .record_path(dir, id)
            .ok_or_else(|| StoreError::not_found(kind, id))?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::not_found(kind, id));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    fn write<T: Serialize>(
        &self,
        dir: &str,
        kind: &'static str,
        id: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let path = self
            .record_path(dir, id)
            .ok_or_else(|| StoreError::not_found(kind, id))?;
        let content = serde_json::to_string_pretty(value)?;
        // Write then rename so concurrent readers never see a partial record
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl ChallengeStore for JsonDirStore {
    fn get(&self, id: &str) -> Result<Challenge, StoreError> {
        self.read(CHALLENGES_DIR, "challenge", id)
    }

    fn insert(&self, challenge: &Challenge) -> Result<(), StoreError> {
        self.write(CHALLENGES_DIR, "challenge", &challenge.id, challenge)
    }
}

impl ChallengeResultStore for JsonDirStore {
    fn get(&self, id: &str) -> Result<ChallengeResult, StoreError> {
        self.read(RESULTS_DIR, "result", id)
    }

    fn insert(&self, result: &ChallengeResult) -> Result<(), StoreError> {
        self.write(RESULTS_DIR, "result", &result.id, result)
    }
}
