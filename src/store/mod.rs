//! Progress record storage
//!
//! The engine never touches storage. Callers load a record, apply events, and
//! save it back through a [`ProgressStore`].
//!
//! ```text
//!   ProgressService ──load──▶ ProgressStore ◀──save── ProgressService
//!                                 │
//!          ┌──────────────────────┼──────────────────────┐
//!          ▼                      ▼                      ▼
//!     MemoryStore           JsonFileStore           SqliteStore
//!                      <data_dir>/<user>.json   <data_dir>/progress.db
//! ```

mod db;
mod json;

pub use db::SqliteStore;
pub use json::JsonFileStore;

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;

use crate::progression::UserProgress;

/// Load/save access to user progress records
pub trait ProgressStore: Send + Sync {
    /// Load a user's record, `None` if the user has never been stored
    fn load(&self, user_id: &str) -> Result<Option<UserProgress>>;

    /// Store the full record, replacing any previous version
    fn save(&self, progress: &UserProgress) -> Result<()>;
}

impl<T: ProgressStore + ?Sized> ProgressStore for Box<T> {
    fn load(&self, user_id: &str) -> Result<Option<UserProgress>> {
        (**self).load(user_id)
    }

    fn save(&self, progress: &UserProgress) -> Result<()> {
        (**self).save(progress)
    }
}

/// Process-local store, lost on exit
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, UserProgress>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self, user_id: &str) -> Result<Option<UserProgress>> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(records.get(user_id).cloned())
    }

    fn save(&self, progress: &UserProgress) -> Result<()> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.insert(progress.user_id().to_string(), progress.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.load("a").unwrap().is_none());

        let progress = UserProgress::new("a");
        store.save(&progress).unwrap();
        assert_eq!(store.load("a").unwrap(), Some(progress));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let store: Box<dyn ProgressStore> = Box::new(MemoryStore::new());
        store.save(&UserProgress::new("boxed")).unwrap();
        assert!(store.load("boxed").unwrap().is_some());
    }
}
