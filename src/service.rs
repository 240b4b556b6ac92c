//! Progress service - load, apply, persist
//!
//! Wraps a [`ProgressionEngine`] and a [`ProgressStore`]. Every mutating call
//! holds a per-user lock across load → apply → save, so concurrent events for
//! the same user are applied one after another while different users proceed
//! independently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};

use crate::progression::{
    AwardReport, EventSource, ProgressionEngine, StatsUpdate, UserProgress, UserStats,
};
use crate::store::ProgressStore;

pub struct ProgressService<S: ProgressStore> {
    engine: ProgressionEngine,
    store: S,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: ProgressStore> ProgressService<S> {
    pub fn new(engine: ProgressionEngine, store: S) -> Self {
        Self {
            engine,
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn engine(&self) -> &ProgressionEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(locks.entry(user_id.to_string()).or_default())
    }

    /// Drop the map entry once only the map and `lock` reference it.
    ///
    /// Handles are only cloned under the map mutex, so a count of two here
    /// means no other caller holds or waits on this user's lock.
    fn release_user_lock(&self, user_id: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        if Arc::strong_count(&lock) == 2 {
            locks.remove(user_id);
        }
    }

    /// Run `f` while holding the user's lock
    fn locked<T>(&self, user_id: &str, f: impl FnOnce() -> T) -> T {
        let lock = self.user_lock(user_id);
        let out = {
            let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
            f()
        };
        self.release_user_lock(user_id, lock);
        out
    }

    fn load_or_create(&self, user_id: &str) -> Result<UserProgress> {
        let stored = self
            .store
            .load(user_id)
            .with_context(|| format!("Failed to load progress for '{user_id}'"))?;
        Ok(stored.unwrap_or_else(|| {
            tracing::debug!("Creating progress record for '{}'", user_id);
            self.engine.new_progress(user_id)
        }))
    }

    /// Run `f` on the user's record under the user's lock, then persist it
    fn with_user<T>(
        &self,
        user_id: &str,
        f: impl FnOnce(&ProgressionEngine, &mut UserProgress) -> T,
    ) -> Result<T> {
        self.locked(user_id, || {
            let mut progress = self.load_or_create(user_id)?;
            let out = f(&self.engine, &mut progress);
            self.store
                .save(&progress)
                .with_context(|| format!("Failed to save progress for '{user_id}'"))?;
            Ok(out)
        })
    }

    pub fn award(&self, user_id: &str, amount: u64, source: &EventSource) -> Result<AwardReport> {
        self.with_user(user_id, |engine, progress| {
            engine.apply_award(progress, amount, source)
        })
    }

    pub fn add_daily_streak(&self, user_id: &str) -> Result<AwardReport> {
        self.with_user(user_id, |engine, progress| engine.add_daily_streak(progress))
    }

    pub fn reset_daily_streak(&self, user_id: &str) -> Result<()> {
        self.with_user(user_id, |engine, progress| engine.reset_daily_streak(progress))
    }

    /// Overwrite the given stats fields and return the resulting stats
    pub fn update_stats(&self, user_id: &str, update: &StatsUpdate) -> Result<UserStats> {
        self.with_user(user_id, |engine, progress| {
            engine.update_stats(progress, update);
            progress.stats().clone()
        })
    }

    /// Current record without modifying storage; fresh record if never stored
    pub fn snapshot(&self, user_id: &str) -> Result<UserProgress> {
        self.locked(user_id, || self.load_or_create(user_id))
    }

    #[cfg(test)]
    fn tracked_users(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service() -> ProgressService<MemoryStore> {
        ProgressService::new(ProgressionEngine::builtin(), MemoryStore::new())
    }

    #[test]
    fn test_award_persists_record() {
        let service = service();
        let report = service
            .award("u1", 120, &EventSource::ContentPlanCreated)
            .unwrap();
        assert!(report.leveled_up);

        let stored = service.store().load("u1").unwrap().unwrap();
        assert_eq!(stored.current_xp(), 120);
        assert_eq!(stored.current_level(), 2);
    }

    #[test]
    fn test_snapshot_does_not_create_record() {
        let service = service();
        let snapshot = service.snapshot("ghost").unwrap();
        assert_eq!(snapshot.current_level(), 1);
        assert!(service.store().is_empty());
    }

    #[test]
    fn test_streak_operations_round_trip_through_store() {
        let service = service();
        service.add_daily_streak("u1").unwrap();
        service.add_daily_streak("u1").unwrap();
        assert_eq!(service.snapshot("u1").unwrap().streaks().daily, 2);

        service.reset_daily_streak("u1").unwrap();
        let progress = service.snapshot("u1").unwrap();
        assert_eq!(progress.streaks().daily, 0);
        assert_eq!(progress.current_xp(), 15);
    }

    #[test]
    fn test_lock_entries_released_after_calls() {
        let service = service();
        for i in 0..100 {
            service.snapshot(&format!("visitor-{i}")).unwrap();
        }
        service.award("u1", 10, &EventSource::ViralPost).unwrap();
        service.add_daily_streak("u1").unwrap();
        assert_eq!(service.tracked_users(), 0);
        assert_eq!(service.store().len(), 1);
    }

    #[test]
    fn test_lock_entries_released_after_concurrent_awards() {
        let service = service();
        std::thread::scope(|scope| {
            for t in 0..8 {
                let service = &service;
                scope.spawn(move || {
                    for i in 0..25 {
                        let user = format!("user-{}", (t + i) % 3);
                        service.award(&user, 1, &EventSource::ContentPlanCreated).unwrap();
                    }
                });
            }
        });
        assert_eq!(service.tracked_users(), 0);
        let total: u64 = (0..3)
            .map(|u| service.snapshot(&format!("user-{u}")).unwrap().total_xp())
            .sum();
        assert_eq!(total, 200);
    }

    #[test]
    fn test_update_stats_returns_merged_stats() {
        let service = service();
        service.award("u1", 0, &EventSource::ViralPost).unwrap();
        let stats = service
            .update_stats(
                "u1",
                &StatsUpdate {
                    followers_gained: Some(50),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(stats.viral_posts, 1);
        assert_eq!(stats.followers_gained, 50);
    }
}
