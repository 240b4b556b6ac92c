//! SQLite progress store
//!
//! One row per user with a column per counter. Achievements are kept as a
//! JSON array of ids and rehydrated from the catalog on load.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use super::ProgressStore;
use crate::progression::{Catalog, Streaks, UserProgress, UserStats};

/// Database-backed store
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    catalog: Arc<Catalog>,
}

impl SqliteStore {
    /// Open or create the database at `path`
    pub fn open(path: &Path, catalog: Arc<Catalog>) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open progress db: {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::with_connection(conn, catalog)
    }

    /// In-memory database, mainly for tests
    pub fn open_in_memory(catalog: Arc<Catalog>) -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory db")?;
        Self::with_connection(conn, catalog)
    }

    fn with_connection(conn: Connection, catalog: Arc<Catalog>) -> Result<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            catalog,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;

        let version: i32 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
            .unwrap_or(0);

        if version < 1 {
            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (1)", [])?;
        }

        Ok(())
    }

    /// Number of stored users
    pub fn count(&self) -> Result<usize> {
        let conn = self.conn();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM user_progress", [], |r| r.get(0))?;
        Ok(count as usize)
    }
}

struct StoredRow {
    current_level: u32,
    current_xp: u64,
    total_xp: u64,
    achievements: String,
    streaks: Streaks,
    stats: UserStats,
}

impl ProgressStore for SqliteStore {
    fn load(&self, user_id: &str) -> Result<Option<UserProgress>> {
        let conn = self.conn();
        let row = conn
            .query_row(
                r#"SELECT current_level, current_xp, total_xp, achievements,
                          streak_daily, streak_weekly, streak_monthly,
                          content_plans_created, posts_generated, viral_posts,
                          engagement_rate, followers_gained
                   FROM user_progress WHERE user_id = ?1"#,
                [user_id],
                |r| {
                    Ok(StoredRow {
                        current_level: r.get(0)?,
                        current_xp: r.get(1)?,
                        total_xp: r.get(2)?,
                        achievements: r.get(3)?,
                        streaks: Streaks {
                            daily: r.get(4)?,
                            weekly: r.get(5)?,
                            monthly: r.get(6)?,
                        },
                        stats: UserStats {
                            content_plans_created: r.get(7)?,
                            posts_generated: r.get(8)?,
                            viral_posts: r.get(9)?,
                            engagement_rate: r.get(10)?,
                            followers_gained: r.get(11)?,
                        },
                    })
                },
            )
            .optional()
            .with_context(|| format!("Failed to load progress for '{user_id}'"))?;
        drop(conn);

        let Some(row) = row else {
            return Ok(None);
        };

        let ids: Vec<String> = serde_json::from_str(&row.achievements)
            .with_context(|| format!("Malformed achievements column for '{user_id}'"))?;
        let mut achievements = Vec::with_capacity(ids.len());
        for id in ids {
            match self.catalog.achievements().get(&id) {
                Some(a) => achievements.push(a.clone()),
                None => tracing::warn!("Dropping unknown achievement '{}' for '{}'", id, user_id),
            }
        }

        Ok(Some(UserProgress {
            user_id: user_id.to_string(),
            current_level: row.current_level,
            current_xp: row.current_xp,
            total_xp: row.total_xp,
            achievements,
            streaks: row.streaks,
            stats: row.stats,
        }))
    }

    fn save(&self, progress: &UserProgress) -> Result<()> {
        let ids: Vec<&str> = progress.achievements.iter().map(|a| a.id.as_str()).collect();
        let achievements = serde_json::to_string(&ids)?;
        let now = Utc::now().timestamp_millis();

        let conn = self.conn();
        conn.execute(
            r#"INSERT OR REPLACE INTO user_progress
               (user_id, current_level, current_xp, total_xp, achievements,
                streak_daily, streak_weekly, streak_monthly,
                content_plans_created, posts_generated, viral_posts,
                engagement_rate, followers_gained, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"#,
            rusqlite::params![
                progress.user_id, progress.current_level, progress.current_xp,
                progress.total_xp, achievements, progress.streaks.daily,
                progress.streaks.weekly, progress.streaks.monthly,
                progress.stats.content_plans_created, progress.stats.posts_generated,
                progress.stats.viral_posts, progress.stats.engagement_rate,
                progress.stats.followers_gained, now,
            ],
        )
        .with_context(|| format!("Failed to save progress for '{}'", progress.user_id))?;
        Ok(())
    }
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- One row per user
CREATE TABLE IF NOT EXISTS user_progress (
    user_id TEXT PRIMARY KEY,
    current_level INTEGER NOT NULL DEFAULT 1,
    current_xp INTEGER NOT NULL DEFAULT 0,
    total_xp INTEGER NOT NULL DEFAULT 0,
    achievements TEXT NOT NULL DEFAULT '[]',  -- JSON array of achievement ids
    streak_daily INTEGER NOT NULL DEFAULT 0,
    streak_weekly INTEGER NOT NULL DEFAULT 0,
    streak_monthly INTEGER NOT NULL DEFAULT 0,
    content_plans_created INTEGER NOT NULL DEFAULT 0,
    posts_generated INTEGER NOT NULL DEFAULT 0,
    viral_posts INTEGER NOT NULL DEFAULT 0,
    engagement_rate REAL NOT NULL DEFAULT 0.0,
    followers_gained INTEGER NOT NULL DEFAULT 0,
    updated_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_progress_level ON user_progress(current_level);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::{EventSource, ProgressionEngine, StatsUpdate};
    use tempfile::tempdir;

    #[test]
    fn test_sqlite_store_roundtrip() {
        let engine = ProgressionEngine::builtin();
        let store = SqliteStore::open_in_memory(Catalog::builtin()).unwrap();

        let mut progress = engine.new_progress("creator");
        engine.apply_award(&mut progress, 120, &EventSource::ContentPlanCreated);
        engine.apply_award(&mut progress, 30, &EventSource::ViralPost);
        engine.add_daily_streak(&mut progress);
        engine.update_stats(
            &mut progress,
            &StatsUpdate {
                engagement_rate: Some(4.5),
                followers_gained: Some(300),
                ..Default::default()
            },
        );
        store.save(&progress).unwrap();

        let loaded = store.load("creator").unwrap().unwrap();
        assert_eq!(loaded, progress);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_save_replaces_existing_row() {
        let engine = ProgressionEngine::builtin();
        let store = SqliteStore::open_in_memory(Catalog::builtin()).unwrap();
        let mut progress = engine.new_progress("creator");
        store.save(&progress).unwrap();
        engine.apply_award(&mut progress, 10, &EventSource::ViralPost);
        store.save(&progress).unwrap();

        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.load("creator").unwrap().unwrap().current_xp(), 10);
    }

    #[test]
    fn test_unknown_achievement_ids_are_dropped() {
        let store = SqliteStore::open_in_memory(Catalog::builtin()).unwrap();
        store.save(&UserProgress::new("old")).unwrap();
        store
            .conn()
            .execute(
                "UPDATE user_progress SET achievements = ?1 WHERE user_id = 'old'",
                [r#"["first_plan","retired"]"#],
            )
            .unwrap();

        let loaded = store.load("old").unwrap().unwrap();
        let ids: Vec<_> = loaded.achievements().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["first_plan"]);
    }

    #[test]
    fn test_file_database_persists_across_opens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/progress.db");
        {
            let store = SqliteStore::open(&path, Catalog::builtin()).unwrap();
            store.save(&UserProgress::new("persisted")).unwrap();
        }
        let store = SqliteStore::open(&path, Catalog::builtin()).unwrap();
        assert!(store.load("persisted").unwrap().is_some());
        assert!(store.load("missing").unwrap().is_none());
    }
}
