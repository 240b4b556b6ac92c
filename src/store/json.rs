//! JSON file store: one `<user>.json` per user

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::ProgressStore;
use crate::progression::UserProgress;

/// Stores each record as pretty-printed JSON under a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create progress dir: {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding a user's record
    pub fn path_for(&self, user_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(user_id)))
    }
}

/// Map a user id to a file stem, one-to-one.
///
/// Lowercase ASCII letters, digits and `-` pass through; every other byte
/// becomes `_xx` (lowercase hex). Uppercase is escaped too so ids that differ
/// only in case stay apart on case-insensitive filesystems.
fn file_stem(user_id: &str) -> String {
    if user_id.is_empty() {
        return "_".to_string();
    }

    let mut stem = String::with_capacity(user_id.len());
    for byte in user_id.bytes() {
        if byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("_{byte:02x}"));
        }
    }
    stem
}

impl ProgressStore for JsonFileStore {
    fn load(&self, user_id: &str) -> Result<Option<UserProgress>> {
        let path = self.path_for(user_id);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read progress file: {}", path.display()))?;
        let progress: UserProgress = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse progress file: {}", path.display()))?;

        // Hand-copied or renamed files
        if progress.user_id() != user_id {
            tracing::warn!(
                "Progress file {} belongs to '{}', not '{}'",
                path.display(),
                progress.user_id(),
                user_id
            );
            return Ok(None);
        }

        Ok(Some(progress))
    }

    fn save(&self, progress: &UserProgress) -> Result<()> {
        let path = self.path_for(progress.user_id());
        let content = serde_json::to_string_pretty(progress)
            .with_context(|| "Failed to serialize progress")?;

        crate::fsutil::write_atomic(&path, content.as_bytes())
            .with_context(|| format!("Failed to save progress for '{}'", progress.user_id()))
    }
}
