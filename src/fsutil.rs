//! File helpers shared by the config and JSON store

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

/// `config.toml` -> `config.toml.<suffix>`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Replace `path` with `content` (temp file + rename) while holding an
/// exclusive lock on `<path>.lock`. Readers see the old or new file, never
/// a partial one.
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let lock_path = sibling(path, "lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| format!("Failed to lock {}", lock_path.display()))?;

    let temp_path = sibling(path, "tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    temp_file
        .sync_all()
        .with_context(|| format!("Failed to sync {}", temp_path.display()))?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename into {}", path.display()))?;

    Ok(())
}
