use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::{info, instrument};

use crate::ledger::tools::error::{Result, ToolError};

/// Timestamp layout embedded in backup names, e.g. `20251115_093012`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Sibling path `<stem><marker><timestamp><.ext>` for a backup of `path`.
pub fn backup_path_for(path: &Path, marker: &str, timestamp: NaiveDateTime) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!(
        "{stem}{marker}{}{}",
        timestamp.format(TIMESTAMP_FORMAT),
        extension_suffix(path)
    );
    sibling(path, file_name)
}

/// Copies `path` next to itself under a timestamped name and returns the
/// copy's path. The source file is never modified.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn create_backup(path: &Path, marker: &str) -> Result<PathBuf> {
    let backup_path = backup_path_for(path, marker, Local::now().naive_local());
    fs::copy(path, &backup_path).map_err(|source| ToolError::Backup {
        path: path.to_path_buf(),
        source,
    })?;
    info!(backup = %backup_path.display(), "backup created");
    Ok(backup_path)
}

/// `.ext` of `path`, or an empty string when it has none.
pub(crate) fn extension_suffix(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

pub(crate) fn sibling(path: &Path, file_name: String) -> PathBuf {
    match path.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}
