//! The persisted sync watermark: a single unix-seconds integer in a
//! plain text file.
//!
//! The file is read once before fetching and rewritten once after the
//! whole batch has posted. Any failure in between leaves it untouched.

use std::io::Write as _;
use std::path::Path;

use crate::error::{SyncError, SyncResult};

/// Reads the watermark persisted by the previous successful run.
///
/// Only the first line is considered, so a trailing newline or manual
/// edits below it are harmless.
pub fn read(path: &Path) -> SyncResult<i64> {
    let raw = std::fs::read_to_string(path).map_err(|err| SyncError::WatermarkUnavailable {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;

    let first_line = raw.lines().next().unwrap_or_default().trim();
    first_line
        .parse::<i64>()
        .map_err(|_| SyncError::WatermarkUnavailable {
            path: path.to_path_buf(),
            reason: format!("not a unix timestamp: {first_line:?}"),
        })
}

/// Overwrites the watermark atomically: write a temp file next to the
/// target, then rename over it. A crash mid-write never leaves a
/// half-written file behind.
pub fn write(path: &Path, value: i64) -> SyncResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let write_failed = |reason: String| SyncError::WatermarkWriteFailed {
        path: path.to_path_buf(),
        reason,
    };

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .map_err(|err| write_failed(format!("create temp file in {}: {err}", dir.display())))?;
    writeln!(file, "{value}").map_err(|err| write_failed(err.to_string()))?;
    file.persist(path)
        .map_err(|err| write_failed(err.to_string()))?;

    Ok(())
}
