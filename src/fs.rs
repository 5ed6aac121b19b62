//! File system utilities.

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Writes content to a file atomically using a temp file and rename.
///
/// A config file is never left half-written if the process is interrupted
/// (e.g., Ctrl+C while saving from `gtr configure`).
/// The temp file is created in the same directory as the target file to ensure
/// the rename operation is atomic (same filesystem).
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or renamed.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    // Write to temp file first
    fs::write(&temp_path, content)?;

    // Atomic rename (same filesystem)
    fs::rename(&temp_path, path)?;

    Ok(())
}
