//! Atomic file writes.
//!
//! The compiled configuration replaces its destination via a temporary
//! file in the same directory, an fsync, and a rename, so the server
//! process never reads a partially written file. The temp file lives next
//! to the target to keep the rename on one filesystem.

use crate::error::{PrestartError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write a string to `path`, replacing any existing file.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| write_error(parent, "create directory", e))?;
    }

    let temp_path = temp_path_for(path)?;

    if let Err(err) = write_and_sync(&temp_path, content.as_bytes()) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        write_error(path, "replace", e)
    })
}

/// `.{filename}.tmp` next to the target.
fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let file_name = target
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            PrestartError::Template(format!("invalid output path '{}'", target.display()))
        })?;
    Ok(parent.join(format!(".{}.tmp", file_name)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| write_error(path, "create", e))?;
    file.write_all(content)
        .map_err(|e| write_error(path, "write", e))?;
    file.sync_all().map_err(|e| write_error(path, "sync", e))
}

fn write_error(path: &Path, action: &str, err: std::io::Error) -> PrestartError {
    PrestartError::Template(format!("failed to {} '{}': {}", action, path.display(), err))
}
