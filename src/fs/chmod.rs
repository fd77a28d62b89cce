//! Recursive permission normalization.
//!
//! The managed server runs as an unprivileged user but must write to the
//! application's storage tree, which the image build may have left owned
//! by root. Before start, the tree is opened up: directories 0o777, files
//! 0o666.

use crate::error::Result;
use std::path::Path;

/// Make `root` and everything beneath it writable by the managed process.
///
/// A missing root completes without raising: not every application ships
/// a storage directory. Symlinked entries are classified by their target,
/// matching a stat-based walk.
#[cfg(unix)]
pub fn chmod_recursive(root: &Path) -> Result<()> {
    if !root.exists() {
        return Ok(());
    }

    set_mode(root, 0o777)?;
    visit(root)
}

/// Permission bits are a unix concern; elsewhere this is a no-op.
#[cfg(not(unix))]
pub fn chmod_recursive(_root: &Path) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
fn visit(dir: &Path) -> Result<()> {
    use crate::error::PrestartError;

    let entries = std::fs::read_dir(dir).map_err(|e| {
        PrestartError::Permissions(format!("failed to read '{}': {}", dir.display(), e))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            PrestartError::Permissions(format!("failed to read '{}': {}", dir.display(), e))
        })?;
        let path = entry.path();

        let metadata = std::fs::metadata(&path).map_err(|e| {
            PrestartError::Permissions(format!("failed to stat '{}': {}", path.display(), e))
        })?;

        if metadata.is_dir() {
            set_mode(&path, 0o777)?;
            visit(&path)?;
        } else {
            set_mode(&path, 0o666)?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use crate::error::PrestartError;
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).map_err(|e| {
        PrestartError::Permissions(format!(
            "failed to set permissions on '{}': {}",
            path.display(),
            e
        ))
    })
}
