//! File system primitives used by the installer
//!
//! Every write to an install target goes through [`atomic_write`]: the content
//! is written to a uniquely named temporary file in the target's directory and
//! then renamed over the target, so a reader never observes a half-written file.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::trace;

use crate::error::{Result, file_read_failed, file_write_failed};

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| file_write_failed(parent, e))?;
    }
    Ok(())
}

/// Atomically replace `path` with `content`
///
/// Parent directories are created as needed. The temporary file lives in the
/// same directory as `path` so the final rename never crosses file systems.
/// On failure the temporary file is removed and the error is returned; on
/// success no temporary file remains.
pub fn atomic_write(path: &Path, content: impl AsRef<[u8]>) -> Result<()> {
    ensure_parent_dir(path)?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    // Dropping the NamedTempFile (including inside a PersistError) deletes it.
    let mut temp = tempfile::Builder::new()
        .prefix(".")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| file_write_failed(path, e))?;

    temp.write_all(content.as_ref())
        .and_then(|()| temp.flush())
        .map_err(|e| file_write_failed(path, e))?;

    set_default_permissions(temp.as_file()).map_err(|e| file_write_failed(path, e))?;

    trace!(temp = %temp.path().display(), target = %path.display(), "renaming temp file");
    temp.persist(path)
        .map_err(|e| file_write_failed(path, e.error))?;

    Ok(())
}

/// Copy the bytes of `source` to `target` without any re-encoding
pub fn copy_verbatim(source: &Path, target: &Path) -> Result<()> {
    let bytes = fs::read(source).map_err(|e| file_read_failed(source, e))?;
    ensure_parent_dir(target)?;
    fs::write(target, bytes).map_err(|e| file_write_failed(target, e))
}

// Temp files are created owner-only; installed resources are regular files.
#[cfg(unix)]
fn set_default_permissions(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}
