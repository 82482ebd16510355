//! Duplicate resolution strategies
//!
//! Each strategy runs only after the installer found an existing file whose
//! content differs from the incoming content:
//! - skip: keep the existing file
//! - overwrite: replace it atomically
//! - rename: install into the first free sibling directory `<name>-2`, `<name>-3`, ...
//! - backup: copy it to `<file>.backup` (or `.backup.1`, `.backup.2`, ...) then replace it

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::InstallRoot;
use crate::common::fs::{atomic_write, copy_verbatim};
use crate::error::{Result, ToolkitError};

/// Applies terminal duplicate strategies to paths under an install root
#[derive(Debug, Clone)]
pub struct DuplicateHandler {
    root: InstallRoot,
}

impl DuplicateHandler {
    pub fn new(root: InstallRoot) -> Self {
        Self { root }
    }

    /// Keep the existing file; nothing is touched
    pub fn skip(&self) {}

    /// Replace `target` with `content`
    pub fn overwrite(&self, target: &Path, content: &str) -> Result<()> {
        atomic_write(&self.root.on_disk(target), content)
    }

    /// Write `content` into the next free `<dir>-<n>` sibling directory
    ///
    /// `target` is `<parent>/<dir>/<file>`. The scan starts at 2 and stops at
    /// the first `<dir>-<n>` that does not exist, so the counter is always
    /// appended to the full directory name (`skill-2` becomes `skill-2-2`).
    /// Returns the new path; the original file is left untouched.
    pub fn rename(&self, target: &Path, content: &str) -> Result<PathBuf> {
        let invalid = || ToolkitError::InvalidRequest {
            message: format!(
                "cannot rename {}: target has no resource directory",
                target.display()
            ),
        };
        let filename = target.file_name().ok_or_else(invalid)?;
        let dir = target.parent().ok_or_else(invalid)?;
        let base_name = dir.file_name().ok_or_else(invalid)?;
        let parent_dir = dir.parent().unwrap_or_else(|| Path::new(""));

        let mut counter: u32 = 2;
        let new_dir = loop {
            let mut candidate = OsString::from(base_name);
            candidate.push(format!("-{counter}"));
            let candidate = parent_dir.join(candidate);
            if !self.root.on_disk(&candidate).exists() {
                break candidate;
            }
            counter += 1;
        };

        let new_path = new_dir.join(filename);
        debug!(from = %target.display(), to = %new_path.display(), "renaming duplicate");
        atomic_write(&self.root.on_disk(&new_path), content)?;
        Ok(new_path)
    }

    /// Back up the current `target` bytes, then replace it with `content`
    ///
    /// Returns the backup path.
    pub fn backup(&self, target: &Path, content: &str) -> Result<PathBuf> {
        let backup_path = self.next_backup_path(target);
        debug!(target = %target.display(), backup = %backup_path.display(), "backing up duplicate");

        copy_verbatim(&self.root.on_disk(target), &self.root.on_disk(&backup_path))?;
        atomic_write(&self.root.on_disk(target), content)?;
        Ok(backup_path)
    }

    /// `<target>.backup`, or the first free `<target>.backup.<n>` from 1
    fn next_backup_path(&self, target: &Path) -> PathBuf {
        let base = with_suffix(target, ".backup");
        if !self.root.on_disk(&base).exists() {
            return base;
        }

        let mut counter: u32 = 1;
        loop {
            let candidate = with_suffix(&base, &format!(".{counter}"));
            if !self.root.on_disk(&candidate).exists() {
                return candidate;
            }
            counter += 1;
        }
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}
