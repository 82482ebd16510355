//! Local directory scanning
//!
//! Finds every primary file of a resource type below a directory and
//! collects the files that live next to it.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::domain::{ResourceType, SiblingFile};
use crate::error::{Result, ToolkitError, file_read_failed};
use crate::resource::SourceFile;

/// Deepest directory level searched for primary files
pub const MAX_SCAN_DEPTH: usize = 5;

fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "node_modules"
}

/// Scan `root` for primary files of `resource_type`
///
/// `root` may also be a primary file itself, which yields just that file.
/// Results are ordered by path.
pub fn scan(root: &Path, resource_type: ResourceType) -> Result<Vec<SourceFile>> {
    if !root.exists() {
        return Err(ToolkitError::SourceNotFound {
            path: root.display().to_string(),
        });
    }

    let primary = resource_type.primary_filename();

    if root.is_file() {
        if root.file_name().is_some_and(|n| n == primary) {
            return Ok(vec![read_source_file(root, Vec::new())?]);
        }
        debug!(path = %root.display(), "source file is not a {primary}");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .max_depth(MAX_SCAN_DEPTH)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || entry.file_name() != primary {
            continue;
        }

        let dir = entry.path().parent().unwrap_or(root);
        let siblings = collect_siblings(dir, primary)?;
        debug!(path = %entry.path().display(), siblings = siblings.len(), "found resource");
        files.push(read_source_file(entry.path(), siblings)?);
    }

    Ok(files)
}

fn read_source_file(path: &Path, sibling_files: Vec<SiblingFile>) -> Result<SourceFile> {
    let content = fs::read_to_string(path).map_err(|e| file_read_failed(path, e))?;
    Ok(SourceFile {
        path: path.to_path_buf(),
        content,
        sibling_files,
    })
}

/// Every non-hidden file under `dir` except the primary file, sorted
fn collect_siblings(dir: &Path, primary: &str) -> Result<Vec<SiblingFile>> {
    let mut siblings = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.'));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable sibling");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let relative: PathBuf = match entry.path().strip_prefix(dir) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => continue,
        };
        if relative == Path::new(primary) {
            continue;
        }

        let content = fs::read(entry.path()).map_err(|e| file_read_failed(entry.path(), e))?;
        siblings.push(SiblingFile::new(relative, content));
    }

    siblings.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(siblings)
}
