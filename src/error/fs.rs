//! File system errors

use std::fmt::Display;
use std::path::Path;

use super::ToolkitError;

/// Creates a read failure for `path`, keeping the underlying reason
pub fn read_failed(path: &Path, reason: impl Display) -> ToolkitError {
    ToolkitError::FileReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a write failure for `path`, keeping the underlying reason
pub fn write_failed(path: &Path, reason: impl Display) -> ToolkitError {
    ToolkitError::FileWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
