//! Install request and result types
//!
//! An [`InstallRequest`] is immutable once built; when a strategy needs to be
//! changed (batch override, per-item prompt) a new request is derived with
//! [`InstallRequest::with_on_duplicate`]. Every request yields exactly one
//! [`InstallResult`].

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Resource;

/// Installation locality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Relative to the current working directory
    Project,
    /// Rooted at the user's home directory
    Global,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Project => f.write_str("project"),
            Scope::Global => f.write_str("global"),
        }
    }
}

/// What to do when the target file already exists with different content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateAction {
    /// Keep the existing file
    Skip,
    /// Replace the existing file
    Overwrite,
    /// Install next to it as `<name>-<n>`
    Rename,
    /// Copy the existing file to `.backup` then replace it
    Backup,
    /// Show a diff and ask
    Compare,
    /// Report a failure
    Fail,
}

impl fmt::Display for DuplicateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DuplicateAction::Skip => "skip",
            DuplicateAction::Overwrite => "overwrite",
            DuplicateAction::Rename => "rename",
            DuplicateAction::Backup => "backup",
            DuplicateAction::Compare => "compare",
            DuplicateAction::Fail => "fail",
        };
        f.write_str(s)
    }
}

/// Choices offered after a diff has been shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareChoice {
    Skip,
    Overwrite,
    Backup,
}

impl From<CompareChoice> for DuplicateAction {
    fn from(choice: CompareChoice) -> Self {
        match choice {
            CompareChoice::Skip => DuplicateAction::Skip,
            CompareChoice::Overwrite => DuplicateAction::Overwrite,
            CompareChoice::Backup => DuplicateAction::Backup,
        }
    }
}

/// One unit of install work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub resource: Resource,
    pub agent: String,
    pub scope: Scope,
    pub on_duplicate: DuplicateAction,
}

impl InstallRequest {
    pub fn new(
        resource: Resource,
        agent: impl Into<String>,
        scope: Scope,
        on_duplicate: DuplicateAction,
    ) -> Self {
        Self {
            resource,
            agent: agent.into(),
            scope,
            on_duplicate,
        }
    }

    /// Copy of this request with a different duplicate strategy
    #[must_use]
    pub fn with_on_duplicate(&self, on_duplicate: DuplicateAction) -> Self {
        Self {
            on_duplicate,
            ..self.clone()
        }
    }
}

/// Final outcome of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallAction {
    Created,
    Skipped,
    Overwritten,
    Renamed,
    BackedUp,
    Failed,
}

impl InstallAction {
    pub const ALL: [InstallAction; 6] = [
        InstallAction::Created,
        InstallAction::Skipped,
        InstallAction::Overwritten,
        InstallAction::Renamed,
        InstallAction::BackedUp,
        InstallAction::Failed,
    ];
}

impl fmt::Display for InstallAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InstallAction::Created => "created",
            InstallAction::Skipped => "skipped",
            InstallAction::Overwritten => "overwritten",
            InstallAction::Renamed => "renamed",
            InstallAction::BackedUp => "backed-up",
            InstallAction::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Structured outcome of one install request
///
/// Built only through the constructors below so that `backup_path` is present
/// iff the action is `BackedUp`, `renamed_to` iff `Renamed`, and `error` iff
/// the result failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallResult {
    pub resource_name: String,
    pub agent: String,
    pub success: bool,
    pub action: InstallAction,
    /// Final file location; the new location for renamed installs
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renamed_to: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InstallResult {
    fn completed(request: &InstallRequest, action: InstallAction, path: &Path) -> Self {
        Self {
            resource_name: request.resource.name.clone(),
            agent: request.agent.clone(),
            success: true,
            action,
            path: path.to_path_buf(),
            backup_path: None,
            renamed_to: None,
            error: None,
        }
    }

    pub fn created(request: &InstallRequest, path: &Path) -> Self {
        Self::completed(request, InstallAction::Created, path)
    }

    pub fn skipped(request: &InstallRequest, path: &Path) -> Self {
        Self::completed(request, InstallAction::Skipped, path)
    }

    pub fn overwritten(request: &InstallRequest, path: &Path) -> Self {
        Self::completed(request, InstallAction::Overwritten, path)
    }

    pub fn renamed(request: &InstallRequest, new_path: &Path) -> Self {
        Self {
            renamed_to: Some(new_path.to_path_buf()),
            ..Self::completed(request, InstallAction::Renamed, new_path)
        }
    }

    pub fn backed_up(request: &InstallRequest, path: &Path, backup_path: &Path) -> Self {
        Self {
            backup_path: Some(backup_path.to_path_buf()),
            ..Self::completed(request, InstallAction::BackedUp, path)
        }
    }

    /// `path` is the attempted target, or empty when it could not be resolved
    pub fn failed(request: &InstallRequest, path: &Path, error: impl fmt::Display) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            ..Self::completed(request, InstallAction::Failed, path)
        }
    }
}
