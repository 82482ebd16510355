//! Resource installation with duplicate handling
//!
//! This module handles:
//! - Resolving the target path of each request
//! - Detecting duplicates and auto-skipping identical content
//! - Dispatching differing duplicates to a strategy (see [`duplicate`])
//! - Writing sibling files next to fresh installs
//! - Isolating failures so one bad request never aborts a batch
//!
//! Requests are processed strictly one after another. Rename and backup
//! pick their numbered slot by probing the file system, which is only sound
//! when no other install runs at the same time.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub mod batch;
pub mod duplicate;


pub use batch::BatchAction;
pub use duplicate::DuplicateHandler;

use crate::common::fs::atomic_write;
use crate::config::SiblingPolicy;
use crate::domain::{DuplicateAction, InstallRequest, InstallResult, Resource, Scope};
use crate::error::{Result, ToolkitError, file_read_failed};
use crate::hash;
use crate::platform::AgentPathResolver;
use crate::ui::DuplicatePrompter;

/// Directory that relative (project) targets are resolved against
///
/// Reported paths stay relative; only file system access is re-rooted.
#[derive(Debug, Clone, Default)]
pub struct InstallRoot(Option<PathBuf>);

impl InstallRoot {
    /// Relative targets resolve against the process working directory
    pub fn cwd() -> Self {
        Self(None)
    }

    /// Relative targets resolve against `dir`
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self(Some(dir.into()))
    }

    /// Where a (possibly relative) target lives on disk
    pub fn on_disk(&self, path: &Path) -> PathBuf {
        match &self.0 {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// An existing file found at a request's target
#[derive(Debug)]
struct DuplicateInfo {
    path: PathBuf,
    existing_content: Vec<u8>,
    is_same_content: bool,
}

/// A duplicate strategy that can be applied without further input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TerminalAction {
    Skip,
    Overwrite,
    Rename,
    Backup,
    Fail,
}

/// Outcome of looking at a request's strategy
enum Resolution {
    Terminal(TerminalAction),
    /// `compare`: a choice must be obtained first
    NeedsChoice,
}

impl From<DuplicateAction> for Resolution {
    fn from(action: DuplicateAction) -> Self {
        match action {
            DuplicateAction::Skip => Resolution::Terminal(TerminalAction::Skip),
            DuplicateAction::Overwrite => Resolution::Terminal(TerminalAction::Overwrite),
            DuplicateAction::Rename => Resolution::Terminal(TerminalAction::Rename),
            DuplicateAction::Backup => Resolution::Terminal(TerminalAction::Backup),
            DuplicateAction::Fail => Resolution::Terminal(TerminalAction::Fail),
            DuplicateAction::Compare => Resolution::NeedsChoice,
        }
    }
}

/// Installs resources for agents, one request at a time
pub struct InstallManager<'a> {
    resolver: &'a dyn AgentPathResolver,
    prompter: &'a dyn DuplicatePrompter,
    root: InstallRoot,
    handler: DuplicateHandler,
    sibling_policy: SiblingPolicy,
}

impl<'a> InstallManager<'a> {
    /// Create a manager writing relative to the working directory
    pub fn new(resolver: &'a dyn AgentPathResolver, prompter: &'a dyn DuplicatePrompter) -> Self {
        Self {
            resolver,
            prompter,
            root: InstallRoot::cwd(),
            handler: DuplicateHandler::new(InstallRoot::cwd()),
            sibling_policy: SiblingPolicy::default(),
        }
    }

    /// Resolve relative targets against another directory
    #[must_use]
    pub fn with_root(mut self, root: InstallRoot) -> Self {
        self.handler = DuplicateHandler::new(root.clone());
        self.root = root;
        self
    }

    #[must_use]
    pub fn with_sibling_policy(mut self, policy: SiblingPolicy) -> Self {
        self.sibling_policy = policy;
        self
    }

    /// Install every request, returning one result per request in order
    ///
    /// Per-request failures become failed results. The call itself fails only
    /// when a request breaks the caller contract (see [`Resource::validate`]),
    /// and then nothing is written.
    pub fn install(&self, requests: &[InstallRequest]) -> Result<Vec<InstallResult>> {
        for request in requests {
            request.resource.validate()?;
        }

        Ok(requests
            .iter()
            .map(|request| self.install_isolated(request))
            .collect())
    }

    /// Indices of requests whose target exists with different content
    ///
    /// Used to decide whether to ask for a batch strategy. Requests that
    /// cannot be resolved or read are left for `install` to report.
    pub fn find_duplicates(&self, requests: &[InstallRequest]) -> Vec<usize> {
        requests
            .iter()
            .enumerate()
            .filter(|(_, request)| {
                self.resolve_target_path(&request.resource, &request.agent, request.scope)
                    .ok()
                    .and_then(|target| self.check_duplicate(&target, &request.resource).ok())
                    .flatten()
                    .is_some_and(|dup| !dup.is_same_content)
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Resolve `<agent base>/<name>/<primary filename>`
    pub fn resolve_target_path(
        &self,
        resource: &Resource,
        agent: &str,
        scope: Scope,
    ) -> Result<PathBuf> {
        let base = self
            .resolver
            .resolve_agent_path(agent, resource.resource_type, scope)
            .ok_or_else(|| ToolkitError::UnsupportedResourceType {
                agent: agent.to_string(),
                resource_type: resource.resource_type.to_string(),
            })?;

        Ok(base.join(&resource.name).join(resource.primary_filename()))
    }

    fn install_isolated(&self, request: &InstallRequest) -> InstallResult {
        let target = match self.resolve_target_path(&request.resource, &request.agent, request.scope)
        {
            Ok(target) => target,
            Err(e) => {
                warn!(resource = %request.resource.name, agent = %request.agent, error = %e, "cannot resolve target");
                return InstallResult::failed(request, Path::new(""), e);
            }
        };

        debug!(resource = %request.resource.name, target = %target.display(), "installing");
        match self.install_one(request, &target) {
            Ok(result) => {
                info!(resource = %result.resource_name, action = %result.action, path = %result.path.display(), "installed");
                result
            }
            Err(e) => {
                warn!(resource = %request.resource.name, target = %target.display(), error = %e, "install failed");
                InstallResult::failed(request, &target, e)
            }
        }
    }

    fn install_one(&self, request: &InstallRequest, target: &Path) -> Result<InstallResult> {
        let Some(duplicate) = self.check_duplicate(target, &request.resource)? else {
            atomic_write(&self.root.on_disk(target), &request.resource.content)?;
            self.write_siblings(&request.resource, target)?;
            return Ok(InstallResult::created(request, target));
        };

        // Identical content wins over any requested strategy.
        if duplicate.is_same_content {
            debug!(path = %target.display(), "identical content, skipping");
            return Ok(InstallResult::skipped(request, target));
        }

        self.handle_duplicate(request, &duplicate)
    }

    fn check_duplicate(&self, path: &Path, resource: &Resource) -> Result<Option<DuplicateInfo>> {
        let on_disk = self.root.on_disk(path);
        if !on_disk.exists() {
            return Ok(None);
        }

        let existing_content = fs::read(&on_disk).map_err(|e| file_read_failed(path, e))?;
        let is_same_content = hash::is_same_content(&existing_content, &resource.content);
        Ok(Some(DuplicateInfo {
            path: path.to_path_buf(),
            existing_content,
            is_same_content,
        }))
    }

    fn handle_duplicate(
        &self,
        request: &InstallRequest,
        duplicate: &DuplicateInfo,
    ) -> Result<InstallResult> {
        let action = match Resolution::from(request.on_duplicate) {
            Resolution::Terminal(action) => action,
            Resolution::NeedsChoice => {
                let existing = String::from_utf8_lossy(&duplicate.existing_content);
                let choice = self.prompter.choose_after_diff(
                    &request.resource.name,
                    &duplicate.path,
                    &existing,
                    &request.resource.content,
                )?;
                debug!(resource = %request.resource.name, ?choice, "compare resolved");
                match Resolution::from(DuplicateAction::from(choice)) {
                    Resolution::Terminal(action) => action,
                    Resolution::NeedsChoice => TerminalAction::Skip,
                }
            }
        };

        self.apply(action, request, &duplicate.path)
    }

    fn apply(
        &self,
        action: TerminalAction,
        request: &InstallRequest,
        target: &Path,
    ) -> Result<InstallResult> {
        debug!(resource = %request.resource.name, ?action, "resolving duplicate");
        let content = &request.resource.content;

        match action {
            TerminalAction::Skip => {
                self.handler.skip();
                Ok(InstallResult::skipped(request, target))
            }
            TerminalAction::Overwrite => {
                self.handler.overwrite(target, content)?;
                self.propagate_siblings(&request.resource, target)?;
                Ok(InstallResult::overwritten(request, target))
            }
            TerminalAction::Rename => {
                let new_path = self.handler.rename(target, content)?;
                self.propagate_siblings(&request.resource, &new_path)?;
                Ok(InstallResult::renamed(request, &new_path))
            }
            TerminalAction::Backup => {
                let backup_path = self.handler.backup(target, content)?;
                self.propagate_siblings(&request.resource, target)?;
                Ok(InstallResult::backed_up(request, target, &backup_path))
            }
            TerminalAction::Fail => Err(ToolkitError::DuplicateExists {
                path: target.display().to_string(),
            }),
        }
    }

    /// Sibling files for duplicate branches, only under [`SiblingPolicy::Always`]
    fn propagate_siblings(&self, resource: &Resource, primary: &Path) -> Result<()> {
        match self.sibling_policy {
            SiblingPolicy::CreatedOnly => Ok(()),
            SiblingPolicy::Always => self.write_siblings(resource, primary),
        }
    }

    fn write_siblings(&self, resource: &Resource, primary: &Path) -> Result<()> {
        let dir = primary.parent().unwrap_or_else(|| Path::new(""));
        for sibling in &resource.sibling_files {
            let path = dir.join(&sibling.relative_path);
            debug!(path = %path.display(), "writing sibling file");
            atomic_write(&self.root.on_disk(&path), &sibling.content)?;
        }
        Ok(())
    }
}
