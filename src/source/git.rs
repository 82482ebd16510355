//! Git source acquisition
//!
//! This module handles:
//! - Cloning a repository into a temporary directory (shallow unless a ref is requested)
//! - Checking out a branch, tag or commit
//! - Scanning the optional subpath of the checkout
//!
//! Authentication is left to git itself (SSH agent, credential helpers).
//! There are no retries; a failed clone is reported as is.

use std::path::{Component, Path};

use git2::{
    Cred, CredentialType, ErrorClass, FetchOptions, RemoteCallbacks, Repository, build::RepoBuilder,
};
use tracing::debug;

use super::GitSource;
use crate::domain::ResourceType;
use crate::error::{Result, ToolkitError};
use crate::resource::SourceFile;

/// Clone `source` and read its primary files
///
/// The checkout is removed before returning; the files are held in memory.
pub fn fetch(source: &GitSource, resource_type: ResourceType) -> Result<Vec<SourceFile>> {
    let temp = tempfile::Builder::new()
        .prefix("ai-toolkit-")
        .tempdir()
        .map_err(|e| ToolkitError::IoError {
            message: format!("Failed to create temporary directory: {e}"),
        })?;

    let repo = clone(&source.url, temp.path(), source.git_ref.is_none())?;
    if let Some(git_ref) = &source.git_ref {
        checkout_ref(&repo, git_ref)?;
    }

    let scan_root = match &source.subpath {
        Some(subpath) => {
            if !is_contained(Path::new(subpath)) {
                return Err(ToolkitError::SourceParseFailed {
                    input: subpath.clone(),
                    reason: "subpath must stay inside the repository".to_string(),
                });
            }
            temp.path().join(subpath)
        }
        None => temp.path().to_path_buf(),
    };

    super::local::scan(&scan_root, resource_type)
}

/// Clone `url` into `target`
///
/// Local paths and `file://` URLs are never cloned shallow since libgit2
/// does not support it for them.
pub fn clone(url: &str, target: &Path, shallow: bool) -> Result<Repository> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        if allowed_types.contains(CredentialType::SSH_KEY) {
            return Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"));
        }
        Cred::default()
    });

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    let is_local = url.starts_with("file://") || Path::new(url).is_absolute();
    if shallow && !is_local {
        fetch_options.depth(1);
    }

    debug!(url, target = %target.display(), shallow, "cloning");
    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);
    builder
        .clone(url, target)
        .map_err(|e| ToolkitError::GitCloneFailed {
            url: url.to_string(),
            reason: interpret_git_error(&e),
        })
}

/// Detach HEAD at the commit `refname` points to
pub fn checkout_ref(repo: &Repository, refname: &str) -> Result<()> {
    let candidates = [
        format!("refs/remotes/origin/{refname}"),
        format!("refs/tags/{refname}"),
        format!("refs/heads/{refname}"),
        refname.to_string(),
    ];

    let commit = candidates
        .iter()
        .find_map(|c| repo.revparse_single(c).ok()?.peel_to_commit().ok())
        .ok_or_else(|| ToolkitError::GitOperationFailed {
            message: format!("Could not resolve reference '{refname}'"),
        })?;

    debug!(refname, sha = %commit.id(), "checking out");
    repo.set_head_detached(commit.id())?;
    let mut checkout = git2::build::CheckoutBuilder::new();
    checkout.force();
    repo.checkout_head(Some(&mut checkout))?;
    Ok(())
}

fn is_contained(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Short, user-facing reason for a failed clone
fn interpret_git_error(err: &git2::Error) -> String {
    let message = err.message().to_lowercase();

    if message.contains("not found") || message.contains("404") {
        "Repository not found".to_string()
    } else if message.contains("authentication") || message.contains("credentials") {
        "Authentication failed".to_string()
    } else if message.contains("connection")
        || message.contains("network")
        || message.contains("timed out")
    {
        "Network error".to_string()
    } else if err.class() == ErrorClass::Ssh {
        format!("SSH error: {}", err.message())
    } else {
        err.message().to_string()
    }
}
