//! Source specification and resource acquisition
//!
//! This module handles:
//! - Parsing user input (local paths, GitHub/GitLab URLs, SSH URLs, `owner/repo`)
//! - Scanning local directories for primary files (see [`local`])
//! - Shallow-cloning git sources into a temporary directory (see [`git`])
//!
//! Supported input formats:
//! - `./skills`, `/abs/path`, `~/skills` (or any path that exists)
//! - `owner/repo` (GitHub shorthand)
//! - `https://github.com/owner/repo[/tree/<ref>[/<subpath>]]`
//! - `https://gitlab.com/owner/repo[/-/tree/<ref>[/<subpath>]]`
//! - `git@host:owner/repo.git`, `git://host/owner/repo.git`
//! - any other `https://` URL is treated as a plain git remote

pub mod git;
pub mod local;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::ResourceType;
use crate::error::{Result, ToolkitError};
use crate::resource::SourceFile;

static GITHUB_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:www\.)?github\.com/([^/]+)/([^/]+?)(?:\.git)?(?:/(?:tree|blob)/([^/]+)(?:/(.+?))?)?/?$",
    )
    .unwrap_or_else(|e| unreachable!("invalid regex: {e}"))
});

static GITLAB_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:www\.)?gitlab\.com/([^/]+)/([^/]+?)(?:\.git)?(?:/-/(?:tree|blob)/([^/]+)(?:/(.+?))?)?/?$",
    )
    .unwrap_or_else(|e| unreachable!("invalid regex: {e}"))
});

static SSH_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:git@([^:]+):|git://([^/]+)/)([^/]+)/([^/]+?)(?:\.git)?$")
        .unwrap_or_else(|e| unreachable!("invalid regex: {e}"))
});

static GITHUB_SHORTHAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)$")
        .unwrap_or_else(|e| unreachable!("invalid regex: {e}"))
});

/// Hosting service of a git source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitHost {
    GitHub,
    GitLab,
    Other,
}

impl GitHost {
    fn from_domain(host: &str) -> Self {
        match host {
            "github.com" => GitHost::GitHub,
            "gitlab.com" => GitHost::GitLab,
            _ => GitHost::Other,
        }
    }
}

/// A remote repository to clone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSource {
    pub host: GitHost,
    /// Clone URL
    pub url: String,
    pub owner: Option<String>,
    pub repo: Option<String>,
    /// Branch, tag or commit to check out
    pub git_ref: Option<String>,
    /// Directory (or file) inside the repository to scan
    pub subpath: Option<String>,
}

/// Where resources are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Local(PathBuf),
    Git(GitSource),
}

impl fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSpec::Local(path) => write!(f, "{}", path.display()),
            SourceSpec::Git(git) => {
                let label = match git.host {
                    GitHost::GitHub => "GitHub",
                    GitHost::GitLab => "GitLab",
                    GitHost::Other => "Git",
                };
                match (&git.owner, &git.repo) {
                    (Some(owner), Some(repo)) => {
                        write!(f, "{label}: {owner}/{repo}")?;
                        if let Some(subpath) = &git.subpath {
                            write!(f, "/{subpath}")?;
                        }
                        Ok(())
                    }
                    _ => write!(f, "{label}: {}", git.url),
                }
            }
        }
    }
}

/// Classify a source string
pub fn parse_source(input: &str) -> Result<SourceSpec> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(parse_failed(input, "source is empty"));
    }

    if looks_local(trimmed) {
        return Ok(SourceSpec::Local(expand_home(trimmed)));
    }

    if let Some(caps) = GITHUB_URL.captures(trimmed) {
        return Ok(SourceSpec::Git(hosted(GitHost::GitHub, "github.com", &caps)));
    }

    if let Some(caps) = GITLAB_URL.captures(trimmed) {
        return Ok(SourceSpec::Git(hosted(GitHost::GitLab, "gitlab.com", &caps)));
    }

    if let Some(caps) = SSH_URL.captures(trimmed) {
        let domain = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map_or("", |m| m.as_str());
        let owner = &caps[3];
        let repo = &caps[4];
        return Ok(SourceSpec::Git(GitSource {
            host: GitHost::from_domain(domain),
            url: format!("https://{domain}/{owner}/{repo}"),
            owner: Some(owner.to_string()),
            repo: Some(repo.to_string()),
            git_ref: None,
            subpath: None,
        }));
    }

    if let Some(caps) = GITHUB_SHORTHAND.captures(trimmed) {
        let (owner, repo) = (&caps[1], &caps[2]);
        return Ok(SourceSpec::Git(GitSource {
            host: GitHost::GitHub,
            url: format!("https://github.com/{owner}/{repo}"),
            owner: Some(owner.to_string()),
            repo: Some(repo.to_string()),
            git_ref: None,
            subpath: None,
        }));
    }

    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        if is_direct_file_url(trimmed) {
            return Err(parse_failed(
                input,
                "direct file URLs are not supported; point at the repository instead",
            ));
        }
        return Ok(SourceSpec::Git(GitSource {
            host: GitHost::Other,
            url: trimmed.to_string(),
            owner: None,
            repo: None,
            git_ref: None,
            subpath: None,
        }));
    }

    Err(parse_failed(input, "unrecognized source format"))
}

/// Read every primary file of `resource_type` from a source
pub fn load_source_files(spec: &SourceSpec, resource_type: ResourceType) -> Result<Vec<SourceFile>> {
    debug!(source = %spec, %resource_type, "loading source");
    let files = match spec {
        SourceSpec::Local(path) => local::scan(path, resource_type)?,
        SourceSpec::Git(git_source) => git::fetch(git_source, resource_type)?,
    };

    if files.is_empty() {
        return Err(ToolkitError::NoResourcesFound {
            resource_type: resource_type.to_string(),
            source_name: spec.to_string(),
        });
    }
    Ok(files)
}

fn hosted(host: GitHost, domain: &str, caps: &regex::Captures<'_>) -> GitSource {
    let owner = &caps[1];
    let repo = &caps[2];
    GitSource {
        host,
        url: format!("https://{domain}/{owner}/{repo}"),
        owner: Some(owner.to_string()),
        repo: Some(repo.to_string()),
        git_ref: caps.get(3).map(|m| m.as_str().to_string()),
        subpath: caps
            .get(4)
            .map(|m| m.as_str().trim_end_matches('/').to_string()),
    }
}

fn looks_local(input: &str) -> bool {
    input.starts_with('.')
        || input.starts_with('/')
        || input.starts_with('~')
        || Path::new(input).exists()
}

fn expand_home(input: &str) -> PathBuf {
    match (input.strip_prefix('~'), dirs::home_dir()) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(input),
    }
}

fn is_direct_file_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    ResourceType::ALL
        .iter()
        .any(|t| lower.ends_with(&format!("/{}", t.primary_filename().to_lowercase())))
}

fn parse_failed(input: &str, reason: &str) -> ToolkitError {
    ToolkitError::SourceParseFailed {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
