//! Agent definitions and install path resolution
//!
//! This module handles:
//! - Agent definitions (where each coding assistant keeps its resources)
//! - Agent registration and lookup (via [`AgentRegistry`])
//! - Resolving a base directory for an agent, resource type and scope
//!
//! The installer only sees the [`AgentPathResolver`] trait, so tests can swap
//! in a resolver rooted somewhere harmless.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{ResourceType, Scope};

pub mod registry;

pub use registry::AgentRegistry;

/// Resolves the directory that holds resources of one type for an agent
pub trait AgentPathResolver {
    /// Base directory for `resource_type` under `scope`, or `None` when the
    /// agent does not support that type (or is unknown)
    fn resolve_agent_path(
        &self,
        agent: &str,
        resource_type: ResourceType,
        scope: Scope,
    ) -> Option<PathBuf>;
}

/// Base paths of one agent for one scope; a missing entry means unsupported
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentPaths(BTreeMap<ResourceType, String>);

impl AgentPaths {
    pub fn get(&self, resource_type: ResourceType) -> Option<&str> {
        self.0.get(&resource_type).map(String::as_str)
    }

    pub fn set(&mut self, resource_type: ResourceType, path: Option<String>) {
        match path {
            Some(path) => {
                self.0.insert(resource_type, path);
            }
            None => {
                self.0.remove(&resource_type);
            }
        }
    }
}

/// An AI coding assistant with its own resource layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agent {
    /// Agent key used on the command line (e.g. "claude-code")
    pub key: String,

    /// Display name (e.g. "Claude Code")
    pub name: String,

    pub project: AgentPaths,

    /// Paths may start with `~/`
    pub global: AgentPaths,
}

impl Agent {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            project: AgentPaths::default(),
            global: AgentPaths::default(),
        }
    }

    /// Register project and global base paths for a resource type
    pub fn with_paths(
        mut self,
        resource_type: ResourceType,
        project: impl Into<String>,
        global: impl Into<String>,
    ) -> Self {
        self.project.set(resource_type, Some(project.into()));
        self.global.set(resource_type, Some(global.into()));
        self
    }

    pub fn paths(&self, scope: Scope) -> &AgentPaths {
        match scope {
            Scope::Project => &self.project,
            Scope::Global => &self.global,
        }
    }

    pub fn paths_mut(&mut self, scope: Scope) -> &mut AgentPaths {
        match scope {
            Scope::Project => &mut self.project,
            Scope::Global => &mut self.global,
        }
    }

    /// Resource types with a path in at least one scope
    pub fn supported_types(&self) -> Vec<ResourceType> {
        ResourceType::ALL
            .into_iter()
            .filter(|t| self.project.get(*t).is_some() || self.global.get(*t).is_some())
            .collect()
    }

    pub fn supports(&self, resource_type: ResourceType) -> bool {
        self.supported_types().contains(&resource_type)
    }
}
