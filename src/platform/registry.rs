//! Agent registry for managing agent definitions
//!
//! This module provides:
//! - Agent registration and lookup
//! - Merging of user-configured path overrides
//! - Default agent definitions
//! - Tilde expansion for global paths

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Agent, AgentPathResolver};
use crate::config::AgentOverride;
use crate::domain::{ResourceType, Scope};
use crate::error::{Result, ToolkitError};

/// Registry of all known agents
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    agents: Vec<Agent>,
    by_key: HashMap<String, usize>,
    /// Directory `~` expands to; `None` leaves tilde paths unexpanded
    home: Option<PathBuf>,
}

impl AgentRegistry {
    /// Create a new registry with the given agents
    pub fn new(agents: Vec<Agent>) -> Self {
        let by_key = agents
            .iter()
            .enumerate()
            .map(|(idx, a)| (a.key.clone(), idx))
            .collect();

        Self {
            agents,
            by_key,
            home: dirs::home_dir(),
        }
    }

    /// Create a registry with the built-in agents
    pub fn with_defaults() -> Self {
        Self::new(default_agents())
    }

    /// Expand `~` against another directory
    #[cfg(test)]
    #[must_use]
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Get an agent by its key
    pub fn get(&self, key: &str) -> Option<&Agent> {
        self.by_key.get(key).and_then(|&idx| self.agents.get(idx))
    }

    /// Get an agent by key, failing with a diagnostic for unknown keys
    pub fn require(&self, key: &str) -> Result<&Agent> {
        self.get(key).ok_or_else(|| ToolkitError::UnknownAgent {
            agent: key.to_string(),
            available: self.keys().join(", "),
        })
    }

    /// Get all agents in registration order
    pub fn all(&self) -> &[Agent] {
        &self.agents
    }

    pub fn keys(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.key.as_str()).collect()
    }

    /// Merge configured overrides over the current definitions
    ///
    /// An override for an unknown key registers a new agent. A `null` path
    /// marks the type unsupported for that scope.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, AgentOverride>) {
        for (key, over) in overrides {
            let idx = if let Some(&idx) = self.by_key.get(key) {
                idx
            } else {
                debug!(agent = %key, "registering agent from configuration");
                self.agents.push(Agent::new(key.clone(), key.clone()));
                self.by_key.insert(key.clone(), self.agents.len() - 1);
                self.agents.len() - 1
            };

            let agent = &mut self.agents[idx];
            if let Some(name) = &over.name {
                agent.name.clone_from(name);
            }
            for (scope, paths) in [(Scope::Project, &over.project), (Scope::Global, &over.global)] {
                for (resource_type, path) in paths {
                    agent.paths_mut(scope).set(*resource_type, path.clone());
                }
            }
        }
    }

    fn expand_tilde(&self, path: &str) -> PathBuf {
        match (path.strip_prefix("~/"), &self.home) {
            (Some(rest), Some(home)) => home.join(rest),
            _ if path == "~" => self.home.clone().unwrap_or_else(|| PathBuf::from(path)),
            _ => PathBuf::from(path),
        }
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl AgentPathResolver for AgentRegistry {
    fn resolve_agent_path(
        &self,
        agent: &str,
        resource_type: ResourceType,
        scope: Scope,
    ) -> Option<PathBuf> {
        let base = self.get(agent)?.paths(scope).get(resource_type)?;
        Some(self.expand_tilde(base))
    }
}

/// Strip a trailing separator so joined paths print cleanly
fn trim_base(path: &Path) -> PathBuf {
    path.components().collect()
}

/// Resolve and normalize a base path (used for display)
pub fn display_base_path(
    registry: &AgentRegistry,
    agent: &str,
    resource_type: ResourceType,
    scope: Scope,
) -> Option<PathBuf> {
    registry
        .resolve_agent_path(agent, resource_type, scope)
        .map(|p| trim_base(&p))
}

/// Get default agent definitions
///
/// Returns the four supported agents. None of them has a `commands`
/// directory out of the box.
pub fn default_agents() -> Vec<Agent> {
    vec![
        Agent::new("claude-code", "Claude Code")
            .with_paths(ResourceType::Skills, ".claude/skills/", "~/.claude/skills/")
            .with_paths(ResourceType::Rules, ".claude/rules/", "~/.claude/rules/")
            .with_paths(ResourceType::Agents, ".claude/agents/", "~/.claude/agents/"),
        Agent::new("cursor", "Cursor")
            .with_paths(ResourceType::Skills, ".cursor/skills/", "~/.cursor/skills/")
            .with_paths(ResourceType::Rules, ".cursor/rules/", "~/.cursor/rules/"),
        Agent::new("github-copilot", "GitHub Copilot")
            .with_paths(ResourceType::Skills, ".github/skills/", "~/.copilot/skills/")
            .with_paths(
                ResourceType::Rules,
                ".github/instructions/",
                "~/.copilot/instructions/",
            ),
        Agent::new("antigravity", "Antigravity")
            .with_paths(
                ResourceType::Skills,
                ".agent/skills/",
                "~/.gemini/antigravity/skills/",
            )
            .with_paths(
                ResourceType::Rules,
                ".agent/rules/",
                "~/.gemini/antigravity/rules/",
            ),
    ]
}
