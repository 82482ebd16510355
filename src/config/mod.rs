//! User configuration (`config.yaml`) data structures
//!
//! The file is optional. It is read from `$AI_TOOLKIT_CONFIG` when set,
//! otherwise from `<config dir>/ai-toolkit/config.yaml`. Command line flags
//! always win over values found here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::domain::{DuplicateAction, ResourceType, Scope};
use crate::error::{Result, ToolkitError};

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "AI_TOOLKIT_CONFIG";

/// When sibling files are written alongside the primary file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiblingPolicy {
    /// Only for fresh installs
    #[default]
    CreatedOnly,
    /// Also when a duplicate is overwritten, backed up or renamed
    Always,
}

/// Per-agent path overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentOverride {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Project paths by resource type; `null` marks the type unsupported
    #[serde(default)]
    pub project: BTreeMap<ResourceType, Option<String>>,

    /// Global paths by resource type; may start with `~/`
    #[serde(default)]
    pub global: BTreeMap<ResourceType, Option<String>>,
}

/// Contents of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolkitConfig {
    /// Default install scope
    #[serde(default)]
    pub scope: Option<Scope>,

    /// Default duplicate strategy
    #[serde(default)]
    pub on_duplicate: Option<DuplicateAction>,

    /// Default agents to install for
    #[serde(default)]
    pub agents: Option<Vec<String>>,

    #[serde(default)]
    pub agent_paths: BTreeMap<String, AgentOverride>,

    #[serde(default)]
    pub propagate_siblings: SiblingPolicy,
}

impl ToolkitConfig {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| ToolkitError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_yaml(&yaml).map_err(|e| match e {
            ToolkitError::ConfigParseFailed { reason, .. } => ToolkitError::ConfigParseFailed {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Load from the default location, falling back to defaults when absent
    ///
    /// An explicitly configured path must exist.
    pub fn load() -> Result<Self> {
        if let Some(explicit) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            let path = PathBuf::from(explicit);
            debug!(path = %path.display(), "loading configuration from {CONFIG_ENV}");
            return Self::load_from(&path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "loading configuration");
                Self::load_from(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// `<config dir>/ai-toolkit/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ai-toolkit").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn with_config_env<T>(value: Option<&Path>, f: impl FnOnce() -> T) -> T {
        let original = std::env::var_os(CONFIG_ENV);
        unsafe {
            match value {
                Some(v) => std::env::set_var(CONFIG_ENV, v),
                None => std::env::remove_var(CONFIG_ENV),
            }
        }
        let out = f();
        unsafe {
            match original {
                Some(o) => std::env::set_var(CONFIG_ENV, o),
                None => std::env::remove_var(CONFIG_ENV),
            }
        }
        out
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(ToolkitConfig::from_yaml("").unwrap(), ToolkitConfig::default());
        assert_eq!(
            ToolkitConfig::default().propagate_siblings,
            SiblingPolicy::CreatedOnly
        );
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
scope: global
on_duplicate: backup
agents: [claude-code, cursor]
propagate_siblings: always
agent_paths:
  cursor:
    global:
      skills: ~/cursor-skills/
"#;
        let config = ToolkitConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.scope, Some(Scope::Global));
        assert_eq!(config.on_duplicate, Some(DuplicateAction::Backup));
        assert_eq!(
            config.agents,
            Some(vec!["claude-code".to_string(), "cursor".to_string()])
        );
        assert_eq!(config.propagate_siblings, SiblingPolicy::Always);
        assert_eq!(
            config.agent_paths["cursor"].global[&ResourceType::Skills].as_deref(),
            Some("~/cursor-skills/")
        );
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = ToolkitConfig::from_yaml("colour: blue\n").unwrap_err();
        assert!(matches!(err, ToolkitError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_invalid_duplicate_action_is_rejected() {
        assert!(ToolkitConfig::from_yaml("on_duplicate: merge\n").is_err());
    }

    #[test]
    fn test_load_from_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "scope: [nope]\n").unwrap();

        let err = ToolkitConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("config.yaml"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = ToolkitConfig::load_from(&temp.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ToolkitError::ConfigReadFailed { .. }));
    }

    #[test]
    #[serial]
    fn test_load_uses_env_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yaml");
        std::fs::write(&path, "scope: global\n").unwrap();

        let config = with_config_env(Some(&path), ToolkitConfig::load).unwrap();
        assert_eq!(config.scope, Some(Scope::Global));
    }

    #[test]
    #[serial]
    fn test_load_explicit_missing_path_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yaml");

        let result = with_config_env(Some(&path), ToolkitConfig::load);
        assert!(matches!(result, Err(ToolkitError::ConfigReadFailed { .. })));
    }
}
