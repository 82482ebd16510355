//! Resource domain types
//!
//! A resource is one installable unit: a primary markdown file plus optional
//! sibling files (scripts, references, assets) living next to it.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolkitError};

/// Kind of resource, which decides the destination directory and primary filename
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Skills,
    Rules,
    Commands,
    Agents,
}

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Skills,
        ResourceType::Rules,
        ResourceType::Commands,
        ResourceType::Agents,
    ];

    /// Canonical primary filename (case-sensitive)
    pub fn primary_filename(self) -> &'static str {
        match self {
            ResourceType::Skills => "SKILL.md",
            ResourceType::Rules => "RULES.md",
            ResourceType::Commands => "COMMANDS.md",
            ResourceType::Agents => "AGENT.md",
        }
    }

    /// Detect the type from a primary filename
    pub fn from_filename(filename: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.primary_filename() == filename)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Skills => "skills",
            ResourceType::Rules => "rules",
            ResourceType::Commands => "commands",
            ResourceType::Agents => "agents",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ToolkitError::InvalidRequest {
                message: format!("unknown resource type '{s}'"),
            })
    }
}

/// Optional descriptive metadata taken from frontmatter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Auxiliary file installed next to the primary file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingFile {
    /// Path relative to the resource's install directory (e.g. "scripts/run.sh")
    pub relative_path: PathBuf,

    /// Raw file bytes
    pub content: Vec<u8>,
}

impl SiblingFile {
    pub fn new(relative_path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }
}

/// A named content unit to be installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Directory name at install time
    pub name: String,

    pub resource_type: ResourceType,

    pub description: String,

    /// Primary file text, frontmatter included
    pub content: String,

    pub metadata: ResourceMetadata,

    /// Where the resource was read from (informational only)
    pub source_path: PathBuf,

    /// Ordered auxiliary files
    pub sibling_files: Vec<SiblingFile>,
}

impl Resource {
    pub fn new(
        name: impl Into<String>,
        resource_type: ResourceType,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            resource_type,
            description: String::new(),
            content: content.into(),
            metadata: ResourceMetadata::default(),
            source_path: PathBuf::new(),
            sibling_files: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[cfg(test)]
    pub fn with_sibling(mut self, sibling: SiblingFile) -> Self {
        self.sibling_files.push(sibling);
        self
    }

    pub fn primary_filename(&self) -> &'static str {
        self.resource_type.primary_filename()
    }

    /// Check the invariants the installer relies on
    ///
    /// The name must be usable as a single directory component, and sibling
    /// paths must stay inside the resource directory without shadowing the
    /// primary file.
    pub fn validate(&self) -> Result<()> {
        if !is_safe_name(&self.name) {
            return Err(ToolkitError::InvalidRequest {
                message: format!("resource name '{}' is not filesystem-safe", self.name),
            });
        }

        for sibling in &self.sibling_files {
            if !is_contained_relative(&sibling.relative_path) {
                return Err(ToolkitError::InvalidRequest {
                    message: format!(
                        "sibling file '{}' of '{}' must be a relative path inside the resource directory",
                        sibling.relative_path.display(),
                        self.name
                    ),
                });
            }
            if sibling.relative_path == Path::new(self.primary_filename()) {
                return Err(ToolkitError::InvalidRequest {
                    message: format!(
                        "sibling file of '{}' collides with primary file {}",
                        self.name,
                        self.primary_filename()
                    ),
                });
            }
        }

        Ok(())
    }
}

fn is_safe_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

fn is_contained_relative(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_resource_name {
        ($test_name:ident, $name:expr, $should_succeed:expr) => {
            #[test]
            fn $test_name() {
                let resource = Resource::new($name, ResourceType::Skills, "body");
                assert_eq!(resource.validate().is_ok(), $should_succeed);
            }
        };
    }

    test_resource_name!(test_validate_plain_name, "commit", true);
    test_resource_name!(test_validate_name_with_digits, "skill-2", true);
    test_resource_name!(test_validate_empty_name, "", false);
    test_resource_name!(test_validate_whitespace_name, "  ", false);
    test_resource_name!(test_validate_dot_name, ".", false);
    test_resource_name!(test_validate_dotdot_name, "..", false);
    test_resource_name!(test_validate_slash_name, "a/b", false);
    test_resource_name!(test_validate_backslash_name, "a\\b", false);

    #[test]
    fn test_primary_filenames() {
        assert_eq!(ResourceType::Skills.primary_filename(), "SKILL.md");
        assert_eq!(ResourceType::Rules.primary_filename(), "RULES.md");
        assert_eq!(ResourceType::Commands.primary_filename(), "COMMANDS.md");
        assert_eq!(ResourceType::Agents.primary_filename(), "AGENT.md");
    }

    #[test]
    fn test_from_filename_is_case_sensitive() {
        assert_eq!(
            ResourceType::from_filename("SKILL.md"),
            Some(ResourceType::Skills)
        );
        assert_eq!(ResourceType::from_filename("skill.md"), None);
    }

    #[test]
    fn test_from_str_round_trips_display() {
        for t in ResourceType::ALL {
            assert_eq!(t.to_string().parse::<ResourceType>().unwrap(), t);
        }
        assert!("skill".parse::<ResourceType>().is_err());
    }

    #[test]
    fn test_sibling_shadowing_primary_is_rejected() {
        let resource = Resource::new("commit", ResourceType::Skills, "body")
            .with_sibling(SiblingFile::new("SKILL.md", "other"));
        let err = resource.validate().unwrap_err();
        assert!(err.to_string().contains("primary file"));
    }

    #[test]
    fn test_sibling_escaping_directory_is_rejected() {
        let resource = Resource::new("commit", ResourceType::Skills, "body")
            .with_sibling(SiblingFile::new("../evil.sh", "rm"));
        assert!(resource.validate().is_err());

        let resource = Resource::new("commit", ResourceType::Skills, "body")
            .with_sibling(SiblingFile::new("/etc/passwd", "x"));
        assert!(resource.validate().is_err());
    }

    #[test]
    fn test_sibling_with_current_dir_prefix_is_rejected() {
        let resource = Resource::new("commit", ResourceType::Skills, "body")
            .with_sibling(SiblingFile::new("./SKILL.md", "shadow"));
        assert!(resource.validate().is_err());

        let resource = Resource::new("commit", ResourceType::Skills, "body")
            .with_sibling(SiblingFile::new("scripts/./run.sh", "echo hi"));
        assert!(resource.validate().is_err());
    }

    #[test]
    fn test_nested_sibling_is_accepted() {
        let resource = Resource::new("commit", ResourceType::Skills, "body")
            .with_sibling(SiblingFile::new("scripts/run.sh", "echo hi"))
            .with_sibling(SiblingFile::new("references/SKILL.md", "nested ok"));
        assert!(resource.validate().is_ok());
    }
}
