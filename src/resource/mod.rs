//! Turning discovered source files into [`Resource`]s
//!
//! This module handles:
//! - Frontmatter extraction (name, description, metadata)
//! - Resource type detection from the primary filename
//! - Name fallback from the containing directory

pub mod frontmatter;

use std::path::{Path, PathBuf};

use crate::domain::{Resource, ResourceMetadata, ResourceType, SiblingFile};

/// A primary file found in a source, with the files next to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
    pub sibling_files: Vec<SiblingFile>,
}

/// Directory names that only group resources by type
const TYPE_DIRECTORIES: [&str; 4] = ["skills", "rules", "commands", "agents"];

/// Build a resource from a source file
///
/// The filename decides the type when it is a known primary filename,
/// otherwise `fallback_type` is used.
pub fn parse_resource(file: &SourceFile, fallback_type: ResourceType) -> Resource {
    let fm = frontmatter::parse_frontmatter(&file.content).map(|(fm, _)| fm);
    let field = |key: &str| fm.as_ref().and_then(|fm| frontmatter::get_str(fm, key));

    let resource_type = file
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(ResourceType::from_filename)
        .unwrap_or(fallback_type);

    let name = field("name").unwrap_or_else(|| name_from_path(&file.path));
    let mut resource = Resource::new(name, resource_type, file.content.clone())
        .with_description(field("description").unwrap_or_default());
    resource.metadata = ResourceMetadata {
        author: field("author"),
        version: field("version"),
        license: field("license"),
        category: field("category"),
    };
    resource.source_path.clone_from(&file.path);
    resource.sibling_files.clone_from(&file.sibling_files);
    resource
}

pub fn parse_resources(files: &[SourceFile], fallback_type: ResourceType) -> Vec<Resource> {
    files
        .iter()
        .map(|f| parse_resource(f, fallback_type))
        .collect()
}

/// `skills/commit/SKILL.md` -> `commit`
///
/// A bare type directory (`skills/SKILL.md`) is skipped in favour of its
/// parent; with no usable directory the lowercased file stem is used.
fn name_from_path(path: &Path) -> String {
    let dirs: Vec<&str> = path
        .parent()
        .into_iter()
        .flat_map(|p| p.iter())
        .filter_map(|c| c.to_str())
        .filter(|c| !c.is_empty() && *c != "/" && *c != ".")
        .collect();

    match dirs.as_slice() {
        [.., last] if !TYPE_DIRECTORIES.contains(last) => (*last).to_string(),
        [.., parent, _] => (*parent).to_string(),
        _ => path
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, content: &str) -> SourceFile {
        SourceFile {
            path: PathBuf::from(path),
            content: content.to_string(),
            sibling_files: Vec::new(),
        }
    }

    #[test]
    fn test_frontmatter_fields() {
        let content = "---\nname: commit\ndescription: Write commits\nauthor: jo\nversion: 2\nlicense: MIT\ncategory: git\n---\nBody";
        let resource = parse_resource(&file("repo/skills/x/SKILL.md", content), ResourceType::Rules);

        assert_eq!(resource.name, "commit");
        assert_eq!(resource.resource_type, ResourceType::Skills);
        assert_eq!(resource.description, "Write commits");
        assert_eq!(resource.content, content);
        assert_eq!(resource.metadata.author.as_deref(), Some("jo"));
        assert_eq!(resource.metadata.version.as_deref(), Some("2"));
        assert_eq!(resource.metadata.license.as_deref(), Some("MIT"));
        assert_eq!(resource.metadata.category.as_deref(), Some("git"));
        assert_eq!(resource.source_path, PathBuf::from("repo/skills/x/SKILL.md"));
    }

    #[test]
    fn test_name_falls_back_to_directory() {
        let resource = parse_resource(&file("/src/skills/review/SKILL.md", "Body"), ResourceType::Skills);
        assert_eq!(resource.name, "review");
        assert_eq!(resource.description, "");
    }

    #[test]
    fn test_name_skips_type_directory() {
        let resource = parse_resource(&file("pack/rules/RULES.md", "x"), ResourceType::Rules);
        assert_eq!(resource.name, "pack");
    }

    #[test]
    fn test_name_from_file_stem() {
        assert_eq!(name_from_path(Path::new("SKILL.md")), "skill");
    }

    #[test]
    fn test_unknown_filename_uses_fallback_type() {
        let resource = parse_resource(&file("x/guide/README.md", "x"), ResourceType::Commands);
        assert_eq!(resource.resource_type, ResourceType::Commands);
    }

    #[test]
    fn test_invalid_frontmatter_uses_path() {
        let resource = parse_resource(
            &file("lib/lint/RULES.md", "---\nname: [oops\n---\nBody"),
            ResourceType::Rules,
        );
        assert_eq!(resource.name, "lint");
    }

    #[test]
    fn test_siblings_are_carried() {
        let mut f = file("a/tool/SKILL.md", "x");
        f.sibling_files.push(SiblingFile::new("run.sh", b"echo".to_vec()));
        let resources = parse_resources(&[f], ResourceType::Skills);
        assert_eq!(resources[0].sibling_files.len(), 1);
    }
}
