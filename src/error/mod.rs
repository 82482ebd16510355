//! Error types and handling for ai-toolkit
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Helper constructors for the most common file system failures live in [`fs`].

pub mod fs;

pub use fs::{read_failed as file_read_failed, write_failed as file_write_failed};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for ai-toolkit operations
#[derive(Error, Diagnostic, Debug)]
pub enum ToolkitError {
    // Install errors
    #[error("File already exists: {path}")]
    #[diagnostic(
        code(ai_toolkit::install::duplicate_exists),
        help("Use --on-duplicate skip, overwrite, rename or backup to resolve the collision")
    )]
    DuplicateExists { path: String },

    #[error("Agent '{agent}' does not support {resource_type}")]
    #[diagnostic(
        code(ai_toolkit::install::unsupported_type),
        help("Run 'ai-toolkit agents' to see which resource types each agent supports")
    )]
    UnsupportedResourceType {
        agent: String,
        resource_type: String,
    },

    #[error("{failed} of {total} installation(s) failed")]
    #[diagnostic(code(ai_toolkit::install::failed))]
    InstallFailed { failed: usize, total: usize },

    #[error("Invalid install request: {message}")]
    #[diagnostic(code(ai_toolkit::install::invalid_request))]
    InvalidRequest { message: String },

    // Agent errors
    #[error("Unknown agent: {agent}")]
    #[diagnostic(
        code(ai_toolkit::agent::unknown),
        help("Supported agents: {available}")
    )]
    UnknownAgent { agent: String, available: String },

    // Source errors
    #[error("Failed to parse source: {input}")]
    #[diagnostic(
        code(ai_toolkit::source::parse_failed),
        help(
            "Valid formats: ./path, owner/repo, https://github.com/owner/repo, git@github.com:owner/repo.git"
        )
    )]
    SourceParseFailed { input: String, reason: String },

    #[error("Source not found: {path}")]
    #[diagnostic(code(ai_toolkit::source::not_found))]
    SourceNotFound { path: String },

    #[error("No {resource_type} found in {source_name}")]
    #[diagnostic(code(ai_toolkit::source::empty))]
    NoResourcesFound {
        resource_type: String,
        source_name: String,
    },

    // Git errors
    #[error("Failed to clone repository: {url}: {reason}")]
    #[diagnostic(
        code(ai_toolkit::git::clone_failed),
        help("Check that URL is correct and you have access to repository")
    )]
    GitCloneFailed { url: String, reason: String },

    #[error("Git operation failed: {message}")]
    #[diagnostic(code(ai_toolkit::git::operation_failed))]
    GitOperationFailed { message: String },

    // Configuration errors
    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(ai_toolkit::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(ai_toolkit::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Invalid filter pattern '{pattern}': {reason}")]
    #[diagnostic(code(ai_toolkit::config::invalid_pattern))]
    InvalidPattern { pattern: String, reason: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(ai_toolkit::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(ai_toolkit::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(ai_toolkit::fs::io_error))]
    IoError { message: String },

    // Prompt errors
    #[error("Prompt failed: {message}")]
    #[diagnostic(code(ai_toolkit::prompt::failed))]
    PromptFailed { message: String },

    #[error("Operation cancelled")]
    #[diagnostic(code(ai_toolkit::prompt::cancelled))]
    Cancelled,
}

impl From<std::io::Error> for ToolkitError {
    fn from(err: std::io::Error) -> Self {
        ToolkitError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ToolkitError {
    fn from(err: serde_yaml::Error) -> Self {
        ToolkitError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ToolkitError {
    fn from(err: serde_json::Error) -> Self {
        ToolkitError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<git2::Error> for ToolkitError {
    fn from(err: git2::Error) -> Self {
        ToolkitError::GitOperationFailed {
            message: err.message().to_string(),
        }
    }
}

impl From<inquire::InquireError> for ToolkitError {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted => ToolkitError::Cancelled,
            other => ToolkitError::PromptFailed {
                message: other.to_string(),
            },
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ToolkitError>;

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_error_contains {
        ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
            #[test]
            fn $test_name() {
                let err = $err;
                let error_string = err.to_string();
                $(
                    assert!(error_string.contains($contains),
                        "Error message should contain '{}', got: {}",
                        $contains,
                        error_string
                    );
                )+
            }
        };
    }

    #[test]
    fn test_duplicate_exists_display() {
        let err = ToolkitError::DuplicateExists {
            path: ".claude/skills/commit/SKILL.md".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "File already exists: .claude/skills/commit/SKILL.md"
        );
    }

    #[test]
    fn test_error_code() {
        let err = ToolkitError::DuplicateExists {
            path: "x".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("ai_toolkit::install::duplicate_exists".to_string())
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ToolkitError = io_err.into();
        assert!(matches!(err, ToolkitError::IoError { .. }));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str("invalid: yaml: content: [unclosed");
        let err: ToolkitError = parse_result.unwrap_err().into();
        assert!(matches!(err, ToolkitError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_inquire_cancel_maps_to_cancelled() {
        let err: ToolkitError = inquire::InquireError::OperationCanceled.into();
        assert!(matches!(err, ToolkitError::Cancelled));
    }

    test_error_contains!(
        test_unsupported_type_error,
        ToolkitError::UnsupportedResourceType {
            agent: "cursor".to_string(),
            resource_type: "agents".to_string(),
        },
        "cursor",
        "agents"
    );

    test_error_contains!(
        test_file_write_failed_error,
        file_write_failed(std::path::Path::new("/tmp/x"), "disk full"),
        "Failed to write file",
        "/tmp/x",
        "disk full"
    );

    test_error_contains!(
        test_unknown_agent_error,
        ToolkitError::UnknownAgent {
            agent: "vim".to_string(),
            available: "claude-code, cursor".to_string()
        },
        "Unknown agent: vim"
    );
}
