//! Common test utilities for ai-toolkit integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A project directory plus a private home directory
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Project root, used as the working directory
    pub path: PathBuf,
    /// Stand-in for `$HOME`
    pub home: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("project");
        let home = temp.path().join("home");
        std::fs::create_dir_all(&path).expect("Failed to create project directory");
        std::fs::create_dir_all(&home).expect("Failed to create home directory");
        Self { temp, path, home }
    }

    /// Write a file relative to the project root
    pub fn write_file(&self, path: &str, content: &str) {
        write(&self.path.join(path), content);
    }

    /// Read a file relative to the project root
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists relative to the project root
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Create a skill source directory outside the project
    #[allow(dead_code)]
    pub fn create_source(&self, files: &[(&str, &str)]) -> PathBuf {
        let source = self.temp.path().join("source");
        for (path, content) in files {
            write(&source.join(path), content);
        }
        source
    }

    /// Command running in the project with an isolated home and no
    /// inherited toolkit environment
    pub fn cmd(&self) -> Command {
        let mut cmd = ai_toolkit_cmd();
        cmd.current_dir(&self.path)
            .env("HOME", &self.home)
            .env_remove("XDG_CONFIG_HOME")
            .env_remove("AI_TOOLKIT_CONFIG")
            .env_remove("AI_TOOLKIT_DIR")
            .env_remove("AI_TOOLKIT_LOG")
            .env_remove("RUST_LOG");
        cmd
    }
}

#[allow(deprecated)]
pub fn ai_toolkit_cmd() -> Command {
    Command::cargo_bin("ai-toolkit").unwrap()
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(path, content).expect("Failed to write file");
}
