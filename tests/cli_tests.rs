//! CLI surface tests

mod common;

use common::{TestWorkspace, ai_toolkit_cmd};
use predicates::prelude::*;

#[test]
fn test_help_output() {
    ai_toolkit_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Universal installer for AI agent resources"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("agents"));
}

#[test]
fn test_install_help_lists_strategies() {
    ai_toolkit_cmd()
        .args(["install", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--on-duplicate"))
        .stdout(predicate::str::contains("--batch"))
        .stdout(predicate::str::contains("--agents-resource"));
}

#[test]
fn test_version_flag() {
    ai_toolkit_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_command() {
    ai_toolkit_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "ai-toolkit {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_agents_command_lists_builtin_agents() {
    let workspace = TestWorkspace::new();
    workspace
        .cmd()
        .arg("agents")
        .assert()
        .success()
        .stdout(predicate::str::contains("claude-code"))
        .stdout(predicate::str::contains("cursor"))
        .stdout(predicate::str::contains("github-copilot"))
        .stdout(predicate::str::contains("antigravity"))
        .stdout(predicate::str::contains(".claude/skills"));
}

#[test]
fn test_agents_command_shows_configured_agent() {
    let workspace = TestWorkspace::new();
    let config = workspace.home.join("toolkit.yaml");
    std::fs::write(
        &config,
        "agent_paths:\n  windsurf:\n    name: Windsurf\n    project:\n      rules: .windsurf/rules\n",
    )
    .unwrap();

    workspace
        .cmd()
        .env("AI_TOOLKIT_CONFIG", &config)
        .arg("agents")
        .assert()
        .success()
        .stdout(predicate::str::contains("Windsurf"))
        .stdout(predicate::str::contains(".windsurf/rules"));
}

#[test]
fn test_invalid_config_fails() {
    let workspace = TestWorkspace::new();
    let config = workspace.home.join("toolkit.yaml");
    std::fs::write(&config, "colour: blue\n").unwrap();

    workspace
        .cmd()
        .env("AI_TOOLKIT_CONFIG", &config)
        .arg("agents")
        .assert()
        .failure()
        .stderr(predicate::str::contains("toolkit.yaml"));
}

#[test]
fn test_completions_bash() {
    ai_toolkit_cmd()
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ai-toolkit"));
}

#[test]
fn test_completions_requires_shell() {
    ai_toolkit_cmd().arg("completions").assert().failure();
}

#[test]
fn test_unknown_subcommand_fails() {
    ai_toolkit_cmd().arg("uninstall").assert().failure();
}
