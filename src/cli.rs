//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::{DuplicateAction, ResourceType, Scope};
use crate::installer::BatchAction;

/// Universal installer for AI agent resources
///
/// Install skills, rules, commands and agents into the directories that
/// Claude Code, Cursor, GitHub Copilot and Antigravity read them from.
#[derive(Parser, Debug)]
#[command(
    name = "ai-toolkit",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Universal installer for AI agent resources",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  ai-toolkit install                                        \x1b[90m# Interactive\x1b[0m\n   \
                  ai-toolkit install --skills --source owner/repo --agents claude-code\n   \
                  ai-toolkit install --rules --source ./rules --agents cursor --on-duplicate backup\n   \
                  ai-toolkit agents                                         \x1b[90m# Show agent paths\x1b[0m\n"
)]
pub struct Cli {
    /// Project directory for project-scope installs (defaults to current directory)
    #[arg(long, short = 'C', global = true, env = "AI_TOOLKIT_DIR")]
    pub dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install resources from a source
    Install(InstallArgs),

    /// List supported agents and their install paths
    Agents,

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the install command
#[derive(Args, Debug, Default)]
#[command(
    group(ArgGroup::new("resource_type").args(["skills", "rules", "commands", "agents_resource"])),
    after_help = "EXAMPLES:\n  \
                  Install every skill of a GitHub repository for Claude Code:\n    \
                  ai-toolkit install --skills --source owner/repo --agents claude-code --yes\n\n\
                  Install one skill from a subdirectory:\n    \
                  ai-toolkit install --skills --source https://github.com/owner/repo/tree/main/skills/commit\n\n\
                  Install rules globally, keeping a backup of changed files:\n    \
                  ai-toolkit install --rules --source ./rules --agents cursor --scope global --on-duplicate backup"
)]
pub struct InstallArgs {
    /// Install skills (SKILL.md)
    #[arg(long)]
    pub skills: bool,

    /// Install rules (RULES.md)
    #[arg(long)]
    pub rules: bool,

    /// Install commands (COMMANDS.md)
    #[arg(long)]
    pub commands: bool,

    /// Install agents (AGENT.md)
    #[arg(long = "agents-resource")]
    pub agents_resource: bool,

    /// Source: local path, owner/repo, GitHub/GitLab URL or git URL
    #[arg(long, short = 's')]
    pub source: Option<String>,

    /// Target agents, comma separated (e.g. claude-code,cursor)
    #[arg(long, short = 'a', value_delimiter = ',', value_name = "AGENT")]
    pub agents: Vec<String>,

    /// Install scope
    #[arg(long, value_enum)]
    pub scope: Option<Scope>,

    /// What to do when a target file exists with different content
    #[arg(long, value_enum)]
    pub on_duplicate: Option<DuplicateAction>,

    /// One strategy for all duplicates
    #[arg(long, value_enum, conflicts_with = "on_duplicate")]
    pub batch: Option<BatchAction>,

    /// Only install resources whose name matches this glob
    #[arg(long, value_name = "GLOB")]
    pub only: Option<String>,

    /// Non-interactive: select every resource and overwrite duplicates
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

impl InstallArgs {
    /// The resource type chosen by flag, if any
    pub fn resource_type(&self) -> Option<ResourceType> {
        [
            (self.skills, ResourceType::Skills),
            (self.rules, ResourceType::Rules),
            (self.commands, ResourceType::Commands),
            (self.agents_resource, ResourceType::Agents),
        ]
        .into_iter()
        .find_map(|(set, t)| set.then_some(t))
    }
}

/// Arguments for completions command
#[derive(Args, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    ai-toolkit completions --shell bash > ~/.bash_completion.d/ai-toolkit\n\n\
                  Generate zsh completions:\n    ai-toolkit completions --shell zsh > ~/.zfunc/_ai-toolkit\n\n\
                  Generate fish completions:\n    ai-toolkit completions --shell fish > ~/.config/fish/completions/ai-toolkit.fish")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(long, value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn install_args(args: &[&str]) -> InstallArgs {
        let argv = ["ai-toolkit", "install"].iter().chain(args).copied();
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Install(args) => args,
            other => panic!("Expected Install command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parsing_install_minimal() {
        let args = install_args(&[]);
        assert_eq!(args.resource_type(), None);
        assert!(args.source.is_none());
        assert!(args.agents.is_empty());
        assert!(!args.yes);
    }

    #[test]
    fn test_cli_parsing_install_full() {
        let args = install_args(&[
            "--skills",
            "--source",
            "owner/repo",
            "--agents",
            "claude-code,cursor",
            "--scope",
            "global",
            "--on-duplicate",
            "backup",
            "--only",
            "commit*",
            "--yes",
            "--json",
        ]);
        assert_eq!(args.resource_type(), Some(ResourceType::Skills));
        assert_eq!(args.source.as_deref(), Some("owner/repo"));
        assert_eq!(args.agents, vec!["claude-code", "cursor"]);
        assert_eq!(args.scope, Some(Scope::Global));
        assert_eq!(args.on_duplicate, Some(DuplicateAction::Backup));
        assert_eq!(args.only.as_deref(), Some("commit*"));
        assert!(args.yes);
        assert!(args.json);
    }

    #[test]
    fn test_cli_agents_resource_flag() {
        let args = install_args(&["--agents-resource"]);
        assert_eq!(args.resource_type(), Some(ResourceType::Agents));
    }

    #[test]
    fn test_cli_batch_values() {
        let args = install_args(&["--batch", "backup-all"]);
        assert_eq!(args.batch, Some(BatchAction::BackupAll));
    }

    #[test]
    fn test_cli_rejects_two_types() {
        assert!(Cli::try_parse_from(["ai-toolkit", "install", "--skills", "--rules"]).is_err());
    }

    #[test]
    fn test_cli_rejects_batch_with_on_duplicate() {
        assert!(
            Cli::try_parse_from([
                "ai-toolkit",
                "install",
                "--batch",
                "skip-all",
                "--on-duplicate",
                "rename"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_cli_rejects_unknown_on_duplicate() {
        assert!(
            Cli::try_parse_from(["ai-toolkit", "install", "--on-duplicate", "merge"]).is_err()
        );
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from(["ai-toolkit", "agents", "-v", "-C", "/tmp/p"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/p")));
        assert!(matches!(cli.command, Commands::Agents));
    }

    #[test]
    fn test_cli_completions_shell() {
        let cli = Cli::try_parse_from(["ai-toolkit", "completions", "--shell", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions(args) => assert_eq!(args.shell, clap_complete::Shell::Zsh),
            other => panic!("Expected Completions command, got {other:?}"),
        }
    }
}
