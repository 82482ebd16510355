//! Interactive decisions about duplicates
//!
//! The installer asks a [`DuplicatePrompter`] whenever a `compare` strategy
//! needs a human. [`InquirePrompter`] shows a diff and asks on the terminal;
//! [`NonInteractivePrompter`] answers without asking for `--yes` runs and
//! when no terminal is attached.

use std::path::Path;

use inquire::Select;
use tracing::debug;

use super::diff::display_diff;
use crate::domain::{CompareChoice, DuplicateAction};
use crate::error::{Result, ToolkitError};
use crate::installer::BatchAction;

/// Source of decisions for duplicates
pub trait DuplicatePrompter {
    /// Show the difference and pick skip, overwrite or backup
    fn choose_after_diff(
        &self,
        resource_name: &str,
        path: &Path,
        existing: &str,
        new: &str,
    ) -> Result<CompareChoice>;

    /// Pick a strategy for one duplicate
    fn choose_action(&self, resource_name: &str, path: &Path) -> Result<DuplicateAction>;

    /// Pick one strategy for `count` duplicates at once
    fn choose_batch_action(&self, count: usize) -> Result<BatchAction>;
}

struct Choice<T> {
    label: &'static str,
    value: T,
}

impl<T> std::fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label)
    }
}

fn select<T>(message: &str, choices: Vec<Choice<T>>) -> Result<T> {
    let choice = Select::new(message, choices)
        .with_starting_cursor(0)
        .with_page_size(10)
        .without_filtering()
        .with_help_message("↑↓ to move, ENTER to select, ESC to cancel")
        .prompt_skippable()?
        .ok_or(ToolkitError::Cancelled)?;
    Ok(choice.value)
}

/// Terminal prompter backed by `inquire`
#[derive(Debug, Default, Clone, Copy)]
pub struct InquirePrompter;

impl DuplicatePrompter for InquirePrompter {
    fn choose_after_diff(
        &self,
        resource_name: &str,
        _path: &Path,
        existing: &str,
        new: &str,
    ) -> Result<CompareChoice> {
        println!("\nComparing \"{resource_name}\":");
        display_diff(existing, new, resource_name);

        select(
            "What do you want to do after seeing the diff?",
            vec![
                Choice {
                    label: "Skip - Keep existing",
                    value: CompareChoice::Skip,
                },
                Choice {
                    label: "Overwrite - Use new version",
                    value: CompareChoice::Overwrite,
                },
                Choice {
                    label: "Backup - Backup and overwrite",
                    value: CompareChoice::Backup,
                },
            ],
        )
    }

    fn choose_action(&self, resource_name: &str, path: &Path) -> Result<DuplicateAction> {
        select(
            &format!(
                "File \"{resource_name}\" already exists at {}. What do you want to do?",
                path.display()
            ),
            vec![
                Choice {
                    label: "Skip - Keep existing file",
                    value: DuplicateAction::Skip,
                },
                Choice {
                    label: "Overwrite - Replace with new version",
                    value: DuplicateAction::Overwrite,
                },
                Choice {
                    label: "Rename - Save new version with different name",
                    value: DuplicateAction::Rename,
                },
                Choice {
                    label: "Backup - Backup existing and install new",
                    value: DuplicateAction::Backup,
                },
                Choice {
                    label: "Compare - Show differences first",
                    value: DuplicateAction::Compare,
                },
            ],
        )
    }

    fn choose_batch_action(&self, count: usize) -> Result<BatchAction> {
        select(
            &format!("{count} resource(s) already exist. How should they be handled?"),
            vec![
                Choice {
                    label: "Ask for each",
                    value: BatchAction::AskEach,
                },
                Choice {
                    label: "Skip all",
                    value: BatchAction::SkipAll,
                },
                Choice {
                    label: "Overwrite all",
                    value: BatchAction::OverwriteAll,
                },
                Choice {
                    label: "Backup all",
                    value: BatchAction::BackupAll,
                },
            ],
        )
    }
}

/// Prompter that never blocks: keeps existing files when asked to compare
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractivePrompter;

impl DuplicatePrompter for NonInteractivePrompter {
    fn choose_after_diff(
        &self,
        resource_name: &str,
        path: &Path,
        _existing: &str,
        _new: &str,
    ) -> Result<CompareChoice> {
        debug!(resource = resource_name, path = %path.display(), "no terminal, compare resolves to skip");
        Ok(CompareChoice::Skip)
    }

    fn choose_action(&self, _resource_name: &str, _path: &Path) -> Result<DuplicateAction> {
        Ok(DuplicateAction::Skip)
    }

    fn choose_batch_action(&self, _count: usize) -> Result<BatchAction> {
        Ok(BatchAction::SkipAll)
    }
}
