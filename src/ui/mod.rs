//! UI/presentation layer
//!
//! This module handles:
//! - Diffs between installed and incoming content
//! - Interactive duplicate decisions (via the [`DuplicatePrompter`] trait)
//! - Installation result reports
//! - Choosing resources, agents and scope interactively
//! - Spinners for long-running source acquisition
//!
//! Nothing here touches install targets; the installer only talks to the
//! prompter trait.

pub mod diff;
pub mod prompt;
pub mod report;
pub mod select;

pub use prompt::{DuplicatePrompter, InquirePrompter, NonInteractivePrompter};
pub use report::display_results;

use indicatif::{ProgressBar, ProgressStyle};

/// Create a spinner, or nothing when output is not a terminal
pub fn create_spinner(message: &str) -> Option<ProgressBar> {
    if !console::user_attended() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template(&format!("{{spinner}} {message}"))
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
    pb.set_style(style);
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    Some(pb)
}

/// Clear a spinner created by [`create_spinner`]
pub fn finish_spinner(pb: Option<ProgressBar>) {
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}
