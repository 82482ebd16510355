//! Batch operations over many install requests and their results
//!
//! - Apply one duplicate strategy to every request
//! - Count results by action and format the counts

use serde::Serialize;

use crate::domain::{DuplicateAction, InstallAction, InstallRequest, InstallResult};

/// Strategy applied to all duplicates of a batch at once
///
/// Rename is only available per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BatchAction {
    /// Keep each request's own strategy
    AskEach,
    SkipAll,
    OverwriteAll,
    BackupAll,
}

impl BatchAction {
    /// The strategy forced on every request, if any
    pub fn forced_action(self) -> Option<DuplicateAction> {
        match self {
            BatchAction::AskEach => None,
            BatchAction::SkipAll => Some(DuplicateAction::Skip),
            BatchAction::OverwriteAll => Some(DuplicateAction::Overwrite),
            BatchAction::BackupAll => Some(DuplicateAction::Backup),
        }
    }
}

/// Copy of `requests` with the batch strategy applied
///
/// `AskEach` returns the requests unchanged. The input is never modified.
pub fn apply_batch_action(requests: &[InstallRequest], batch: BatchAction) -> Vec<InstallRequest> {
    match batch.forced_action() {
        None => requests.to_vec(),
        Some(action) => requests
            .iter()
            .map(|req| req.with_on_duplicate(action))
            .collect(),
    }
}

/// Result counts by action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub created: usize,
    pub skipped: usize,
    pub overwritten: usize,
    pub renamed: usize,
    pub backed_up: usize,
    pub failed: usize,
}

impl ResultSummary {
    pub fn count(&self, action: InstallAction) -> usize {
        match action {
            InstallAction::Created => self.created,
            InstallAction::Skipped => self.skipped,
            InstallAction::Overwritten => self.overwritten,
            InstallAction::Renamed => self.renamed,
            InstallAction::BackedUp => self.backed_up,
            InstallAction::Failed => self.failed,
        }
    }

    fn count_mut(&mut self, action: InstallAction) -> &mut usize {
        match action {
            InstallAction::Created => &mut self.created,
            InstallAction::Skipped => &mut self.skipped,
            InstallAction::Overwritten => &mut self.overwritten,
            InstallAction::Renamed => &mut self.renamed,
            InstallAction::BackedUp => &mut self.backed_up,
            InstallAction::Failed => &mut self.failed,
        }
    }

    pub fn total(&self) -> usize {
        InstallAction::ALL.iter().map(|a| self.count(*a)).sum()
    }
}

/// Count results by action; every action is present, zero when unused
pub fn summarize_results(results: &[InstallResult]) -> ResultSummary {
    let mut summary = ResultSummary::default();
    for result in results {
        *summary.count_mut(result.action) += 1;
    }
    summary
}

/// Comma-joined non-zero counts in a fixed order
pub fn format_summary(summary: &ResultSummary) -> String {
    let parts: Vec<String> = InstallAction::ALL
        .iter()
        .filter(|a| summary.count(**a) > 0)
        .map(|a| {
            let label = match a {
                InstallAction::BackedUp => "backed up".to_string(),
                other => other.to_string(),
            };
            format!("{} {label}", summary.count(*a))
        })
        .collect();

    if parts.is_empty() {
        "No operations performed".to_string()
    } else {
        parts.join(", ")
    }
}

/// Whether any result has the failed action
pub fn has_failures(results: &[InstallResult]) -> bool {
    results.iter().any(|r| r.action == InstallAction::Failed)
}

/// Results whose action is failed
pub fn failed_results(results: &[InstallResult]) -> Vec<&InstallResult> {
    results
        .iter()
        .filter(|r| r.action == InstallAction::Failed)
        .collect()
}

/// Results flagged successful (skipped ones included)
pub fn successful_results(results: &[InstallResult]) -> Vec<&InstallResult> {
    results.iter().filter(|r| r.success).collect()
}
