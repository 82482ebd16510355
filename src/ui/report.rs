//! Human-readable installation reports

use console::Style;

use crate::domain::{InstallAction, InstallResult};
use crate::installer::batch::{
    ResultSummary, failed_results, format_summary, successful_results, summarize_results,
};

/// Icon shown next to each action
pub fn action_icon(action: InstallAction) -> &'static str {
    match action {
        InstallAction::Created => "v",
        InstallAction::Skipped => "-",
        InstallAction::Overwritten => "~",
        InstallAction::Renamed => ">",
        InstallAction::BackedUp => "^",
        InstallAction::Failed => "x",
    }
}

fn action_style(action: InstallAction) -> Style {
    match action {
        InstallAction::Created => Style::new().green(),
        InstallAction::Skipped => Style::new().dim(),
        InstallAction::Overwritten => Style::new().yellow(),
        InstallAction::Renamed => Style::new().cyan(),
        InstallAction::BackedUp => Style::new().magenta(),
        InstallAction::Failed => Style::new().red(),
    }
}

fn count_label(action: InstallAction) -> &'static str {
    match action {
        InstallAction::Created => "Created",
        InstallAction::Skipped => "Skipped",
        InstallAction::Overwritten => "Overwritten",
        InstallAction::Renamed => "Renamed",
        InstallAction::BackedUp => "Backed up",
        InstallAction::Failed => "Failed",
    }
}

/// Render the full report as lines (without trailing newline)
pub fn render_results(results: &[InstallResult]) -> Vec<String> {
    let bold = Style::new().bold();
    let summary: ResultSummary = summarize_results(results);
    let mut lines = vec![String::new(), bold.apply_to("Installation Results:").to_string()];
    lines.push(String::new());

    for action in InstallAction::ALL {
        let count = summary.count(action);
        if count > 0 {
            lines.push(
                action_style(action)
                    .apply_to(format!(
                        "  {} {}: {count}",
                        action_icon(action),
                        count_label(action)
                    ))
                    .to_string(),
            );
        }
    }

    lines.push(String::new());
    lines.push(
        bold.apply_to(format!(
            "  Total: {} ({} succeeded)",
            summary.total(),
            successful_results(results).len()
        ))
        .to_string(),
    );
    lines.push(format!("  {}", format_summary(&summary)));

    let failures = failed_results(results);
    if !failures.is_empty() {
        let red = Style::new().red();
        lines.push(String::new());
        lines.push(red.clone().bold().apply_to("Failures:").to_string());
        for f in failures {
            lines.push(
                red.apply_to(format!(
                    "  - {} ({}): {}",
                    f.resource_name,
                    f.agent,
                    f.error.as_deref().unwrap_or("unknown error")
                ))
                .to_string(),
            );
        }
    }

    if !results.is_empty() {
        lines.push(String::new());
        lines.push(bold.apply_to("Details:").to_string());
        for r in results {
            let path = r.renamed_to.as_ref().unwrap_or(&r.path);
            lines.push(
                action_style(r.action)
                    .apply_to(format!(
                        "  {} {} -> {}",
                        action_icon(r.action),
                        r.resource_name,
                        path.display()
                    ))
                    .to_string(),
            );
            if let Some(backup) = &r.backup_path {
                lines.push(
                    Style::new()
                        .dim()
                        .apply_to(format!("    (backup: {})", backup.display()))
                        .to_string(),
                );
            }
        }
    }

    lines
}

/// Print the report to stdout
pub fn display_results(results: &[InstallResult]) {
    for line in render_results(results) {
        println!("{line}");
    }
    println!();
}
