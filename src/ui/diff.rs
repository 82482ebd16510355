//! Unified diffs between an installed file and its replacement

use console::Style;
use similar::TextDiff;

/// Lines of context around each hunk
const CONTEXT_LINES: usize = 3;

/// Generate a unified diff between existing and new content
///
/// Returns an empty string when both sides are identical.
pub fn generate_diff(old: &str, new: &str, name: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(&format!("{name} (existing)"), &format!("{name} (new)"))
        .to_string()
}

/// Color a unified diff for the terminal
pub fn format_diff(diff: &str) -> String {
    let added = Style::new().green();
    let removed = Style::new().red();
    let hunk = Style::new().cyan();

    diff.lines()
        .map(|line| {
            if line.starts_with('+') && !line.starts_with("+++") {
                added.apply_to(line).to_string()
            } else if line.starts_with('-') && !line.starts_with("---") {
                removed.apply_to(line).to_string()
            } else if line.starts_with("@@") {
                hunk.apply_to(line).to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print a colored diff to stdout
pub fn display_diff(old: &str, new: &str, name: &str) {
    let diff = generate_diff(old, new, name);
    if diff.is_empty() {
        println!("\n(no textual differences)\n");
    } else {
        println!("\n{}\n", format_diff(&diff));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_headers_and_changes() {
        let diff = generate_diff("line1\nold\nline3\n", "line1\nnew\nline3\n", "commit");

        assert!(diff.contains("--- commit (existing)"));
        assert!(diff.contains("+++ commit (new)"));
        assert!(diff.contains("-old"));
        assert!(diff.contains("+new"));
        assert!(diff.contains("@@"));
    }

    #[test]
    fn test_identical_content_has_no_hunks() {
        assert!(generate_diff("same\n", "same\n", "x").is_empty());
    }

    #[test]
    fn test_format_diff_keeps_text() {
        let diff = generate_diff("a\n", "b\n", "x");
        let formatted = format_diff(&diff);
        let plain = console::strip_ansi_codes(&formatted);

        assert!(plain.contains("-a"));
        assert!(plain.contains("+b"));
        assert_eq!(plain.lines().count(), diff.lines().count());
    }
}
