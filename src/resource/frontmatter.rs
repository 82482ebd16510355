//! YAML frontmatter extraction

use serde_yaml::Value;
use tracing::warn;

/// Split `content` into its frontmatter mapping and body
///
/// Frontmatter is the block between a leading `---` line and the next `---`
/// line. Returns `None` when the delimiters are missing or the block is not
/// a YAML mapping. Broken YAML is logged and treated as absent.
pub fn parse_frontmatter(content: &str) -> Option<(Value, String)> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < 2 || lines[0].trim_end() != "---" {
        return None;
    }
    let end_idx = lines[1..].iter().position(|l| l.trim_end() == "---")? + 1;
    let yaml = lines[1..end_idx].join("\n");
    let body = lines[end_idx + 1..].join("\n");

    let value: Value = match serde_yaml::from_str(&yaml) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "ignoring invalid YAML frontmatter");
            return None;
        }
    };

    match value {
        Value::Mapping(_) => Some((value, body)),
        Value::Null => Some((Value::Mapping(Default::default()), body)),
        _ => None,
    }
}

/// Top-level scalar as a string; numbers and booleans are stringified
pub fn get_str(value: &Value, key: &str) -> Option<String> {
    let v = value.as_mapping()?.get(key)?;
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
