//! Interactive selection of what to install
//!
//! Used by `install` when a choice was not given on the command line.
//! Every prompt writes to stderr, so stdout stays clean.

use std::fmt;

use inquire::{MultiSelect, Select, Text};

use crate::domain::{Resource, ResourceType, Scope};
use crate::error::{Result, ToolkitError};
use crate::platform::Agent;

const MULTI_HELP: &str = "  ↑↓ navigate  space select  enter confirm  type to filter  esc cancel";

struct Item<T> {
    label: String,
    value: T,
}

impl<T> fmt::Display for Item<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn select_one<T>(message: &str, items: Vec<Item<T>>) -> Result<T> {
    Select::new(message, items)
        .with_page_size(10)
        .prompt_skippable()?
        .map(|item| item.value)
        .ok_or(ToolkitError::Cancelled)
}

fn select_many<T>(message: &str, items: Vec<Item<T>>, all_selected: bool) -> Result<Vec<T>> {
    let mut prompt = MultiSelect::new(message, items)
        .with_page_size(10)
        .with_help_message(MULTI_HELP);
    if all_selected {
        prompt = prompt.with_all_selected_by_default();
    }
    let selection = prompt.prompt_skippable()?.ok_or(ToolkitError::Cancelled)?;
    Ok(selection.into_iter().map(|item| item.value).collect())
}

pub fn select_resource_type() -> Result<ResourceType> {
    select_one(
        "What do you want to install?",
        ResourceType::ALL
            .iter()
            .map(|t| Item {
                label: format!("{t} ({})", t.primary_filename()),
                value: *t,
            })
            .collect(),
    )
}

pub fn input_source() -> Result<String> {
    Text::new("Source:")
        .with_help_message("./path, owner/repo, or a GitHub/GitLab/git URL")
        .prompt_skippable()?
        .filter(|s| !s.trim().is_empty())
        .ok_or(ToolkitError::Cancelled)
}

/// Pick agent keys among `agents`
pub fn select_agents(agents: &[&Agent]) -> Result<Vec<String>> {
    select_many(
        "Install for which agents?",
        agents
            .iter()
            .map(|a| Item {
                label: format!("{} ({})", a.name, a.key),
                value: a.key.clone(),
            })
            .collect(),
        false,
    )
}

pub fn select_scope(default: Scope) -> Result<Scope> {
    let mut scopes = vec![
        Item {
            label: "Project - current directory".to_string(),
            value: Scope::Project,
        },
        Item {
            label: "Global - home directory".to_string(),
            value: Scope::Global,
        },
    ];
    if default == Scope::Global {
        scopes.reverse();
    }
    select_one("Install scope?", scopes)
}

/// Pick among discovered resources; everything starts selected
pub fn select_resources(resources: Vec<Resource>) -> Result<Vec<Resource>> {
    if resources.len() <= 1 {
        return Ok(resources);
    }
    select_many(
        "Select resources to install",
        resources
            .into_iter()
            .map(|r| Item {
                label: if r.description.is_empty() {
                    r.name.clone()
                } else {
                    format!("{} - {}", r.name, first_line(&r.description))
                },
                value: r,
            })
            .collect(),
        true,
    )
}

/// Multi-line labels break inquire's list layout
fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or_default()
}
