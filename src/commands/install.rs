//! Install command
//!
//! Turns command line flags, configuration and (on a terminal) interactive
//! answers into install requests, hands them to the [`InstallManager`] and
//! reports the results.

use std::path::PathBuf;

use tracing::debug;
use wax::{CandidatePath, Glob, Pattern};

use crate::cli::InstallArgs;
use crate::config::ToolkitConfig;
use crate::domain::{DuplicateAction, InstallRequest, Resource, ResourceType, Scope};
use crate::error::{Result, ToolkitError};
use crate::installer::batch::{apply_batch_action, failed_results, has_failures};
use crate::installer::{BatchAction, InstallManager, InstallRoot};
use crate::platform::AgentRegistry;
use crate::resource::parse_resources;
use crate::source::{self, SourceSpec};
use crate::ui::{self, DuplicatePrompter, InquirePrompter, NonInteractivePrompter, select};

/// Run install command
pub fn run(dir: Option<PathBuf>, config: &ToolkitConfig, args: InstallArgs) -> Result<()> {
    let interactive = !args.yes
        && !args.json
        && console::user_attended()
        && console::user_attended_stderr();
    debug!(interactive, "starting install");

    let mut registry = AgentRegistry::with_defaults();
    registry.apply_overrides(&config.agent_paths);

    let resource_type = match args.resource_type() {
        Some(t) => t,
        None if interactive => select::select_resource_type()?,
        None => {
            return Err(invalid(
                "one of --skills, --rules, --commands or --agents-resource is required",
            ));
        }
    };

    let source_input = match &args.source {
        Some(s) => s.clone(),
        None if interactive => select::input_source()?,
        None => return Err(invalid("--source is required")),
    };

    let resources = load_resources(&source_input, resource_type, args.only.as_deref())?;
    let resources = if interactive {
        select::select_resources(resources)?
    } else {
        resources
    };
    if resources.is_empty() {
        println!("Nothing selected.");
        return Ok(());
    }

    let agents = resolve_agents(&args, config, &registry, resource_type, interactive)?;
    let scope = match args.scope.or(config.scope) {
        Some(scope) => scope,
        None if interactive => select::select_scope(Scope::Project)?,
        None => Scope::Project,
    };

    let explicit_action = args
        .on_duplicate
        .or(args.yes.then_some(DuplicateAction::Overwrite))
        .or(config.on_duplicate);
    let default_action = explicit_action.unwrap_or(if interactive {
        DuplicateAction::Compare
    } else {
        DuplicateAction::Skip
    });

    let requests = build_requests(&resources, &agents, scope, default_action);

    let prompter: Box<dyn DuplicatePrompter> = if interactive {
        Box::new(InquirePrompter)
    } else {
        Box::new(NonInteractivePrompter)
    };
    let root = dir.map(InstallRoot::at).unwrap_or_default();
    let manager = InstallManager::new(&registry, prompter.as_ref())
        .with_root(root)
        .with_sibling_policy(config.propagate_siblings);

    let requests = if interactive {
        resolve_batch_interactively(&manager, prompter.as_ref(), requests, args.batch, explicit_action)?
    } else {
        match args.batch {
            Some(batch) => apply_batch_action(&requests, batch),
            None => requests,
        }
    };

    let results = manager.install(&requests)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        ui::display_results(&results);
    }

    if has_failures(&results) {
        return Err(ToolkitError::InstallFailed {
            failed: failed_results(&results).len(),
            total: results.len(),
        });
    }
    Ok(())
}

fn invalid(message: &str) -> ToolkitError {
    ToolkitError::InvalidRequest {
        message: message.to_string(),
    }
}

/// Acquire and parse the resources of a source, filtered by name
fn load_resources(
    source_input: &str,
    resource_type: ResourceType,
    only: Option<&str>,
) -> Result<Vec<Resource>> {
    let spec = match source::parse_source(source_input)? {
        SourceSpec::Local(path) if path.exists() => {
            SourceSpec::Local(dunce::canonicalize(&path).unwrap_or(path))
        }
        other => other,
    };

    let spinner = ui::create_spinner(&format!("Loading {resource_type} from {spec}..."));
    let files = source::load_source_files(&spec, resource_type);
    ui::finish_spinner(spinner);

    let resources = parse_resources(&files?, resource_type);
    let Some(pattern) = only else {
        return Ok(resources);
    };

    let filtered = filter_by_name(resources, pattern)?;
    if filtered.is_empty() {
        return Err(ToolkitError::NoResourcesFound {
            resource_type: format!("{resource_type} matching '{pattern}'"),
            source_name: spec.to_string(),
        });
    }
    Ok(filtered)
}

/// Keep resources whose name matches the glob `pattern`
pub fn filter_by_name(resources: Vec<Resource>, pattern: &str) -> Result<Vec<Resource>> {
    let glob = Glob::new(pattern).map_err(|e| ToolkitError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    Ok(resources
        .into_iter()
        .filter(|r| glob.matched(&CandidatePath::from(r.name.as_str())).is_some())
        .collect())
}

/// Agents from flags, then config, then an interactive choice
fn resolve_agents(
    args: &InstallArgs,
    config: &ToolkitConfig,
    registry: &AgentRegistry,
    resource_type: ResourceType,
    interactive: bool,
) -> Result<Vec<String>> {
    let configured = if args.agents.is_empty() {
        config.agents.clone().unwrap_or_default()
    } else {
        args.agents.clone()
    };

    if !configured.is_empty() {
        for key in &configured {
            registry.require(key)?;
        }
        return Ok(dedup(configured));
    }

    if !interactive {
        return Err(invalid(
            "--agents is required (e.g. --agents claude-code,cursor)",
        ));
    }

    let supported: Vec<_> = registry
        .all()
        .iter()
        .filter(|a| a.supports(resource_type))
        .collect();
    if supported.is_empty() {
        return Err(invalid(&format!("no agent supports {resource_type}")));
    }

    let selected = select::select_agents(&supported)?;
    if selected.is_empty() {
        return Err(ToolkitError::Cancelled);
    }
    Ok(selected)
}

fn dedup(keys: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(keys.len());
    for key in keys {
        if !out.contains(&key) {
            out.push(key);
        }
    }
    out
}

/// One request per resource and agent, resource-major
pub fn build_requests(
    resources: &[Resource],
    agents: &[String],
    scope: Scope,
    on_duplicate: DuplicateAction,
) -> Vec<InstallRequest> {
    resources
        .iter()
        .flat_map(|resource| {
            agents.iter().map(move |agent| {
                InstallRequest::new(resource.clone(), agent.clone(), scope, on_duplicate)
            })
        })
        .collect()
}

/// Apply `--batch`, or ask for a batch strategy when duplicates exist and
/// no strategy was given
fn resolve_batch_interactively(
    manager: &InstallManager<'_>,
    prompter: &dyn DuplicatePrompter,
    requests: Vec<InstallRequest>,
    batch: Option<BatchAction>,
    explicit_action: Option<DuplicateAction>,
) -> Result<Vec<InstallRequest>> {
    let duplicates = manager.find_duplicates(&requests);
    if duplicates.is_empty() {
        return Ok(requests);
    }

    let batch = match (batch, explicit_action) {
        (Some(batch), _) => batch,
        (None, Some(_)) => return Ok(requests),
        (None, None) => prompter.choose_batch_action(duplicates.len())?,
    };

    if batch != BatchAction::AskEach {
        return Ok(apply_batch_action(&requests, batch));
    }

    let mut requests = requests;
    for idx in duplicates {
        let request = &requests[idx];
        let path = manager.resolve_target_path(&request.resource, &request.agent, request.scope)?;
        let action = prompter.choose_action(&request.resource.name, &path)?;
        let updated = request.with_on_duplicate(action);
        requests[idx] = updated;
    }
    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resources(names: &[&str]) -> Vec<Resource> {
        names
            .iter()
            .map(|n| Resource::new(*n, ResourceType::Skills, "x"))
            .collect()
    }

    #[test]
    fn test_filter_by_name() {
        let filtered = filter_by_name(resources(&["commit", "commit-msg", "review"]), "commit*").unwrap();
        let names: Vec<_> = filtered.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["commit", "commit-msg"]);
    }

    #[test]
    fn test_filter_by_name_alternatives() {
        let filtered = filter_by_name(resources(&["a", "b", "c"]), "{a,c}").unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_filter_invalid_pattern() {
        assert!(matches!(
            filter_by_name(resources(&["a"]), "{unclosed"),
            Err(ToolkitError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_build_requests_is_resource_major() {
        let agents = vec!["claude-code".to_string(), "cursor".to_string()];
        let requests = build_requests(
            &resources(&["a", "b"]),
            &agents,
            Scope::Global,
            DuplicateAction::Backup,
        );

        let pairs: Vec<_> = requests
            .iter()
            .map(|r| (r.resource.name.as_str(), r.agent.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("a", "claude-code"), ("a", "cursor"), ("b", "claude-code"), ("b", "cursor")]
        );
        assert!(requests.iter().all(|r| r.scope == Scope::Global));
        assert!(requests.iter().all(|r| r.on_duplicate == DuplicateAction::Backup));
    }

    #[test]
    fn test_resolve_agents_prefers_flags_and_validates() {
        let registry = AgentRegistry::with_defaults();
        let config = ToolkitConfig {
            agents: Some(vec!["cursor".to_string()]),
            ..ToolkitConfig::default()
        };

        let args = InstallArgs {
            agents: vec!["claude-code".to_string(), "claude-code".to_string()],
            ..InstallArgs::default()
        };
        assert_eq!(
            resolve_agents(&args, &config, &registry, ResourceType::Skills, false).unwrap(),
            vec!["claude-code"]
        );

        let args = InstallArgs::default();
        assert_eq!(
            resolve_agents(&args, &config, &registry, ResourceType::Skills, false).unwrap(),
            vec!["cursor"]
        );

        let args = InstallArgs {
            agents: vec!["vim".to_string()],
            ..InstallArgs::default()
        };
        assert!(matches!(
            resolve_agents(&args, &config, &registry, ResourceType::Skills, false),
            Err(ToolkitError::UnknownAgent { .. })
        ));
    }

    #[test]
    fn test_resolve_agents_required_without_terminal() {
        let registry = AgentRegistry::with_defaults();
        assert!(matches!(
            resolve_agents(
                &InstallArgs::default(),
                &ToolkitConfig::default(),
                &registry,
                ResourceType::Skills,
                false
            ),
            Err(ToolkitError::InvalidRequest { .. })
        ));
    }
}
