//! Agents command: supported agents and where they keep each resource type

use console::Style;

use crate::config::ToolkitConfig;
use crate::domain::{ResourceType, Scope};
use crate::error::Result;
use crate::platform::AgentRegistry;
use crate::platform::registry::display_base_path;

/// Run agents command
pub fn run(config: &ToolkitConfig) -> Result<()> {
    let mut registry = AgentRegistry::with_defaults();
    registry.apply_overrides(&config.agent_paths);

    for line in render_agents(&registry) {
        println!("{line}");
    }
    Ok(())
}

fn render_agents(registry: &AgentRegistry) -> Vec<String> {
    let bold = Style::new().bold();
    let dim = Style::new().dim();
    let mut lines = Vec::new();

    for agent in registry.all() {
        lines.push(format!(
            "{} {}",
            bold.apply_to(&agent.name),
            dim.apply_to(format!("({})", agent.key))
        ));

        for resource_type in ResourceType::ALL {
            let label = resource_type.as_str();
            let path = |scope| {
                display_base_path(registry, &agent.key, resource_type, scope)
                    .map_or_else(|| "-".to_string(), |p| p.display().to_string())
            };
            if !agent.supports(resource_type) {
                lines.push(dim.apply_to(format!("  {label:<9} unsupported")).to_string());
                continue;
            }
            lines.push(format!(
                "  {label:<9} project: {}  global: {}",
                path(Scope::Project),
                path(Scope::Global)
            ));
        }
        lines.push(String::new());
    }

    lines
}
