use deskroute_core::{allowed_actions, load_fixture, ActionConfig};
use deskroute_telemetry::Paths;

fn format_allowed(role: &str, config: &[ActionConfig]) -> String {
    let allowed = allowed_actions(role, config);
    if allowed.is_empty() {
        return format!("No actions available for role {}", role);
    }

    let mut lines = vec![format!("Actions available to {}:", role)];
    for action in allowed {
        if action.description.is_empty() {
            lines.push(format!("  {}", action.name));
        } else {
            lines.push(format!("  {:<22} {}", action.name, action.description));
        }
    }
    lines.join("\n")
}

pub fn run(paths: &Paths, role: &str) -> anyhow::Result<()> {
    let config: Vec<ActionConfig> = load_fixture(&paths.actions_config_file());
    if config.is_empty() {
        println!("No action configuration found. Run `deskroute init` first.");
        return Ok(());
    }
    println!("{}", format_allowed(role, &config));
    Ok(())
}
