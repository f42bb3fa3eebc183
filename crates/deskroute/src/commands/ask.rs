use deskroute_router::{AppContext, RouteModule, RouteResponse, Router};
use deskroute_telemetry::Paths;
use std::fmt::Write;

/// Human-readable answer with actions, suggestions and a routing footer
pub fn render(response: &RouteResponse, module: RouteModule) -> String {
    let mut out = String::new();
    out.push_str(&response.text);
    out.push('\n');

    if !response.actions.is_empty() {
        out.push_str("\nActions:\n");
        for action in &response.actions {
            let _ = writeln!(out, "  • {}", action);
        }
    }

    if !response.suggestions.is_empty() {
        out.push_str("\nTry one of:\n");
        for suggestion in &response.suggestions {
            let _ = writeln!(out, "  - {}", suggestion);
        }
    }

    let _ = writeln!(
        out,
        "\n[{} | confidence {:.2}{}]",
        module,
        response.confidence,
        if response.context_used {
            " | context used"
        } else {
            ""
        }
    );
    out
}

pub fn run(
    paths: Paths,
    query: &str,
    role: &str,
    user: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    if query.trim().is_empty() {
        anyhow::bail!("query must not be empty");
    }

    let mut app = AppContext::open(paths);
    let (response, module) = Router::new().route_query(&mut app, query, role, user);

    if json {
        let out = serde_json::json!({
            "module": module,
            "response": response,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", render(&response, module));
    }
    Ok(())
}
