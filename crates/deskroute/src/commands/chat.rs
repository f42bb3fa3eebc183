use super::ask::render;
use deskroute_router::{AppContext, Router};
use deskroute_telemetry::Paths;
use std::io::{BufRead, Write};

const EXIT_WORDS: &[&str] = &["exit", "quit", "bye"];

/// Answer queries line by line until EOF or an exit word
pub fn session<R: BufRead, W: Write>(
    app: &mut AppContext,
    input: R,
    mut output: W,
    role: &str,
    user: &str,
) -> anyhow::Result<usize> {
    let router = Router::new();
    let mut answered = 0;

    write!(output, "> ")?;
    output.flush()?;
    for line in input.lines() {
        let line = line?;
        let query = line.trim();
        if EXIT_WORDS.contains(&query.to_lowercase().as_str()) {
            break;
        }
        if !query.is_empty() {
            let (response, module) = router.route_query(app, query, role, Some(user));
            writeln!(output, "{}", render(&response, module))?;
            answered += 1;
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(answered)
}

pub fn run(paths: Paths, role: &str, user: &str) -> anyhow::Result<()> {
    let mut app = AppContext::open(paths);
    println!("deskroute chat as {} ({}); type 'exit' to leave", user, role);

    let stdin = std::io::stdin();
    let answered = session(&mut app, stdin.lock(), std::io::stdout(), role, user)?;
    tracing::debug!(answered, "chat session ended");
    Ok(())
}
