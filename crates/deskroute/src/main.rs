mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands, TicketAction};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries responses
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let paths = commands::resolve_paths(cli.home.as_deref())?;

    match cli.command {
        Commands::Init => commands::init::run(&paths),
        Commands::Ask {
            query,
            role,
            user,
            json,
        } => commands::ask::run(paths, &query.join(" "), &role, user.as_deref(), json),
        Commands::Chat { role, user } => commands::chat::run(paths, &role, &user),
        Commands::Traces {
            limit,
            stats,
            search,
        } => commands::traces::run(&paths, limit, stats, search.as_deref()),
        Commands::History {
            user,
            limit,
            summary,
            search,
        } => commands::history::run(&paths, &user, limit, summary, search.as_deref()),
        Commands::Tickets { action } => match action {
            Some(TicketAction::List {
                status,
                priority,
                search,
            }) => commands::tickets::run_list(
                &paths,
                status.as_deref(),
                priority.as_deref(),
                search.as_deref(),
            ),
            None => commands::tickets::run_list(&paths, None, None, None),
            Some(TicketAction::Stats) => commands::tickets::run_stats(&paths),
            Some(TicketAction::Close { id }) => commands::tickets::run_close(&paths, &id),
        },
        Commands::Actions { role } => commands::actions::run(&paths, &role),
        Commands::Version => commands::version::run(),
    }
}
