use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deskroute")]
#[command(version)]
#[command(about = "Rule-based helpdesk assistant for GST invoices, filings and tickets")]
pub struct Cli {
    /// Assistant home (defaults to $DESKROUTE_HOME, then ~/.deskroute)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install sample fixtures and a default config
    Init,

    /// Route a single query and print the answer
    Ask {
        /// Query text
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,

        /// Caller role (Admin, Manager, Viewer)
        #[arg(short, long, default_value = "Viewer")]
        role: String,

        /// User id for conversation history
        #[arg(short, long)]
        user: Option<String>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive session reading queries from stdin
    Chat {
        #[arg(short, long, default_value = "Viewer")]
        role: String,

        #[arg(short, long, default_value = "default")]
        user: String,
    },

    /// Show recent routing traces
    Traces {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Show module usage and confidence statistics
        #[arg(long)]
        stats: bool,

        /// Only traces mentioning this term
        #[arg(long)]
        search: Option<String>,
    },

    /// Show a user's conversation history
    History {
        #[arg(short, long, default_value = "default")]
        user: String,

        #[arg(short, long, default_value_t = 5)]
        limit: usize,

        /// Show an aggregate summary instead of turns
        #[arg(long)]
        summary: bool,

        /// Rank turns by how well they match this term
        #[arg(long)]
        search: Option<String>,
    },

    /// Manage support tickets
    Tickets {
        #[command(subcommand)]
        action: Option<TicketAction>,
    },

    /// List the actions a role may run
    Actions {
        #[arg(short, long, default_value = "Viewer")]
        role: String,
    },

    /// Print version information
    Version,
}

#[derive(Subcommand)]
pub enum TicketAction {
    /// List tickets, optionally filtered
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Ticket counts
    Stats,
    /// Close a ticket
    Close { id: String },
}
