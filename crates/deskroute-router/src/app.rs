//! Application context threaded through every routing call

use deskroute_actions::ActionRegistry;
use deskroute_core::{
    load_fixture, ActionConfig, Config, ConversationStore, Email, Faq, TicketStore,
    DEFAULT_ACTIONS_JSON, DEFAULT_EMAILS_JSON, DEFAULT_FAQS_JSON, DEFAULT_TICKETS_JSON,
};
use deskroute_telemetry::{atomic_write, write_json, Paths, TraceLog};
use std::path::PathBuf;

/// Fixtures, stores and configuration for one session
pub struct AppContext {
    pub paths: Paths,
    pub config: Config,
    pub faqs: Vec<Faq>,
    pub emails: Vec<Email>,
    pub action_config: Vec<ActionConfig>,
    pub tickets: TicketStore,
    pub conversations: ConversationStore,
    pub traces: TraceLog,
    pub actions: ActionRegistry,
}

impl AppContext {
    /// Load configuration and fixtures under `paths`. Missing or malformed
    /// files degrade to defaults or empty fixtures.
    pub fn open(paths: Paths) -> Self {
        let config = Config::load(&paths.config_file());
        Self::with_config(paths, config)
    }

    pub fn with_config(paths: Paths, config: Config) -> Self {
        let faqs = load_fixture(&paths.faqs_file());
        let emails = load_fixture(&paths.emails_file());
        let action_config = load_fixture(&paths.actions_config_file());

        tracing::debug!(
            root = %paths.root().display(),
            faqs = faqs.len(),
            emails = emails.len(),
            actions = action_config.len(),
            "application context loaded"
        );

        Self {
            tickets: TicketStore::new(paths.tickets_file()),
            conversations: ConversationStore::new(paths.conversation_file(), config.history_cap),
            traces: TraceLog::new(paths.trace_file(), config.trace_cap),
            actions: ActionRegistry::with_defaults(),
            faqs,
            emails,
            action_config,
            config,
            paths,
        }
    }
}

/// Write the built-in fixtures and a default config for any file that does
/// not exist yet. Returns the files written.
pub fn install_fixtures(paths: &Paths) -> std::io::Result<Vec<PathBuf>> {
    let fixtures = [
        (paths.faqs_file(), DEFAULT_FAQS_JSON),
        (paths.emails_file(), DEFAULT_EMAILS_JSON),
        (paths.tickets_file(), DEFAULT_TICKETS_JSON),
        (paths.actions_config_file(), DEFAULT_ACTIONS_JSON),
    ];

    let mut written = Vec::new();
    for (path, content) in fixtures {
        if path.exists() {
            continue;
        }
        atomic_write(&path, content.as_bytes())?;
        written.push(path);
    }

    let config_file = paths.config_file();
    if !config_file.exists() {
        write_json(&config_file, &Config::new())?;
        written.push(config_file);
    }

    Ok(written)
}
