//! Query understanding, fixtures and file-backed stores for the assistant

mod config;
mod context;
mod email;
mod error;
mod extract;
mod faq;
mod fixtures;
mod intent;
mod support;
mod types;

pub use config::{Config, ScoringWeights};
pub use context::{
    estimate_satisfaction, score_turns, ContextSummary, ConversationStore, ConversationTurn,
    HistoryMatch, ScoredTurn, TurnContext,
};
pub use email::{best_email, mentions_email, EmailMatch};
pub use error::{Error, Result};
pub use extract::{extract_entities, extract_parameters, Params};
pub use faq::{is_interrogative, match_faq};
pub use fixtures::{
    allowed_actions, defaults, load_fixture, ActionConfig, Email, Faq, DEFAULT_ACTIONS_JSON,
    DEFAULT_EMAILS_JSON, DEFAULT_FAQS_JSON, DEFAULT_TICKETS_JSON,
};
pub use intent::{classify_intent, estimate_complexity};
pub use support::{TicketFilter, TicketStats, TicketStore};
pub use types::{
    ActionResult, Complexity, Entities, EntityKind, Intent, Priority, Ticket, TicketStatus,
};
