//! Static JSON fixtures standing in for backend data sources

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_FAQS_JSON: &str = include_str!("../fixtures/faqs.json");
pub const DEFAULT_EMAILS_JSON: &str = include_str!("../fixtures/sample_emails.json");
pub const DEFAULT_ACTIONS_JSON: &str = include_str!("../fixtures/actions_config.json");
pub const DEFAULT_TICKETS_JSON: &str = include_str!("../fixtures/tickets.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    pub subject: String,
    pub body: String,
    pub date: String,
    #[serde(default)]
    pub category: String,
}

/// Action name -> roles allowed to run it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub role_access: Vec<String>,
}

impl ActionConfig {
    pub fn allows(&self, role: &str) -> bool {
        self.role_access
            .iter()
            .any(|r| r.eq_ignore_ascii_case(role.trim()))
    }
}

/// Load a fixture list. Missing or malformed files are logged and read as empty.
pub fn load_fixture<T>(path: &Path) -> Vec<T>
where
    T: for<'de> Deserialize<'de>,
{
    if !path.exists() {
        tracing::warn!(path = %path.display(), "fixture file missing");
        return Vec::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read fixture");
            return Vec::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "malformed fixture");
            Vec::new()
        }
    }
}

/// Subset of actions visible to `role` (case-insensitive)
pub fn allowed_actions<'a>(role: &str, actions: &'a [ActionConfig]) -> Vec<&'a ActionConfig> {
    actions.iter().filter(|a| a.allows(role)).collect()
}

pub mod defaults {
    use super::*;

    pub fn faqs() -> Vec<Faq> {
        serde_json::from_str(DEFAULT_FAQS_JSON).unwrap_or_default()
    }

    pub fn emails() -> Vec<Email> {
        serde_json::from_str(DEFAULT_EMAILS_JSON).unwrap_or_default()
    }

    pub fn action_config() -> Vec<ActionConfig> {
        serde_json::from_str(DEFAULT_ACTIONS_JSON).unwrap_or_default()
    }
}
