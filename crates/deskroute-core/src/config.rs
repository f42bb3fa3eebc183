//! Configuration for routing, scoring and store limits

use deskroute_telemetry::DEFAULT_TRACE_CAP;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Weights summed by the context scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Turn intent equals the current intent
    pub intent: f64,
    /// Shared entity value in a common category
    pub entity: f64,
    /// Multiplier for the keyword overlap fraction
    pub keyword: f64,
    /// Maximum recency bonus
    pub recency: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            intent: 0.4,
            entity: 0.3,
            keyword: 0.2,
            recency: 0.1,
        }
    }
}

/// Router configuration (deskroute.json)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Max stored turns per user
    pub history_cap: usize,

    /// Max persisted trace entries
    pub trace_cap: usize,

    /// Recent turns considered by the context scorer
    pub context_window: usize,

    /// Max relevant turns returned by the context scorer
    pub max_context_turns: usize,

    /// Turns scoring at or below this are discarded
    pub relevance_threshold: f64,

    pub weights: ScoringWeights,

    /// Recency bonus decays to zero over this many hours
    pub recency_horizon_hours: f64,

    /// Email match requires a score strictly above this
    pub email_match_threshold: f64,

    /// Ticket priority is raised to high below this average satisfaction
    pub low_satisfaction_threshold: f64,

    /// Response characters kept in trace entries
    pub response_preview_chars: usize,
}

impl Config {
    pub fn new() -> Self {
        Self {
            history_cap: 30,
            trace_cap: DEFAULT_TRACE_CAP,
            context_window: 20,
            max_context_turns: 3,
            relevance_threshold: 0.2,
            weights: ScoringWeights::default(),
            recency_horizon_hours: 24.0,
            email_match_threshold: 1.0,
            low_satisfaction_threshold: 0.5,
            response_preview_chars: 100,
        }
    }

    /// Load from a JSON file; a missing or malformed file yields defaults
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Config::new();
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read config, using defaults");
                return Config::new();
            }
        };

        match serde_json::from_str::<Config>(&content) {
            Ok(config) => config.normalized(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "malformed config, using defaults");
                Config::new()
            }
        }
    }

    /// The context window never drops below 15 turns and caps stay positive
    fn normalized(mut self) -> Self {
        self.context_window = self.context_window.max(15);
        self.history_cap = self.history_cap.max(1);
        self.trace_cap = self.trace_cap.max(1);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
