//! Per-user conversation history and relevance scoring of prior turns

use crate::config::Config;
use crate::error::Result;
use crate::extract::extract_entities;
use crate::intent::classify_intent;
use crate::types::{Entities, Intent};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use deskroute_telemetry::{read_json, write_json};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;

const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const RECENT_TOPICS: usize = 3;
const TOPIC_CHARS: usize = 50;

/// Caller-supplied metadata stored with a turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnContext {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    pub actions_performed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// One routed exchange; never mutated once stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub timestamp: String,
    pub query: String,
    pub response: String,
    #[serde(default)]
    pub context: TurnContext,
    #[serde(default)]
    pub entities: Entities,
    #[serde(default)]
    pub intent: Intent,
    #[serde(default = "neutral_satisfaction")]
    pub satisfaction: f64,
}

fn neutral_satisfaction() -> f64 {
    0.5
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTurn {
    pub turn: ConversationTurn,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryMatch {
    pub turn: ConversationTurn,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContextSummary {
    pub total_turns: usize,
    pub most_common_intent: Option<Intent>,
    pub entities: Entities,
    pub average_satisfaction: Option<f64>,
    pub recent_topics: Vec<String>,
}

/// Guess how well a response served the user from its length and markers.
///
/// Starts neutral at 0.5. Long answers and success markers raise it, error
/// markers and very short answers lower it. Always within `[0, 1]`.
pub fn estimate_satisfaction(response: &str) -> f64 {
    let lower = response.to_lowercase();
    let len = response.chars().count();
    let mut score = 0.5;

    if len > 100 {
        score += 0.2;
    }
    if response.contains('✅') || response.contains('📊') {
        score += 0.1;
    }
    if response.contains("⚠️")
        || response.contains('❌')
        || ["error", "sorry", "didn't", "not sure"]
            .iter()
            .any(|m| lower.contains(m))
    {
        score -= 0.3;
    }
    if len < 20 {
        score -= 0.1;
    }

    f64::clamp(score, 0.0, 1.0)
}

fn parse_timestamp(ts: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(ts, LEGACY_TIMESTAMP_FORMAT).ok()?;
    Local.from_local_datetime(&naive).single()
}

fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

fn shares_entity(current: &Entities, turn: &Entities) -> bool {
    current.iter().any(|(kind, values)| {
        turn.get(kind).is_some_and(|theirs| {
            values
                .iter()
                .any(|v| theirs.iter().any(|t| t.eq_ignore_ascii_case(v)))
        })
    })
}

fn recency_bonus(timestamp: &str, now: DateTime<Local>, config: &Config) -> f64 {
    let Some(ts) = parse_timestamp(timestamp) else {
        return 0.0;
    };
    let age_hours = (now.signed_duration_since(ts).num_milliseconds() as f64 / 3_600_000.0).max(0.0);
    if config.recency_horizon_hours <= 0.0 || age_hours >= config.recency_horizon_hours {
        return 0.0;
    }
    config.weights.recency * (1.0 - age_hours / config.recency_horizon_hours)
}

/// Rank turns against `query`.
///
/// Only the last `context_window` turns are considered. Turns at or below
/// `relevance_threshold` are dropped, the rest sorted by descending score and
/// cut to `max_context_turns`. Equal scores keep the newer turn first.
pub fn score_turns(
    turns: &[ConversationTurn],
    query: &str,
    now: DateTime<Local>,
    config: &Config,
) -> Vec<ScoredTurn> {
    let intent = classify_intent(query);
    let entities = extract_entities(query);
    let query_words = word_set(query);
    let weights = &config.weights;

    let start = turns.len().saturating_sub(config.context_window);
    let mut scored: Vec<ScoredTurn> = turns[start..]
        .iter()
        .rev()
        .filter_map(|turn| {
            let mut score = 0.0;

            if turn.intent == intent {
                score += weights.intent;
            }
            if shares_entity(&entities, &turn.entities) {
                score += weights.entity;
            }
            if !query_words.is_empty() {
                let shared = word_set(&turn.query).intersection(&query_words).count();
                score += shared as f64 / query_words.len() as f64 * weights.keyword;
            }
            score += recency_bonus(&turn.timestamp, now, config);

            (score > config.relevance_threshold).then(|| ScoredTurn {
                turn: turn.clone(),
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(config.max_context_turns);
    scored
}

/// Bounded per-user turn lists persisted as one JSON object keyed by user id
#[derive(Debug, Clone)]
pub struct ConversationStore {
    path: PathBuf,
    cap: usize,
}

impl ConversationStore {
    pub fn new(path: impl Into<PathBuf>, cap: usize) -> Self {
        Self {
            path: path.into(),
            cap: cap.max(1),
        }
    }

    /// Whole history; unreadable files are logged and read as empty
    pub fn load(&self) -> BTreeMap<String, Vec<ConversationTurn>> {
        match read_json(&self.path) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read conversation history");
                BTreeMap::new()
            }
        }
    }

    fn turns(&self, user_id: &str) -> Vec<ConversationTurn> {
        self.load().remove(user_id).unwrap_or_default()
    }

    /// Derive a turn, append it and evict the oldest turns past the cap
    pub fn save_conversation(
        &self,
        user_id: &str,
        query: &str,
        response: &str,
        context: TurnContext,
        now: DateTime<Local>,
    ) -> Result<ConversationTurn> {
        let mut history: BTreeMap<String, Vec<ConversationTurn>> = read_json(&self.path)?;

        let turn = ConversationTurn {
            timestamp: now.to_rfc3339(),
            query: query.to_string(),
            response: response.to_string(),
            context,
            entities: extract_entities(query),
            intent: classify_intent(query),
            satisfaction: estimate_satisfaction(response),
        };

        let turns = history.entry(user_id.to_string()).or_default();
        turns.push(turn.clone());
        if turns.len() > self.cap {
            let excess = turns.len() - self.cap;
            turns.drain(..excess);
        }

        write_json(&self.path, &history)?;
        tracing::debug!(user = user_id, intent = %turn.intent, "conversation turn saved");
        Ok(turn)
    }

    /// The last `limit` turns, oldest first
    pub fn get_conversation_history(&self, user_id: &str, limit: usize) -> Vec<ConversationTurn> {
        let mut turns = self.turns(user_id);
        let start = turns.len().saturating_sub(limit);
        turns.split_off(start)
    }

    pub fn relevant_context(
        &self,
        user_id: &str,
        query: &str,
        now: DateTime<Local>,
        config: &Config,
    ) -> Vec<ScoredTurn> {
        score_turns(&self.turns(user_id), query, now, config)
    }

    pub fn get_context_summary(&self, user_id: &str) -> ContextSummary {
        let turns = self.turns(user_id);
        if turns.is_empty() {
            return ContextSummary::default();
        }

        let mut entities = Entities::new();
        for turn in &turns {
            for (kind, values) in &turn.entities {
                let merged = entities.entry(*kind).or_default();
                for v in values {
                    if !merged.iter().any(|m| m.eq_ignore_ascii_case(v)) {
                        merged.push(v.clone());
                    }
                }
            }
        }

        let start = turns.len().saturating_sub(RECENT_TOPICS);
        let recent_topics = turns[start..]
            .iter()
            .map(|t| t.query.chars().take(TOPIC_CHARS).collect())
            .collect();

        ContextSummary {
            total_turns: turns.len(),
            most_common_intent: most_common(&turns),
            entities,
            average_satisfaction: average(&turns),
            recent_topics,
        }
    }

    /// Score every turn by how many search words it contains; best first
    pub fn search_conversation_history(
        &self,
        user_id: &str,
        term: &str,
        limit: usize,
    ) -> Vec<HistoryMatch> {
        let words: Vec<String> = term.split_whitespace().map(str::to_lowercase).collect();
        if words.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<HistoryMatch> = self
            .turns(user_id)
            .into_iter()
            .rev()
            .filter_map(|turn| {
                let query = turn.query.to_lowercase();
                let response = turn.response.to_lowercase();
                let mut score = 0.0;
                for word in &words {
                    if query.contains(word.as_str()) {
                        score += 1.0;
                    }
                    if response.contains(word.as_str()) {
                        score += 0.5;
                    }
                    if turn
                        .entities
                        .values()
                        .flatten()
                        .any(|v| v.to_lowercase().contains(word.as_str()))
                    {
                        score += 0.8;
                    }
                }
                (score > 0.0).then_some(HistoryMatch { turn, score })
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(limit);
        matches
    }

    pub fn average_satisfaction(&self, user_id: &str) -> Option<f64> {
        average(&self.turns(user_id))
    }

    pub fn most_frequent_intent(&self, user_id: &str) -> Option<Intent> {
        most_common(&self.turns(user_id))
    }

    pub fn has_intent(&self, user_id: &str, intent: Intent) -> bool {
        self.turns(user_id).iter().any(|t| t.intent == intent)
    }
}

fn average(turns: &[ConversationTurn]) -> Option<f64> {
    if turns.is_empty() {
        return None;
    }
    Some(turns.iter().map(|t| t.satisfaction).sum::<f64>() / turns.len() as f64)
}

/// Most frequent intent; ties go to the one seen most recently
fn most_common(turns: &[ConversationTurn]) -> Option<Intent> {
    let mut counts: HashMap<Intent, (usize, usize)> = HashMap::new();
    for (i, turn) in turns.iter().enumerate() {
        let entry = counts.entry(turn.intent).or_insert((0, i));
        entry.0 += 1;
        entry.1 = i;
    }
    counts
        .into_iter()
        .max_by_key(|(_, stats)| *stats)
        .map(|(intent, _)| intent)
}
