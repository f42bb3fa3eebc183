//! Best-match email lookup over the email fixture

use crate::extract::extract_entities;
use crate::fixtures::Email;
use crate::intent::classify_intent;
use crate::types::Intent;
use std::collections::HashSet;

const EMAIL_KEYWORDS: &[&str] = &[
    "email",
    "mail",
    "inbox",
    "notification",
    "alert",
    "reminder",
    "status update",
];

static STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "any", "about", "from", "have", "has", "was", "are", "you",
    "your", "did", "get", "got", "show", "what", "there", "this", "that", "all", "can",
];

const TERM_WEIGHT: f64 = 1.0;
const ENTITY_WEIGHT: f64 = 2.0;
const CATEGORY_WEIGHT: f64 = 1.0;
const INTENT_WEIGHT: f64 = 0.5;

/// True when the query asks about emails, notifications, alerts or reminders
pub fn mentions_email(query: &str) -> bool {
    let lower = query.to_lowercase();
    EMAIL_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailMatch<'a> {
    pub email: &'a Email,
    pub score: f64,
}

impl EmailMatch<'_> {
    pub fn render(&self) -> String {
        format!(
            "📧 **{}**\n\n{}\n\nSent on: {}",
            self.email.subject, self.email.body, self.email.date
        )
    }
}

fn query_terms(query: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|w| w.len() >= 3 && !STOP_WORDS.contains(w))
        .filter(|w| seen.insert(w.to_string()))
        .map(str::to_string)
        .collect()
}

/// Email categories that answer a given intent
fn category_serves(category: &str, intent: Intent) -> bool {
    matches!(
        (category, intent),
        ("filing", Intent::StatusInquiry)
            | ("filing", Intent::Explanation)
            | ("reminder", Intent::StatusInquiry)
            | ("support", Intent::StatusInquiry)
            | ("reconciliation", Intent::DataRetrieval)
            | ("reconciliation", Intent::ReportGeneration)
            | ("invoice", Intent::DataRetrieval)
    )
}

/// Score every email; return the best one scoring strictly above `threshold`.
/// Earlier emails win ties.
pub fn best_email<'a>(query: &str, emails: &'a [Email], threshold: f64) -> Option<EmailMatch<'a>> {
    let lower = query.to_lowercase();
    let terms = query_terms(query);
    let entities = extract_entities(query);
    let intent = classify_intent(query);

    let mut best: Option<EmailMatch<'a>> = None;

    for email in emails {
        let text = format!("{} {}", email.subject, email.body).to_lowercase();
        let category = email.category.to_lowercase();

        let mut score = terms
            .iter()
            .filter(|t| text.contains(t.as_str()))
            .count() as f64
            * TERM_WEIGHT;

        for value in entities.values().flatten() {
            if text.contains(&value.to_lowercase()) {
                score += ENTITY_WEIGHT;
            }
        }

        if !category.is_empty() && lower.contains(&category) {
            score += CATEGORY_WEIGHT;
        }

        if category_serves(&category, intent) {
            score += INTENT_WEIGHT;
        }

        if best.as_ref().is_none_or(|b| score > b.score) {
            best = Some(EmailMatch { email, score });
        }
    }

    best.filter(|m| m.score > threshold)
}
