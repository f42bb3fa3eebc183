//! Keyword-bucket intent classification and query complexity

use crate::extract::extract_entities;
use crate::types::{Complexity, Intent};

struct IntentKeywords {
    intent: Intent,
    keywords: &'static [&'static str],
}

/// Buckets in priority order; the first bucket with a hit wins
const INTENT_KEYWORD_MAP: &[IntentKeywords] = &[
    IntentKeywords {
        intent: Intent::DataRetrieval,
        keywords: &[
            "show", "find", "get", "list", "filter", "search", "fetch", "display", "view",
        ],
    },
    IntentKeywords {
        intent: Intent::ReportGeneration,
        keywords: &["report", "generate", "download", "export", "summary", "summarize"],
    },
    IntentKeywords {
        intent: Intent::Creation,
        keywords: &["create", "raise", "new", "add", "submit", "open a", "log a"],
    },
    IntentKeywords {
        intent: Intent::Explanation,
        keywords: &[
            "why", "how", "explain", "what is", "what does", "meaning", "reason", "understand",
        ],
    },
    IntentKeywords {
        intent: Intent::StatusInquiry,
        keywords: &["status", "track", "progress", "pending", "check", "update on"],
    },
];

/// Lowercased words joined by single spaces and padded, so keywords match
/// whole words only ("show" never fires on "showcase")
fn normalize(query: &str) -> String {
    let words: Vec<String> = query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '-' && c != '_')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();
    format!(" {} ", words.join(" "))
}

fn contains_keyword(normalized: &str, keyword: &str) -> bool {
    normalized.contains(&format!(" {} ", keyword))
}

/// Classify a query by the first keyword bucket it hits
pub fn classify_intent(query: &str) -> Intent {
    let normalized = normalize(query);
    INTENT_KEYWORD_MAP
        .iter()
        .find(|entry| {
            entry
                .keywords
                .iter()
                .any(|kw| contains_keyword(&normalized, kw))
        })
        .map(|entry| entry.intent)
        .unwrap_or(Intent::General)
}

/// Word count sets the base level; two or more entity categories bump it once
pub fn estimate_complexity(query: &str) -> Complexity {
    let words = query.split_whitespace().count();
    let base = if words <= 5 {
        Complexity::Simple
    } else if words <= 12 {
        Complexity::Moderate
    } else {
        Complexity::Complex
    };

    if extract_entities(query).len() >= 2 {
        base.bump()
    } else {
        base
    }
}
