//! Trace record types

use serde::{Deserialize, Serialize};

/// One routed query/response pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub timestamp: String,
    pub query: String,
    pub response: String,
    pub routed_to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_used: Option<bool>,
}

impl TraceEntry {
    /// Build an entry stamped with the current local time, truncating the response
    pub fn new(query: &str, response: &str, routed_to: &str, preview_chars: usize) -> Self {
        Self {
            timestamp: format_timestamp(chrono::Local::now()),
            query: query.to_string(),
            response: truncate_response(response, preview_chars),
            routed_to: routed_to.to_string(),
            confidence: None,
            complexity: None,
            context_used: None,
        }
    }

    /// Stamp the entry with an explicit clock instead of the current time
    pub fn with_timestamp(mut self, at: chrono::DateTime<chrono::Local>) -> Self {
        self.timestamp = format_timestamp(at);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_complexity(mut self, complexity: impl Into<String>) -> Self {
        self.complexity = Some(complexity.into());
        self
    }

    pub fn with_context_used(mut self, used: bool) -> Self {
        self.context_used = Some(used);
        self
    }
}

fn format_timestamp(at: chrono::DateTime<chrono::Local>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Keep the first `max_chars` characters, marking the cut with `...`
pub fn truncate_response(response: &str, max_chars: usize) -> String {
    if response.chars().count() <= max_chars {
        return response.to_string();
    }
    let head: String = response.chars().take(max_chars).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_long_response() {
        let long = "x".repeat(150);
        let truncated = truncate_response(&long, 100);
        assert_eq!(truncated.chars().count(), 103);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "₹".repeat(120);
        let truncated = truncate_response(&text, 100);
        assert!(truncated.starts_with(&"₹".repeat(100)));
    }

    #[test]
    fn test_short_response_untouched() {
        assert_eq!(truncate_response("ok", 100), "ok");
    }

    #[test]
    fn test_trace_entry_backwards_compatible() {
        let old_json = r#"{"timestamp":"2024-12-01 10:00:00","query":"q","response":"r","routed_to":"FAQ Module"}"#;
        let parsed: TraceEntry = serde_json::from_str(old_json).unwrap();
        assert_eq!(parsed.routed_to, "FAQ Module");
        assert_eq!(parsed.confidence, None);
        assert_eq!(parsed.context_used, None);
    }

    #[test]
    fn test_builder_metadata() {
        let entry = TraceEntry::new("q", "r", "Fallback", 100)
            .with_confidence(0.4)
            .with_complexity("simple")
            .with_context_used(false);
        assert_eq!(entry.confidence, Some(0.4));
        assert_eq!(entry.complexity.as_deref(), Some("simple"));
        assert_eq!(entry.context_used, Some(false));
    }

    #[test]
    fn test_explicit_timestamp() {
        use chrono::TimeZone;
        let at = chrono::Local.with_ymd_and_hms(2024, 12, 20, 14, 5, 9).unwrap();
        let entry = TraceEntry::new("q", "r", "Fallback", 100).with_timestamp(at);
        assert_eq!(entry.timestamp, "2024-12-20 14:05:09");
    }
}
