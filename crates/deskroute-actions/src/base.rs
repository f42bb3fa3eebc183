//! Action handler trait and shared rendering helpers

use crate::error::ActionError;
use chrono::{DateTime, Local};
use deskroute_core::{ActionResult, TicketStore};

/// Everything a handler may touch besides the query itself
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    pub tickets: &'a TicketStore,
    pub now: DateTime<Local>,
}

impl<'a> ActionContext<'a> {
    pub fn new(tickets: &'a TicketStore, now: DateTime<Local>) -> Self {
        Self { tickets, now }
    }

    pub fn today(&self) -> String {
        self.now.format("%Y-%m-%d").to_string()
    }
}

/// A business action reachable from free text
pub trait ActionHandler: Send + Sync {
    /// Name used in the action configuration (unique identifier)
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Lowercase phrases that select this action
    fn triggers(&self) -> &[&'static str];

    /// Case-insensitive substring match against any trigger
    fn matches(&self, query: &str) -> bool {
        let lower = query.to_lowercase();
        self.triggers().iter().any(|t| lower.contains(t))
    }

    fn execute(
        &self,
        query: &str,
        role: &str,
        ctx: &ActionContext<'_>,
    ) -> Result<ActionResult, ActionError>;
}

/// Rupee amount with thousands separators: 120000 -> "₹120,000"
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("₹{}", out)
}

/// "last_month" -> "Last Month", "december 2024" -> "December 2024"
pub fn title_case(text: &str) -> String {
    text.replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl ActionHandler for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn triggers(&self) -> &[&'static str] {
            &["say hello"]
        }

        fn execute(
            &self,
            query: &str,
            _role: &str,
            _ctx: &ActionContext<'_>,
        ) -> Result<ActionResult, ActionError> {
            Ok(ActionResult::new(query, vec![]))
        }
    }

    #[test]
    fn test_handler_defaults() {
        let handler = Echo;
        assert_eq!(handler.description(), "");
        assert!(handler.matches("Please SAY HELLO to everyone"));
        assert!(!handler.matches("hello"));
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(0), "₹0");
        assert_eq!(format_inr(500), "₹500");
        assert_eq!(format_inr(50000), "₹50,000");
        assert_eq!(format_inr(1234567), "₹1,234,567");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("last_month"), "Last Month");
        assert_eq!(title_case("Q1 2024"), "Q1 2024");
        assert_eq!(title_case("current month"), "Current Month");
    }
}
