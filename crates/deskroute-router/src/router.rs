//! Fixed-priority query router

use crate::app::AppContext;
use crate::response::{RouteModule, RouteResponse};
use chrono::{DateTime, Local};
use deskroute_actions::ActionContext;
use deskroute_core::{
    best_email, estimate_complexity, extract_parameters, is_interrogative, match_faq,
    mentions_email, Intent, Priority, TicketStatus, TurnContext,
};
use deskroute_telemetry::{truncate_response, TraceEntry};
use serde_json::json;

const FAQ_CONFIDENCE: f64 = 0.95;
const EMAIL_CONFIDENCE: f64 = 0.85;
const TICKET_CONFIDENCE: f64 = 0.9;
const TICKET_MISS_CONFIDENCE: f64 = 0.6;
const ACTION_CONFIDENCE: f64 = 0.8;
const ACTION_ERROR_CONFIDENCE: f64 = 0.4;
const CONTEXT_CONFIDENCE: f64 = 0.7;
const FALLBACK_CONFIDENCE: f64 = 0.4;
const ERROR_CONFIDENCE: f64 = 0.1;

const QUOTE_CHARS: usize = 100;

const FOLLOW_UP_CUES: &[&str] = &["why", "how", "more details", "explain", "what about", "also"];

const FALLBACK_MESSAGES: &[&str] = &[
    "🤔 I didn't quite get that. Could you rephrase?",
    "I'm not sure what you mean. Try asking about invoices, filings, or tickets.",
    "Sorry, I didn't understand. Do you want me to filter invoices, raise a ticket, or explain something?",
];

const ERROR_MESSAGE: &str =
    "⚠️ Sorry, something went wrong while handling your request. Please try again.";

const FAQ_CONTEXT_NOTE: &str =
    "💡 You've asked for explanations before; say \"explain more\" to dig into any of them.";

/// Lowercased words padded with spaces so cues match whole words only
fn padded_words(text: &str) -> String {
    let words: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();
    format!(" {} ", words.join(" "))
}

fn has_cue(padded: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| padded.contains(&format!(" {} ", cue)))
}

fn suggestions_for(intent: Option<Intent>) -> Vec<String> {
    let templates: &[&str] = match intent {
        Some(Intent::DataRetrieval) => &[
            "Filter invoices from IndiSky last month",
            "Show invoices pending",
            "Find invoices for Q4 2024",
        ],
        Some(Intent::ReportGeneration) => &[
            "Download GST report for Q1 2024",
            "Generate report for last quarter",
        ],
        Some(Intent::Creation) => &[
            "Raise ticket for invoice mismatch",
            "Create ticket for GSTR-1 upload failure",
        ],
        Some(Intent::Explanation) => &[
            "Why did my GST filing fail?",
            "What is ITC?",
            "How do I reconcile invoices?",
        ],
        Some(Intent::StatusInquiry) => &[
            "Track ticket TCK-101",
            "Check filing status for last month",
        ],
        Some(Intent::General) | None => &[
            "Filter invoices from IndiSky last month",
            "Raise ticket for invoice mismatch",
            "Why did my GST filing fail?",
        ],
    };
    templates.iter().map(|s| s.to_string()).collect()
}

/// Routes each query through FAQ, email, ticket, action, context follow-up
/// and fallback handling, stopping at the first that answers
#[derive(Debug, Default)]
pub struct Router;

impl Router {
    pub fn new() -> Self {
        Self
    }

    /// Route a query and record it. Always answers: internal failures become
    /// a low-confidence "Error Handler" response.
    pub fn route_query(
        &self,
        app: &mut AppContext,
        query: &str,
        role: &str,
        user_id: Option<&str>,
    ) -> (RouteResponse, RouteModule) {
        self.route_query_at(app, query, role, user_id, Local::now())
    }

    /// Like [`Router::route_query`] with an explicit clock
    pub fn route_query_at(
        &self,
        app: &mut AppContext,
        query: &str,
        role: &str,
        user_id: Option<&str>,
        now: DateTime<Local>,
    ) -> (RouteResponse, RouteModule) {
        let (response, module) = match self.decide(app, query, role, user_id, now) {
            Ok(routed) => routed,
            Err(e) => {
                tracing::warn!(error = %e, query, "routing failed");
                let response = RouteResponse {
                    text: ERROR_MESSAGE.to_string(),
                    actions: vec!["Error handled".to_string()],
                    confidence: ERROR_CONFIDENCE,
                    error: true,
                    ..Default::default()
                };
                (response, RouteModule::ErrorHandler)
            }
        };

        tracing::debug!(module = module.label(), confidence = response.confidence, "query routed");
        self.record(app, query, role, user_id, &response, module, now);
        (response, module)
    }

    fn decide(
        &self,
        app: &AppContext,
        query: &str,
        role: &str,
        user_id: Option<&str>,
        now: DateTime<Local>,
    ) -> anyhow::Result<(RouteResponse, RouteModule)> {
        let lower = query.to_lowercase();
        let padded = padded_words(query);

        // 1. FAQ
        if is_interrogative(query) {
            if let Some(faq) = match_faq(query, &app.faqs) {
                let mut response = RouteResponse::answer(faq.answer.clone(), FAQ_CONFIDENCE);
                response.actions = vec![format!("Answered FAQ: {}", faq.question)];
                if let Some(user) = user_id {
                    if app.conversations.has_intent(user, Intent::Explanation) {
                        response.text.push_str("\n\n");
                        response.text.push_str(FAQ_CONTEXT_NOTE);
                        response.context_used = true;
                    }
                }
                return Ok((response, RouteModule::Faq));
            }
        }

        // 2. Email
        if mentions_email(query) {
            if let Some(found) = best_email(query, &app.emails, app.config.email_match_threshold) {
                let mut response = RouteResponse::answer(found.render(), EMAIL_CONFIDENCE);
                response.actions = vec![format!("Found email: {}", found.email.subject)];
                response.data = Some(json!({
                    "subject": found.email.subject,
                    "date": found.email.date,
                    "category": found.email.category,
                    "score": found.score,
                }));
                return Ok((response, RouteModule::Email));
            }
        }

        // 3. Tickets
        if lower.contains("ticket") || lower.contains("support") {
            if lower.contains("create") || lower.contains("raise") {
                return self.create_ticket(app, query, user_id, now);
            }
            if lower.contains("status") || lower.contains("track") {
                return Ok(Self::track_ticket(app, query));
            }
        }

        // 4. Actions
        let ctx = ActionContext::new(&app.tickets, now);
        if let Some(result) = app.actions.dispatch(query, role, &app.action_config, &ctx) {
            let fallback = if result.error {
                ACTION_ERROR_CONFIDENCE
            } else {
                ACTION_CONFIDENCE
            };
            let response = RouteResponse {
                confidence: result.confidence.unwrap_or(fallback),
                text: result.text,
                actions: result.actions,
                data: result.data,
                error: result.error,
                execution_time: result.execution_time,
                executed_by: result.executed_by,
                ..Default::default()
            };
            return Ok((response, RouteModule::Actions));
        }

        // 5. Context follow-up
        if let Some(user) = user_id {
            if has_cue(&padded, FOLLOW_UP_CUES) {
                let relevant = app
                    .conversations
                    .relevant_context(user, query, now, &app.config);
                if let Some(top) = relevant.first() {
                    let text = format!(
                        "I see we've discussed this before. Based on our previous conversation:\n\n\
                         Previously you asked: '{}'\n\
                         And I responded: '{}'",
                        top.turn.query,
                        truncate_response(&top.turn.response, QUOTE_CHARS)
                    );
                    let response = RouteResponse {
                        text,
                        actions: vec!["Used conversation context".to_string()],
                        data: Some(json!({
                            "relevance": top.score,
                            "previous_timestamp": top.turn.timestamp,
                            "related_turns": relevant.len(),
                        })),
                        confidence: CONTEXT_CONFIDENCE,
                        context_aware: true,
                        context_used: true,
                        ..Default::default()
                    };
                    return Ok((response, RouteModule::Context));
                }
            }
        }

        // 6. Fallback
        let frequent = user_id.and_then(|u| app.conversations.most_frequent_intent(u));
        let message = FALLBACK_MESSAGES[query.chars().count() % FALLBACK_MESSAGES.len()];
        let response = RouteResponse {
            text: message.to_string(),
            confidence: FALLBACK_CONFIDENCE,
            context_aware: true,
            suggestions: suggestions_for(frequent),
            ..Default::default()
        };
        Ok((response, RouteModule::Fallback))
    }

    fn create_ticket(
        &self,
        app: &AppContext,
        query: &str,
        user_id: Option<&str>,
        now: DateTime<Local>,
    ) -> anyhow::Result<(RouteResponse, RouteModule)> {
        let mut priority = extract_parameters(query).priority;
        let unhappy = user_id
            .and_then(|u| app.conversations.average_satisfaction(u))
            .is_some_and(|avg| avg < app.config.low_satisfaction_threshold);
        if unhappy {
            priority = Priority::High;
        }

        let today = now.format("%Y-%m-%d").to_string();
        let ticket = app.tickets.create_ticket(query, priority, &today)?;

        let mut response = RouteResponse::answer(
            format!("✅ Ticket {} created for: {}", ticket.ticket_id, query),
            TICKET_CONFIDENCE,
        );
        response.actions = vec![format!("Created ticket {}", ticket.ticket_id)];
        response.data = Some(json!({
            "ticket_id": ticket.ticket_id,
            "priority": ticket.priority,
            "status": ticket.status,
            "escalated": unhappy,
        }));
        Ok((response, RouteModule::TicketCreate))
    }

    fn track_ticket(app: &AppContext, query: &str) -> (RouteResponse, RouteModule) {
        let mut response = match app.tickets.track_ticket(query) {
            Some(ticket) => {
                let mut response = RouteResponse::answer(
                    format!(
                        "🎫 Ticket {} is {} (Priority: {}).",
                        ticket.ticket_id, ticket.status, ticket.priority
                    ),
                    TICKET_CONFIDENCE,
                );
                response.data = Some(json!({
                    "ticket_id": ticket.ticket_id,
                    "status": ticket.status,
                    "priority": ticket.priority,
                    "closed": ticket.status == TicketStatus::Closed,
                }));
                response
            }
            None => RouteResponse::answer("No matching ticket found.", TICKET_MISS_CONFIDENCE),
        };
        response.actions = vec!["Checked ticket status".to_string()];
        (response, RouteModule::TicketTrack)
    }

    /// Write the trace entry and conversation turn; failures are logged only
    #[allow(clippy::too_many_arguments)]
    fn record(
        &self,
        app: &mut AppContext,
        query: &str,
        role: &str,
        user_id: Option<&str>,
        response: &RouteResponse,
        module: RouteModule,
        now: DateTime<Local>,
    ) {
        let entry = TraceEntry::new(
            query,
            &response.text,
            module.label(),
            app.config.response_preview_chars,
        )
        .with_timestamp(now)
        .with_confidence(response.confidence)
        .with_complexity(estimate_complexity(query).as_str())
        .with_context_used(response.context_used);
        app.traces.log_trace(entry);

        let Some(user) = user_id else {
            return;
        };
        let context = TurnContext {
            role: role.to_string(),
            trace_id: Some(format!("TRC-{}", now.format("%Y%m%d%H%M%S%3f"))),
            actions_performed: response.actions.clone(),
            confidence: Some(response.confidence),
        };
        if let Err(e) = app
            .conversations
            .save_conversation(user, query, &response.text, context, now)
        {
            tracing::warn!(user, error = %e, "failed to save conversation turn");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cues_match_whole_words() {
        let padded = padded_words("Show me invoices");
        assert!(!has_cue(&padded, FOLLOW_UP_CUES));
        let padded = padded_words("and how about that?");
        assert!(has_cue(&padded, FOLLOW_UP_CUES));
        assert!(has_cue(&padded_words("can you give more details"), FOLLOW_UP_CUES));
    }

    #[test]
    fn test_every_suggestion_is_answerable() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = deskroute_telemetry::Paths::with_root(temp.path());
        crate::install_fixtures(&paths).unwrap();
        let mut app = AppContext::open(paths);
        let router = Router::new();

        let intents = [
            None,
            Some(Intent::DataRetrieval),
            Some(Intent::ReportGeneration),
            Some(Intent::Creation),
            Some(Intent::Explanation),
            Some(Intent::StatusInquiry),
            Some(Intent::General),
        ];
        for intent in intents {
            for suggestion in suggestions_for(intent) {
                let (_, module) = router.route_query(&mut app, &suggestion, "Admin", None);
                assert_ne!(module, RouteModule::Fallback, "{} fell through", suggestion);
            }
        }
    }

    #[test]
    fn test_suggestions_follow_intent() {
        assert!(suggestions_for(Some(Intent::Explanation))[0].starts_with("Why"));
        assert_eq!(suggestions_for(None).len(), 3);
    }
}
