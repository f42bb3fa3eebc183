use crate::base::{title_case, ActionContext, ActionHandler};
use crate::error::ActionError;
use deskroute_core::{extract_parameters, ActionResult};

pub struct RaiseTicket;

impl ActionHandler for RaiseTicket {
    fn name(&self) -> &str {
        "raise_ticket"
    }

    fn description(&self) -> &str {
        "Open a support ticket"
    }

    fn triggers(&self) -> &[&'static str] {
        &[
            "raise ticket",
            "create ticket",
            "new ticket",
            "open ticket",
            "support ticket",
            "help ticket",
            "ticket for",
        ]
    }

    fn execute(
        &self,
        query: &str,
        _role: &str,
        ctx: &ActionContext<'_>,
    ) -> Result<ActionResult, ActionError> {
        let priority = extract_parameters(query).priority;
        let ticket = ctx.tickets.create_ticket(query, priority, &ctx.today())?;

        let text = format!(
            "✅ **Support Ticket Created**\n\n\
             **Ticket ID**: {}\n\
             **Priority**: {}\n\
             **Issue**: {}\n\
             **Assigned**: {}\n\
             **Status**: Open\n\n\
             🔔 You'll receive updates via email and can track progress in the tickets section.",
            ticket.ticket_id,
            title_case(priority.as_str()),
            ticket.summary,
            ticket.assigned_to
        );

        let actions = vec![format!(
            "Created ticket {} with {} priority",
            ticket.ticket_id, priority
        )];
        let data = serde_json::json!({
            "ticket_id": ticket.ticket_id,
            "priority": priority,
            "status": ticket.status,
        });

        Ok(ActionResult::new(text, actions)
            .with_data(data)
            .with_confidence(0.9))
    }
}
