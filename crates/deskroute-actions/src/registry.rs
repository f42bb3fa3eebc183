//! Ordered action registry and role-gated dispatch

use crate::base::{ActionContext, ActionHandler};
use crate::filing_status::ViewFilingStatus;
use crate::filter_invoices::FilterInvoices;
use crate::gst_report::DownloadGstReport;
use crate::raise_ticket::RaiseTicket;
use crate::reconcile::ReconcileInvoices;
use deskroute_core::{allowed_actions, ActionConfig, ActionResult};

/// Handlers in declaration order; the first permitted match wins
pub struct ActionRegistry {
    handlers: Vec<Box<dyn ActionHandler>>,
}

impl ActionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// The five built-in actions
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(FilterInvoices));
        registry.register(Box::new(DownloadGstReport));
        registry.register(Box::new(ViewFilingStatus));
        registry.register(Box::new(ReconcileInvoices));
        registry.register(Box::new(RaiseTicket));
        registry
    }

    pub fn register(&mut self, handler: Box<dyn ActionHandler>) {
        self.handlers.push(handler);
    }

    pub fn names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Run the first handler that is permitted for `role` and triggered by
    /// `query`. Handler failures come back as an error result naming the
    /// action; `None` means nothing matched.
    pub fn dispatch(
        &self,
        query: &str,
        role: &str,
        config: &[ActionConfig],
        ctx: &ActionContext<'_>,
    ) -> Option<ActionResult> {
        let permitted: Vec<&str> = allowed_actions(role, config)
            .into_iter()
            .map(|a| a.name.as_str())
            .collect();

        let handler = self
            .handlers
            .iter()
            .filter(|h| permitted.contains(&h.name()))
            .find(|h| h.matches(query))?;
        let name = handler.name();

        match handler.execute(query, role, ctx) {
            Ok(mut result) => {
                tracing::info!(action = name, role, "action executed");
                result.execution_time = Some(ctx.now.format("%H:%M:%S").to_string());
                result.executed_by = Some(role.to_string());
                Some(result)
            }
            Err(e) => {
                tracing::warn!(action = name, role, error = %e, "action failed");
                Some(ActionResult {
                    text: format!("⚠️ Error executing {}: {}", name, e),
                    actions: vec![format!("Error in {}", name)],
                    error: true,
                    ..Default::default()
                })
            }
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActionError;
    use chrono::Local;
    use deskroute_core::{defaults, TicketStore};

    struct Failing;

    impl ActionHandler for Failing {
        fn name(&self) -> &str {
            "filter_invoices"
        }

        fn triggers(&self) -> &[&'static str] {
            &["boom"]
        }

        fn execute(
            &self,
            _query: &str,
            _role: &str,
            _ctx: &ActionContext<'_>,
        ) -> Result<ActionResult, ActionError> {
            Err(ActionError::InvalidParameter("exploded".to_string()))
        }
    }

    #[test]
    fn test_default_order() {
        let registry = ActionRegistry::with_defaults();
        assert_eq!(
            registry.names(),
            vec![
                "filter_invoices",
                "download_gst_report",
                "view_filing_status",
                "reconcile_invoices",
                "raise_ticket"
            ]
        );
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_empty_registry_matches_nothing() {
        let registry = ActionRegistry::new();
        assert!(registry.is_empty());
        let tickets = TicketStore::new("/nonexistent/tickets.json");
        let ctx = ActionContext::new(&tickets, Local::now());
        assert!(registry
            .dispatch("filter invoices", "Admin", &defaults::action_config(), &ctx)
            .is_none());
    }

    #[test]
    fn test_failure_becomes_error_result() {
        let mut registry = ActionRegistry::new();
        registry.register(Box::new(Failing));
        let tickets = TicketStore::new("/nonexistent/tickets.json");
        let ctx = ActionContext::new(&tickets, Local::now());

        let result = registry
            .dispatch("boom", "Admin", &defaults::action_config(), &ctx)
            .unwrap();
        assert!(result.error);
        assert_eq!(
            result.text,
            "⚠️ Error executing filter_invoices: invalid parameter: exploded"
        );
        assert_eq!(result.actions, vec!["Error in filter_invoices"]);
        assert!(result.executed_by.is_none());
    }
}
