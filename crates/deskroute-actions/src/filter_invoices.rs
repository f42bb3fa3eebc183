//! Invoice filtering over the sample invoice set

use crate::base::{format_inr, ActionContext, ActionHandler};
use crate::error::ActionError;
use crate::period::{resolve_period, REFERENCE_MONTH};
use deskroute_core::{extract_parameters, ActionResult};
use serde::Serialize;
use std::fmt::Write;

const MAX_LISTED: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Invoice {
    pub invoice_id: &'static str,
    pub vendor: &'static str,
    pub status: &'static str,
    pub date: &'static str,
    pub amount: u64,
    pub error: Option<&'static str>,
}

pub const SAMPLE_INVOICES: &[Invoice] = &[
    Invoice {
        invoice_id: "INV-2024-001",
        vendor: "IndiSky",
        status: "failed",
        date: "2024-12-01",
        amount: 50_000,
        error: Some("Missing GSTIN"),
    },
    Invoice {
        invoice_id: "INV-2024-002",
        vendor: "IndiSky",
        status: "failed",
        date: "2024-12-05",
        amount: 75_000,
        error: Some("Invalid HSN code"),
    },
    Invoice {
        invoice_id: "INV-2024-003",
        vendor: "TechCorp",
        status: "pending",
        date: "2024-12-10",
        amount: 120_000,
        error: None,
    },
    Invoice {
        invoice_id: "INV-2024-004",
        vendor: "DataFlow",
        status: "reconciled",
        date: "2024-12-15",
        amount: 95_000,
        error: None,
    },
    Invoice {
        invoice_id: "INV-2024-005",
        vendor: "IndiSky",
        status: "failed",
        date: "2024-12-20",
        amount: 60_000,
        error: Some("Amount mismatch"),
    },
];

fn status_marker(status: &str) -> &'static str {
    match status {
        "failed" => "❌",
        "pending" => "⏳",
        _ => "✅",
    }
}

pub struct FilterInvoices;

impl ActionHandler for FilterInvoices {
    fn name(&self) -> &str {
        "filter_invoices"
    }

    fn description(&self) -> &str {
        "Filter invoices by vendor, status and period"
    }

    fn triggers(&self) -> &[&'static str] {
        &[
            "filter invoices",
            "show invoices",
            "find invoices",
            "search invoices",
            "list invoices",
            "invoices for",
            "get invoices",
        ]
    }

    fn execute(
        &self,
        query: &str,
        _role: &str,
        _ctx: &ActionContext<'_>,
    ) -> Result<ActionResult, ActionError> {
        let params = extract_parameters(query);
        let mut invoices: Vec<&Invoice> = SAMPLE_INVOICES.iter().collect();
        let mut applied = Vec::new();

        if let Some(vendor) = &params.vendor {
            let needle = vendor.to_lowercase();
            invoices.retain(|inv| inv.vendor.to_lowercase().contains(&needle));
            applied.push(format!("vendor: {}", vendor));
        }

        if let Some(status) = &params.status {
            invoices.retain(|inv| inv.status == status.as_str());
            applied.push(format!("status: {}", status));
        }

        if let Some(period) = &params.period {
            match resolve_period(period, REFERENCE_MONTH) {
                Some(span) => {
                    invoices.retain(|inv| span.contains(inv.date));
                    applied.push(format!("period: {}", period.replace('_', " ")));
                }
                None => tracing::debug!(period = %period, "period not resolvable, ignoring"),
            }
        }

        let total_amount: u64 = invoices.iter().map(|inv| inv.amount).sum();
        let failed_count = invoices.iter().filter(|inv| inv.status == "failed").count();
        let filter_text = if applied.is_empty() {
            "all criteria".to_string()
        } else {
            applied.join(", ")
        };

        let mut text = String::from("📊 **Invoice Filter Results**\n\n");
        let _ = writeln!(text, "**Filters Applied**: {}", filter_text);
        let _ = writeln!(text, "**Found**: {} invoices", invoices.len());
        let _ = writeln!(text, "**Total Amount**: {}", format_inr(total_amount));
        if failed_count > 0 {
            let _ = writeln!(text, "**⚠️ Failed**: {} invoices need attention", failed_count);
        }
        text.push_str("\n**Results:**\n");

        for inv in invoices.iter().take(MAX_LISTED) {
            let _ = write!(
                text,
                "{} **{}**: {} - {} ({})",
                status_marker(inv.status),
                inv.invoice_id,
                inv.vendor,
                format_inr(inv.amount),
                inv.status
            );
            if let Some(err) = inv.error {
                let _ = write!(text, " - *{}*", err);
            }
            text.push('\n');
        }
        if invoices.len() > MAX_LISTED {
            let _ = write!(
                text,
                "\n... and {} more invoices",
                invoices.len() - MAX_LISTED
            );
        }

        let mut actions = vec![format!(
            "Filtered {} invoices by {}",
            invoices.len(),
            filter_text
        )];
        if failed_count > 0 {
            actions.push(format!(
                "Identified {} failed invoices requiring attention",
                failed_count
            ));
        }

        let data = serde_json::json!({
            "total_found": invoices.len(),
            "total_amount": total_amount,
            "failed_count": failed_count,
            "filters_applied": serde_json::to_value(&params)?,
            "invoices": invoices,
        });

        let confidence = if invoices.is_empty() { 0.6 } else { 0.9 };
        Ok(ActionResult::new(text, actions)
            .with_data(data)
            .with_confidence(confidence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use deskroute_core::TicketStore;

    fn run(query: &str) -> Result<ActionResult, ActionError> {
        let tickets = TicketStore::new("/nonexistent/tickets.json");
        let ctx = ActionContext::new(&tickets, Local::now());
        FilterInvoices.execute(query, "Manager", &ctx)
    }

    #[test]
    fn test_vendor_and_last_month() {
        let result = run("Filter invoices from IndiSky last month").unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["total_found"], 3);
        assert_eq!(data["total_amount"], 185_000);
        assert_eq!(data["failed_count"], 3);
        assert_eq!(data["filters_applied"]["vendor"], "IndiSky");
        assert_eq!(data["filters_applied"]["period"], "last_month");
        assert!(result.text.contains("₹185,000"));
        assert!(result.text.contains("vendor: IndiSky, period: last month"));
    }

    #[test]
    fn test_status_filter() {
        let result = run("show invoices pending").unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["total_found"], 1);
        assert_eq!(data["invoices"][0]["invoice_id"], "INV-2024-003");
        assert_eq!(result.actions.len(), 1);
    }

    #[test]
    fn test_no_filters_lists_everything() {
        let result = run("list invoices").unwrap();
        assert!(result.text.contains("all criteria"));
        assert_eq!(result.data.unwrap()["total_found"], 5);
        assert_eq!(result.confidence, Some(0.9));
    }

    #[test]
    fn test_period_outside_fixture() {
        let result = run("show invoices for Q1 2024").unwrap();
        assert_eq!(result.data.unwrap()["total_found"], 0);
        assert_eq!(result.confidence, Some(0.6));
    }

    #[test]
    fn test_unknown_status_matches_nothing() {
        let result = run("filter invoices status=paid").unwrap();
        assert_eq!(result.data.unwrap()["total_found"], 0);
        assert_eq!(result.confidence, Some(0.6));
        assert!(result.text.contains("status: paid"));
    }
}
