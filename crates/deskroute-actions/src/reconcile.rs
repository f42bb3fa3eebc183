//! Invoice reconciliation against GSTR-2A

use crate::base::{format_inr, title_case, ActionContext, ActionHandler};
use crate::error::ActionError;
use deskroute_core::{extract_parameters, ActionResult};
use serde::Serialize;
use std::fmt::Write;

const DEFAULT_PERIOD: &str = "current month";

#[derive(Debug, Clone, Serialize)]
struct Discrepancy {
    invoice_id: &'static str,
    our_amount: u64,
    gstr2a_amount: u64,
    difference: u64,
}

#[derive(Debug, Clone, Serialize)]
struct MissingInvoice {
    invoice_id: &'static str,
    vendor: &'static str,
    amount: u64,
}

#[derive(Debug, Clone, Serialize)]
struct Reconciliation {
    total_invoices: u32,
    matched: u32,
    mismatched: u32,
    missing_gstr2a: u32,
    amount_discrepancies: &'static [Discrepancy],
    missing_invoices: &'static [MissingInvoice],
}

impl Reconciliation {
    fn match_rate(&self) -> f64 {
        if self.total_invoices == 0 {
            return 0.0;
        }
        f64::from(self.matched) / f64::from(self.total_invoices) * 100.0
    }
}

const SAMPLE_RUN: Reconciliation = Reconciliation {
    total_invoices: 156,
    matched: 142,
    mismatched: 11,
    missing_gstr2a: 3,
    amount_discrepancies: &[
        Discrepancy {
            invoice_id: "INV-001",
            our_amount: 50_000,
            gstr2a_amount: 49_500,
            difference: 500,
        },
        Discrepancy {
            invoice_id: "INV-045",
            our_amount: 75_000,
            gstr2a_amount: 73_000,
            difference: 2_000,
        },
    ],
    missing_invoices: &[
        MissingInvoice {
            invoice_id: "INV-078",
            vendor: "TechCorp",
            amount: 120_000,
        },
        MissingInvoice {
            invoice_id: "INV-091",
            vendor: "DataSys",
            amount: 85_000,
        },
    ],
};

pub struct ReconcileInvoices;

impl ActionHandler for ReconcileInvoices {
    fn name(&self) -> &str {
        "reconcile_invoices"
    }

    fn description(&self) -> &str {
        "Match purchase invoices with GSTR-2A"
    }

    fn triggers(&self) -> &[&'static str] {
        &[
            "reconcile",
            "match invoices",
            "compare invoices",
            "reconcile invoices",
            "invoice reconciliation",
            "match with gstr",
        ]
    }

    fn execute(
        &self,
        query: &str,
        _role: &str,
        _ctx: &ActionContext<'_>,
    ) -> Result<ActionResult, ActionError> {
        let period = extract_parameters(query)
            .period
            .unwrap_or_else(|| DEFAULT_PERIOD.to_string());
        let run = &SAMPLE_RUN;
        let rate = run.match_rate();

        let mut text = String::from("🔄 **Invoice Reconciliation Complete**\n\n");
        let _ = writeln!(text, "**Period**: {}", title_case(&period));
        let _ = writeln!(text, "**Match Rate**: {:.1}%\n", rate);
        text.push_str("📊 **Summary**:\n");
        let _ = writeln!(text, "• Total Processed: {}", run.total_invoices);
        let _ = writeln!(text, "• ✅ Matched: {}", run.matched);
        let _ = writeln!(text, "• ⚠️ Mismatched: {}", run.mismatched);
        let _ = writeln!(text, "• ❌ Missing from GSTR-2A: {}\n", run.missing_gstr2a);

        if !run.amount_discrepancies.is_empty() {
            text.push_str("💰 **Amount Discrepancies**:\n");
            for d in run.amount_discrepancies {
                let _ = writeln!(
                    text,
                    "• {}: {} difference",
                    d.invoice_id,
                    format_inr(d.difference)
                );
            }
            text.push('\n');
        }

        if !run.missing_invoices.is_empty() {
            text.push_str("📋 **Missing Invoices**:\n");
            for m in run.missing_invoices {
                let _ = writeln!(
                    text,
                    "• {}: {} - {}",
                    m.invoice_id,
                    m.vendor,
                    format_inr(m.amount)
                );
            }
        }

        let mut actions = vec![
            format!(
                "Reconciled {} invoices for {}",
                run.total_invoices, period
            ),
            format!("Achieved {:.1}% match rate", rate),
        ];
        if run.mismatched > 0 {
            actions.push(format!(
                "Flagged {} mismatches for review",
                run.mismatched
            ));
        }

        let mut data = serde_json::to_value(run)?;
        data["period"] = serde_json::Value::String(period);
        data["match_rate"] = serde_json::json!((rate * 10.0).round() / 10.0);

        Ok(ActionResult::new(text, actions).with_data(data))
    }
}
