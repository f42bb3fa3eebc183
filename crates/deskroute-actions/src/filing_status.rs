use crate::base::{format_inr, title_case, ActionContext, ActionHandler};
use crate::error::ActionError;
use deskroute_core::{extract_parameters, ActionResult};
use serde::Serialize;

const DEFAULT_PERIOD: &str = "current month";

#[derive(Debug, Clone, Serialize)]
struct FilingStatus {
    period: String,
    status: &'static str,
    due_date: &'static str,
    filed_date: &'static str,
    liability_amount: u64,
    itc_claimed: u64,
}

impl FilingStatus {
    /// Last month's return went in late; every other period is on time
    fn for_period(period: &str) -> Self {
        let delayed = period == "last_month";
        Self {
            period: period.to_string(),
            status: if delayed {
                "Filed with delay"
            } else {
                "Filed on time"
            },
            due_date: "20th of month",
            filed_date: if delayed {
                "22nd of month"
            } else {
                "18th of month"
            },
            liability_amount: 125_000,
            itc_claimed: 45_000,
        }
    }

    fn delayed(&self) -> bool {
        self.status.contains("delay")
    }
}

pub struct ViewFilingStatus;

impl ActionHandler for ViewFilingStatus {
    fn name(&self) -> &str {
        "view_filing_status"
    }

    fn description(&self) -> &str {
        "Show GST return filing status for a period"
    }

    fn triggers(&self) -> &[&'static str] {
        &[
            "filing status",
            "check status",
            "gst status",
            "show status",
            "filing for",
            "check filing",
            "status of filing",
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
        let status = FilingStatus::for_period(&period);

        let text = format!(
            "📝 **GST Filing Status**\n\n\
             **Period**: {}\n\
             **Status**: {} {}\n\
             **Due Date**: {}\n\
             **Filed Date**: {}\n\
             **Tax Liability**: {}\n\
             **ITC Claimed**: {}",
            title_case(&period),
            status.status,
            if status.delayed() { "⚠️" } else { "✅" },
            status.due_date,
            status.filed_date,
            format_inr(status.liability_amount),
            format_inr(status.itc_claimed)
        );

        let actions = vec![format!("Checked filing status for {}", period)];
        Ok(ActionResult::new(text, actions).with_data(serde_json::to_value(&status)?))
    }
}
