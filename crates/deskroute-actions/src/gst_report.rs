use crate::base::{title_case, ActionContext, ActionHandler};
use crate::error::ActionError;
use deskroute_core::{extract_parameters, ActionResult};
use serde::Serialize;

const DEFAULT_PERIOD: &str = "current month";
const RETENTION_DAYS: u32 = 30;

#[derive(Debug, Clone, Serialize)]
struct ReportMeta {
    report_id: String,
    period: String,
    file_size: &'static str,
    generated_at: String,
    file: String,
}

pub struct DownloadGstReport;

impl ActionHandler for DownloadGstReport {
    fn name(&self) -> &str {
        "download_gst_report"
    }

    fn description(&self) -> &str {
        "Generate a downloadable GST report for a period"
    }

    fn triggers(&self) -> &[&'static str] {
        &[
            "download report",
            "get report",
            "generate report",
            "export report",
            "gst report",
            "download gst",
            "create report",
        ]
    }

    fn execute(
        &self,
        query: &str,
        _role: &str,
        ctx: &ActionContext<'_>,
    ) -> Result<ActionResult, ActionError> {
        let period = extract_parameters(query)
            .period
            .unwrap_or_else(|| DEFAULT_PERIOD.to_string());

        let report_id = format!("RPT-{}", ctx.now.format("%Y%m%d%H%M"));
        let file = format!(
            "reports/gst_{}_{}.pdf",
            period.replace(' ', "_"),
            report_id
        );
        let meta = ReportMeta {
            report_id,
            period: period.clone(),
            file_size: "2.3 MB",
            generated_at: ctx.now.format("%Y-%m-%d %H:%M:%S").to_string(),
            file,
        };

        let text = format!(
            "📊 **GST Report Generated**\n\n\
             **Report ID**: {}\n\
             **Period**: {}\n\
             **File Size**: {}\n\
             **Generated**: {}\n\n\
             📁 File: `{}`\n\
             ⏰ Available for download for {} days",
            meta.report_id,
            title_case(&period),
            meta.file_size,
            meta.generated_at,
            meta.file,
            RETENTION_DAYS
        );

        let actions = vec![
            format!("Generated GST report for {}", period),
            format!("Created report {}", meta.report_id),
        ];

        Ok(ActionResult::new(text, actions).with_data(serde_json::to_value(&meta)?))
    }
}
