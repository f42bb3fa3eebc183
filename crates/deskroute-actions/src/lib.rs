//! Role-gated business actions matched by trigger phrases

pub mod base;
pub mod error;
pub mod filing_status;
pub mod filter_invoices;
pub mod gst_report;
pub mod period;
pub mod raise_ticket;
pub mod reconcile;
pub mod registry;

pub use base::{format_inr, title_case, ActionContext, ActionHandler};
pub use error::ActionError;
pub use filing_status::ViewFilingStatus;
pub use filter_invoices::FilterInvoices;
pub use gst_report::DownloadGstReport;
pub use period::MonthSpan;
pub use raise_ticket::RaiseTicket;
pub use reconcile::ReconcileInvoices;
pub use registry::ActionRegistry;
