// ABOUTME: Reporting over the interaction log for supervisors
// ABOUTME: Exposes dashboard aggregation, summary formatters, export and backup import

pub mod dashboard;
pub mod error;
pub mod formatter;
pub mod transfer;

pub use dashboard::{
    parse_filter_date, DailyVolume, DashboardFilter, DashboardSummary, HourlyShare, ReasonCount,
    RECENT_ROWS, TOP_CRM_REASONS,
};
pub use error::{ReportError, Result};
pub use formatter::{formatter_for, JsonFormatter, ReportFormat, SummaryFormatter, TextFormatter};
pub use transfer::{export_bytes, export_csv, import_backup};
