// ABOUTME: Formatters presenting a dashboard summary as plain text or JSON
// ABOUTME: Selected by the report command's output format flag

use serde::{Deserialize, Serialize};

use super::dashboard::DashboardSummary;
use super::error::Result;
use crate::template::Sector;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

pub trait SummaryFormatter: Send + Sync {
    fn format(&self, summary: &DashboardSummary) -> Result<String>;
}

pub struct TextFormatter;

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn new_pretty() -> Self {
        Self { pretty: true }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryFormatter for JsonFormatter {
    fn format(&self, summary: &DashboardSummary) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(summary)?
        } else {
            serde_json::to_string(summary)?
        };
        Ok(json)
    }
}

impl SummaryFormatter for TextFormatter {
    fn format(&self, summary: &DashboardSummary) -> Result<String> {
        let mut out = String::new();

        if summary.is_empty() {
            out.push_str("No interactions found.\n");
            return Ok(out);
        }

        out.push_str(&format!(
            "Total: {}  SAC: {}  Pendências: {}\n",
            summary.total,
            summary.sector_total(Sector::Sac),
            summary.sector_total(Sector::Pendencia)
        ));
        if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
            out.push_str(&format!(
                "Period: {} to {}\n",
                first.format("%d/%m/%Y"),
                last.format("%d/%m/%Y")
            ));
        }

        out.push_str("\nDaily volume\n");
        for day in &summary.daily {
            out.push_str(&format!(
                "  {}  {:>5}\n",
                day.date.format("%d/%m/%Y"),
                day.count
            ));
        }

        out.push_str("\nHourly share (% of sector)\n");
        for share in &summary.hourly {
            out.push_str(&format!(
                "  {:02}h  {:<10} {:>5}  {:>5.1}%\n",
                share.hour, share.sector, share.count, share.percentage
            ));
        }

        out.push_str("\nTop CRM reasons\n");
        if summary.top_crm_reasons.is_empty() {
            out.push_str("  (none)\n");
        }
        for (rank, reason) in summary.top_crm_reasons.iter().enumerate() {
            out.push_str(&format!(
                "  {:>2}. {:<40} {:>5}\n",
                rank + 1,
                reason.reason,
                reason.count
            ));
        }

        out.push_str("\nMost recent\n");
        for row in &summary.recent {
            out.push_str(&format!(
                "  {} {}  {:<10} {:<15} {:<45} {:<22} {}\n",
                row.date,
                row.time,
                row.sector,
                row.collaborator,
                row.reason,
                row.portal,
                row.order_number
            ));
        }

        Ok(out)
    }
}

pub fn formatter_for(format: ReportFormat) -> Box<dyn SummaryFormatter> {
    match format {
        ReportFormat::Text => Box::new(TextFormatter),
        ReportFormat::Json => Box::new(JsonFormatter::new_pretty()),
    }
}
