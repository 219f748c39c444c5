// ABOUTME: Dashboard aggregation over logged interactions
// ABOUTME: Filters by date range and sector, then builds totals, trends, hourly shares and rankings

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

use super::error::{ReportError, Result};
use crate::record::{LogRow, EMPTY_MARKER};
use crate::template::Sector;

pub const TOP_CRM_REASONS: usize = 15;
pub const RECENT_ROWS: usize = 50;

/// Accepts `dd/mm/YYYY` or ISO `YYYY-mm-dd`.
pub fn parse_filter_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .map_err(|_| ReportError::InvalidDate {
            value: value.to_string(),
        })
}

#[derive(Debug, Clone, Default)]
pub struct DashboardFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Empty means every sector.
    pub sectors: BTreeSet<Sector>,
}

impl DashboardFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ReportError::InvalidRange {
                    from: from.format("%d/%m/%Y").to_string(),
                    to: to.format("%d/%m/%Y").to_string(),
                });
            }
        }
        self.from = from;
        self.to = to;
        Ok(self)
    }

    pub fn with_sector(mut self, sector: Sector) -> Self {
        self.sectors.insert(sector);
        self
    }

    /// Rows whose date does not parse never match.
    pub fn matches(&self, row: &LogRow) -> bool {
        let Some(date) = row.parsed_date() else {
            return false;
        };
        if self.from.is_some_and(|from| date < from) || self.to.is_some_and(|to| date > to) {
            return false;
        }
        if self.sectors.is_empty() {
            return true;
        }
        row.sector().is_some_and(|s| self.sectors.contains(&s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyVolume {
    pub date: NaiveDate,
    pub count: usize,
}

/// Share of a sector's volume that fell within one hour of the day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyShare {
    pub hour: u32,
    pub sector: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasonCount {
    pub reason: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub by_sector: BTreeMap<String, usize>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub daily: Vec<DailyVolume>,
    pub hourly: Vec<HourlyShare>,
    pub top_crm_reasons: Vec<ReasonCount>,
    pub recent: Vec<LogRow>,
}

impl DashboardSummary {
    pub fn build(rows: &[LogRow], filter: &DashboardFilter) -> Self {
        let selected: Vec<&LogRow> = rows.iter().filter(|row| filter.matches(row)).collect();
        debug!(
            "Dashboard filter kept {} of {} rows",
            selected.len(),
            rows.len()
        );

        let mut by_sector: BTreeMap<String, usize> = BTreeMap::new();
        let mut daily: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        let mut hourly: BTreeMap<(u32, String), usize> = BTreeMap::new();
        let mut reasons: HashMap<&str, usize> = HashMap::new();

        for row in &selected {
            *by_sector.entry(row.sector.clone()).or_insert(0) += 1;

            if let Some(date) = row.parsed_date() {
                *daily.entry(date).or_insert(0) += 1;
            }

            if let Some(hour) = row.hour() {
                *hourly.entry((hour, row.sector.clone())).or_insert(0) += 1;
            }

            let reason = row.crm_reason.trim();
            if !reason.is_empty() && reason != EMPTY_MARKER {
                *reasons.entry(reason).or_insert(0) += 1;
            }
        }

        let hourly: Vec<HourlyShare> = hourly
            .into_iter()
            .map(|((hour, sector), count)| {
                let sector_total = by_sector.get(&sector).copied().unwrap_or(0);
                let percentage = if sector_total > 0 {
                    count as f64 / sector_total as f64 * 100.0
                } else {
                    0.0
                };
                HourlyShare {
                    hour,
                    sector,
                    count,
                    percentage,
                }
            })
            .collect();

        let mut top_crm_reasons: Vec<ReasonCount> = reasons
            .into_iter()
            .map(|(reason, count)| ReasonCount {
                reason: reason.to_string(),
                count,
            })
            .collect();
        top_crm_reasons.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.reason.cmp(&b.reason))
        });
        top_crm_reasons.truncate(TOP_CRM_REASONS);

        let mut recent: Vec<&LogRow> = selected.clone();
        recent.sort_by(|a, b| {
            b.parsed_date()
                .cmp(&a.parsed_date())
                .then_with(|| b.time.cmp(&a.time))
        });
        let recent: Vec<LogRow> = recent
            .into_iter()
            .take(RECENT_ROWS)
            .cloned()
            .collect();

        Self {
            total: selected.len(),
            first_date: daily.keys().next().copied(),
            last_date: daily.keys().next_back().copied(),
            by_sector,
            daily: daily
                .into_iter()
                .map(|(date, count)| DailyVolume { date, count })
                .collect(),
            hourly,
            top_crm_reasons,
            recent,
        }
    }

    pub fn sector_total(&self, sector: Sector) -> usize {
        self.by_sector.get(sector.label()).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
