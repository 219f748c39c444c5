// ABOUTME: Interaction log: records of registered messages and the sinks that store them
// ABOUTME: Defines the record and CSV row types, the business clock and the append-only log

pub mod clock;
pub mod codec;
pub mod error;
pub mod sink;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::template::Sector;

pub use clock::{weekday_pt, BusinessClock, Clock, FixedClock, DEFAULT_TIMEZONE};
pub use codec::{read_rows, write_rows, HEADER};
pub use error::{RecordError, Result};
pub use sink::{CsvLog, MemorySink, RecordSink};

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const TIME_FORMAT: &str = "%H:%M:%S";
pub const EMPTY_MARKER: &str = "-";

/// One registered interaction. Created once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub timestamp: DateTime<Tz>,
    pub sector: Sector,
    pub collaborator: String,
    pub template_key: String,
    pub portal: String,
    pub invoice_number: String,
    pub order_number: String,
    pub crm_reason: String,
    pub carrier: Option<String>,
}

impl Record {
    pub fn to_row(&self) -> LogRow {
        let carrier = self
            .carrier
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(EMPTY_MARKER);

        LogRow {
            date: self.timestamp.format(DATE_FORMAT).to_string(),
            time: self.timestamp.format(TIME_FORMAT).to_string(),
            weekday: weekday_pt(self.timestamp.weekday()).to_string(),
            sector: self.sector.label().to_string(),
            collaborator: self.collaborator.clone(),
            reason: self.template_key.clone(),
            portal: self.portal.clone(),
            invoice_number: self.invoice_number.clone(),
            order_number: self.order_number.clone(),
            crm_reason: self.crm_reason.clone(),
            carrier: carrier.to_string(),
        }
    }
}

/// A log line as stored, every column kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogRow {
    #[serde(rename = "Data")]
    pub date: String,
    #[serde(rename = "Hora")]
    pub time: String,
    #[serde(rename = "Dia_Semana")]
    pub weekday: String,
    #[serde(rename = "Setor")]
    pub sector: String,
    #[serde(rename = "Colaborador")]
    pub collaborator: String,
    #[serde(rename = "Motivo")]
    pub reason: String,
    #[serde(rename = "Portal")]
    pub portal: String,
    #[serde(rename = "Nota_Fiscal")]
    pub invoice_number: String,
    #[serde(rename = "Numero_Pedido")]
    pub order_number: String,
    #[serde(rename = "Motivo_CRM")]
    pub crm_reason: String,
    #[serde(rename = "Transportadora")]
    pub carrier: String,
}

impl Default for LogRow {
    fn default() -> Self {
        Self {
            date: String::new(),
            time: String::new(),
            weekday: EMPTY_MARKER.to_string(),
            sector: String::new(),
            collaborator: String::new(),
            reason: String::new(),
            portal: String::new(),
            invoice_number: String::new(),
            order_number: String::new(),
            crm_reason: String::new(),
            carrier: EMPTY_MARKER.to_string(),
        }
    }
}

impl LogRow {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    pub fn parsed_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(self.time.trim(), TIME_FORMAT).ok()
    }

    pub fn hour(&self) -> Option<u32> {
        self.parsed_time().map(|t| t.hour())
    }

    pub fn sector(&self) -> Option<Sector> {
        Sector::from_label(&self.sector)
    }
}
