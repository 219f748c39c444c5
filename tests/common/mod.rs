// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides scratch environments, context builders, fixed clocks and a failing record sink

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::TimeZone;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;

use scriptdesk::record::{FixedClock, LogRow, Record, RecordError, RecordSink};
use scriptdesk::template::{FieldValues, RenderContext};

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn log_file(&self) -> PathBuf {
        self.path().join("atendimentos.csv")
    }

    pub fn config_file(&self) -> PathBuf {
        self.path().join("scriptdesk.yaml")
    }

    /// Writes a config pointing the log at this environment
    pub async fn write_config(&self, extra: &str) -> PathBuf {
        let content = format!(
            "log_path: {}\nlogging:\n  level: warn\n{}",
            self.log_file().display(),
            extra
        );
        let path = self.config_file();
        fs::write(&path, content)
            .await
            .expect("Failed to write config file");
        path
    }

    pub async fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content)
            .await
            .expect("Failed to write test file");
        path
    }
}

/// Context used by the logistics examples
pub fn logistics_context(portal: &str) -> RenderContext {
    RenderContext::new()
        .with_client_name("")
        .with_collaborator("Ana")
        .with_carrier("JADLOG")
        .with_order_number("4521")
        .with_portal(portal)
}

/// Fills every schema slot and the free-text message with a recognisable value
pub fn all_fields(names: impl IntoIterator<Item = String>) -> FieldValues {
    names
        .into_iter()
        .map(|name| {
            let value = format!("valor-{}", name);
            (name, value)
        })
        .collect()
}

pub fn fixed_clock(year: i32, month: u32, day: u32, hour: u32) -> FixedClock {
    let tz = chrono_tz::America::Sao_Paulo;
    FixedClock(
        tz.with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .expect("Unambiguous local time"),
    )
}

pub fn log_row(date: &str, time: &str, sector: &str, reason: &str, crm_reason: &str) -> LogRow {
    LogRow {
        date: date.to_string(),
        time: time.to_string(),
        sector: sector.to_string(),
        collaborator: "Ana".to_string(),
        reason: reason.to_string(),
        portal: "SHOPEE".to_string(),
        crm_reason: crm_reason.to_string(),
        ..LogRow::default()
    }
}

/// Sink that rejects every write
pub struct FailingSink;

#[async_trait]
impl RecordSink for FailingSink {
    async fn append(&self, _record: &Record) -> Result<(), RecordError> {
        Err(RecordError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "log is read-only",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_setup() {
        let env = TestEnvironment::new();
        assert!(env.path().exists());
        assert!(env.log_file().ends_with("atendimentos.csv"));
    }

    #[test]
    fn test_all_fields() {
        let fields = all_fields(vec!["rua".to_string(), "cep".to_string()]);
        assert_eq!(fields.get("rua"), Some("valor-rua"));
        assert_eq!(fields.len(), 2);
    }
}
