// ABOUTME: Record sinks the register action appends to
// ABOUTME: Provides the append-only CSV log file and an in-memory sink

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::codec::{read_rows, write_rows};
use super::error::Result;
use super::{LogRow, Record};

#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Append exactly one row for `record`.
    async fn append(&self, record: &Record) -> Result<()>;
}

/// `;` delimited log file. Rows are only ever appended.
#[derive(Debug, Clone)]
pub struct CsvLog {
    path: PathBuf,
}

impl CsvLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All rows in the log. A missing file reads as empty.
    pub async fn load(&self) -> Result<Vec<LogRow>> {
        if !fs::try_exists(&self.path).await? {
            debug!("Log file {} does not exist yet", self.path.display());
            return Ok(Vec::new());
        }
        let bytes = fs::read(&self.path).await?;
        read_rows(&bytes)
    }

    /// Append rows, writing the header first when the file is new or empty.
    pub async fn append_rows(&self, rows: &[LogRow]) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let needs_header = match fs::metadata(&self.path).await {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };
        let bytes = write_rows(rows, needs_header, false)?;

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&bytes).await?;
        file.flush().await?;

        debug!("Appended {} rows to {}", rows.len(), self.path.display());
        Ok(rows.len())
    }
}

#[async_trait]
impl RecordSink for CsvLog {
    async fn append(&self, record: &Record) -> Result<()> {
        self.append_rows(&[record.to_row()]).await?;
        info!(
            "Logged {} / {} to {}",
            record.sector,
            record.template_key,
            self.path.display()
        );
        Ok(())
    }
}

/// Keeps rows in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    rows: RwLock<Vec<LogRow>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn rows(&self) -> Vec<LogRow> {
        self.rows.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn append(&self, record: &Record) -> Result<()> {
        self.rows.write().await.push(record.to_row());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Sector;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn record(key: &str) -> Record {
        let tz = chrono_tz::America::Sao_Paulo;
        Record {
            timestamp: tz.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap(),
            sector: Sector::Sac,
            collaborator: "Tamara".to_string(),
            template_key: key.to_string(),
            portal: "SHOPEE".to_string(),
            invoice_number: String::new(),
            order_number: "1".to_string(),
            crm_reason: "-".to_string(),
            carrier: None,
        }
    }

    #[tokio::test]
    async fn test_csv_log_writes_header_once() {
        let dir = tempdir().unwrap();
        let log = CsvLog::new(dir.path().join("logs").join("atendimentos.csv"));

        log.append(&record("SAUDAÇÃO")).await.unwrap();
        log.append(&record("CANCELAMENTO")).await.unwrap();

        let content = fs::read_to_string(log.path()).await.unwrap();
        assert_eq!(content.matches("Data;Hora").count(), 1);
        assert_eq!(content.lines().count(), 3);

        let rows = log.load().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].reason, "CANCELAMENTO");
        assert_eq!(rows[0].carrier, "-");
    }

    #[tokio::test]
    async fn test_missing_log_loads_empty() {
        let dir = tempdir().unwrap();
        let log = CsvLog::new(dir.path().join("nope.csv"));
        assert!(log.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_sink() {
        let sink = MemorySink::new();
        sink.append(&record("AGRADECIMENTO")).await.unwrap();
        assert_eq!(sink.len().await, 1);
        assert_eq!(sink.rows().await[0].sector, "SAC");
    }
}
