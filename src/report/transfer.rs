// ABOUTME: Spreadsheet export of filtered log rows and import of older CSV backups
// ABOUTME: Exports carry a UTF-8 BOM; imports fill in columns missing from the old layout

use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

use super::dashboard::DashboardFilter;
use super::error::{ReportError, Result};
use crate::record::{read_rows, write_rows, CsvLog, LogRow};

/// Encode rows the way spreadsheet tools expect: `;` delimited with a BOM.
pub fn export_bytes(rows: &[LogRow]) -> Result<Vec<u8>> {
    Ok(write_rows(rows, true, true)?)
}

/// Write the rows matching `filter` to `destination`. Returns the row count.
pub async fn export_csv(rows: &[LogRow], filter: &DashboardFilter, destination: &Path) -> Result<usize> {
    let selected: Vec<LogRow> = rows.iter().filter(|r| filter.matches(r)).cloned().collect();
    let bytes = export_bytes(&selected)?;

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(destination, bytes).await?;

    info!(
        "Exported {} rows to {}",
        selected.len(),
        destination.display()
    );
    Ok(selected.len())
}

/// Restore a backup into the log. Refuses a non-empty log unless `force` is set.
pub async fn import_backup(source: &Path, log: &CsvLog, force: bool) -> Result<usize> {
    let existing = log.load().await?.len();
    if existing > 0 {
        if !force {
            return Err(ReportError::LogNotEmpty { rows: existing });
        }
        warn!("Importing into a log that already has {} rows", existing);
    }

    let bytes = fs::read(source).await?;
    let rows = read_rows(&bytes)?;
    let written = log.append_rows(&rows).await?;

    info!("Imported {} rows from {}", written, source.display());
    Ok(written)
}
