// ABOUTME: CSV encoding of interaction log rows with the `;` delimited spreadsheet layout
// ABOUTME: Reads exports and older backups, writes rows with an optional UTF-8 BOM

use csv::{ReaderBuilder, Terminator, Trim, WriterBuilder};

use super::error::{RecordError, Result};
use super::LogRow;

pub const DELIMITER: u8 = b';';
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const HEADER: [&str; 11] = [
    "Data",
    "Hora",
    "Dia_Semana",
    "Setor",
    "Colaborador",
    "Motivo",
    "Portal",
    "Nota_Fiscal",
    "Numero_Pedido",
    "Motivo_CRM",
    "Transportadora",
];

/// Parse rows from CSV bytes. Missing `Dia_Semana` or `Transportadora` columns become "-".
pub fn read_rows(bytes: &[u8]) -> Result<Vec<LogRow>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for row in reader.deserialize::<LogRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Encode rows, optionally with the header line and a BOM prefix.
pub fn write_rows(rows: &[LogRow], header: bool, bom: bool) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    if bom {
        buffer.extend_from_slice(UTF8_BOM);
    }

    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);

    if header {
        writer.write_record(HEADER)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }

    writer.into_inner().map_err(|e| RecordError::EncodingError {
        message: e.to_string(),
    })
}
