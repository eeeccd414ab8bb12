//! CSV import/export adapter for the conversation log.
//!
//! Converts between in-memory [`MessageRecord`] sequences and the flat
//! delimited-text history format with a fixed column order. The header is
//! checked by strict equality: no reordering and no partial match is
//! tolerated. Timestamps travel verbatim in both directions.

use csv::{ReaderBuilder, WriterBuilder};
use thiserror::Error;

use tether_core::error::TetherError;
use tether_core::types::{MessageRecord, Timestamp};

/// Fixed history column list, in order.
pub const HEADER: [&str; 7] = [
    "MNDName",
    "Chatter",
    "Tag",
    "SubTag",
    "Timestamp",
    "Message",
    "Sender",
];

// =============================================================================
// Errors
// =============================================================================

/// Errors from the import/export adapter.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("input contains no data rows")]
    EmptyInput,

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TransferError> for TetherError {
    fn from(err: TransferError) -> Self {
        TetherError::Transfer(err.to_string())
    }
}

// =============================================================================
// Export
// =============================================================================

/// Serialize every record as one CSV row under the fixed header.
///
/// Fields containing the delimiter, quotes, or newlines are quoted per
/// standard CSV escaping. Output is UTF-8.
pub fn export(records: &[MessageRecord]) -> Result<Vec<u8>, TransferError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(HEADER)
        .map_err(|e| TransferError::Csv(e.to_string()))?;
    for record in records {
        writer
            .write_record([
                record.owner.as_str(),
                record.correspondent.as_str(),
                record.tag.as_str(),
                record.subtag.as_str(),
                &record.timestamp.to_string(),
                record.message.as_str(),
                record.sender.as_str(),
            ])
            .map_err(|e| TransferError::Csv(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| TransferError::Csv(e.to_string()))?;
    tracing::debug!(records = records.len(), "History exported");
    Ok(bytes)
}

/// Download name for an exported history derived from the imported file.
pub fn updated_file_name(original: &str) -> String {
    format!("updated_{original}")
}

// =============================================================================
// Import
// =============================================================================

/// Parse CSV bytes into validated records.
///
/// Fails with [`TransferError::EmptyInput`] when there are no data rows and
/// with [`TransferError::SchemaMismatch`] when the header differs from
/// [`HEADER`] or any row is structurally invalid. Never partially succeeds:
/// the first bad row aborts the whole import.
pub fn import(bytes: &[u8]) -> Result<Vec<MessageRecord>, TransferError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(TransferError::EmptyInput);
    }

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| TransferError::Csv(e.to_string()))?;
    if headers.len() != HEADER.len() || headers.iter().zip(HEADER).any(|(got, want)| got != want) {
        return Err(TransferError::SchemaMismatch(format!(
            "expected columns {:?}, found {:?}",
            HEADER,
            headers.iter().collect::<Vec<_>>()
        )));
    }

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        // Header occupies line 1.
        let line = idx + 2;
        let row =
            row.map_err(|e| TransferError::SchemaMismatch(format!("row {line}: {e}")))?;
        let timestamp = Timestamp::parse(&row[4]).map_err(|e| {
            TransferError::SchemaMismatch(format!("row {line}: bad timestamp `{}`: {e}", &row[4]))
        })?;
        let record = MessageRecord::new(
            &row[0], &row[1], &row[2], &row[3], timestamp, &row[5], &row[6],
        )
        .map_err(|e| TransferError::SchemaMismatch(format!("row {line}: {e}")))?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(TransferError::EmptyInput);
    }
    tracing::debug!(records = records.len(), "History imported");
    Ok(records)
}

// =============================================================================
// Tests
// =============================================================================
