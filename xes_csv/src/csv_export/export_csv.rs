use std::{fmt, io::Write};

use serde::{Deserialize, Serialize};

use crate::event_log::EventLog;

use super::{event_rows, ColumnOrder, ColumnSet};

/// UTF-8 byte order mark written at the start of exported CSV files
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Options for CSV Export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CSVExportOptions {
    /// Order of the columns (default: [`ColumnOrder::Sorted`])
    pub column_order: ColumnOrder,
    /// Field delimiter (default: `,`)
    pub delimiter: u8,
    /// Whether to prefix the output with a UTF-8 byte order mark (default: `true`)
    pub write_bom: bool,
}

impl Default for CSVExportOptions {
    fn default() -> Self {
        Self {
            column_order: ColumnOrder::default(),
            delimiter: b',',
            write_bom: true,
        }
    }
}

/// Size of an exported CSV table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CSVExportSummary {
    /// Number of columns in the header
    pub columns: usize,
    /// Number of data rows (i.e., events)
    pub rows: usize,
}

/// Part of the output that was being written when an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStage {
    /// UTF-8 byte order mark
    Bom,
    /// Header record
    Header,
    /// Data record
    Record,
    /// Flushing buffered output
    Flush,
}

impl fmt::Display for WriteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteStage::Bom => write!(f, "UTF-8 BOM"),
            WriteStage::Header => write!(f, "CSV header"),
            WriteStage::Record => write!(f, "CSV record"),
            WriteStage::Flush => write!(f, "CSV output"),
        }
    }
}

/// Error type for CSV export
#[derive(Debug, thiserror::Error)]
pub enum CSVExportError {
    /// The configured delimiter is not an ASCII character, so the output would not be valid UTF-8
    #[error("invalid CSV delimiter {0:#04x}: must be an ASCII character")]
    InvalidDelimiter(u8),
    /// Writing a part of the output failed
    #[error("failed to write {stage}")]
    Write {
        /// What was being written
        stage: WriteStage,
        /// Underlying CSV (or IO) error
        #[source]
        source: csv::Error,
    },
}

impl CSVExportError {
    fn write(stage: WriteStage, source: impl Into<csv::Error>) -> Self {
        Self::Write {
            stage,
            source: source.into(),
        }
    }

    /// Part of the output that was being written, if the error occurred while writing
    pub fn stage(&self) -> Option<WriteStage> {
        match self {
            CSVExportError::InvalidDelimiter(_) => None,
            CSVExportError::Write { stage, .. } => Some(*stage),
        }
    }
}

///
/// Write a CSV table: optional BOM, the `header` record and then all `rows`
///
/// All rows are expected to have as many fields as the header.
/// With an empty header, every record (header included) is written as an empty line.
/// Returns the number of rows written.
///
pub fn write_csv_table<W, R>(
    mut writer: W,
    header: &[String],
    rows: R,
    options: &CSVExportOptions,
) -> Result<usize, CSVExportError>
where
    W: Write,
    R: IntoIterator<Item = Vec<String>>,
{
    if !options.delimiter.is_ascii() {
        return Err(CSVExportError::InvalidDelimiter(options.delimiter));
    }
    if options.write_bom {
        writer
            .write_all(UTF8_BOM)
            .map_err(|e| CSVExportError::write(WriteStage::Bom, e))?;
    }
    if header.is_empty() {
        return write_empty_records(writer, rows);
    }
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    csv_writer
        .write_record(header)
        .map_err(|e| CSVExportError::write(WriteStage::Header, e))?;
    let mut num_rows = 0;
    for row in rows {
        csv_writer
            .write_record(&row)
            .map_err(|e| CSVExportError::write(WriteStage::Record, e))?;
        num_rows += 1;
    }
    csv_writer
        .flush()
        .map_err(|e| CSVExportError::write(WriteStage::Flush, e))?;
    Ok(num_rows)
}

/// Zero-column table: the `csv` writer would quote an empty record as `""`,
/// which reads back as one column with an empty name
fn write_empty_records<W, R>(mut writer: W, rows: R) -> Result<usize, CSVExportError>
where
    W: Write,
    R: IntoIterator<Item = Vec<String>>,
{
    writer
        .write_all(b"\n")
        .map_err(|e| CSVExportError::write(WriteStage::Header, e))?;
    let mut num_rows = 0;
    for _ in rows {
        writer
            .write_all(b"\n")
            .map_err(|e| CSVExportError::write(WriteStage::Record, e))?;
        num_rows += 1;
    }
    writer
        .flush()
        .map_err(|e| CSVExportError::write(WriteStage::Flush, e))?;
    Ok(num_rows)
}

/// Export [`EventLog`] to CSV format (one row per event)
pub fn export_xes_csv<W: Write>(
    writer: W,
    log: &EventLog,
) -> Result<CSVExportSummary, CSVExportError> {
    export_xes_csv_with_options(writer, log, &CSVExportOptions::default())
}

/// Export [`EventLog`] to CSV format with custom options
pub fn export_xes_csv_with_options<W: Write>(
    writer: W,
    log: &EventLog,
    options: &CSVExportOptions,
) -> Result<CSVExportSummary, CSVExportError> {
    let columns = ColumnSet::from_event_log(log, options.column_order);
    tracing::debug!(columns = columns.len(), "Collected CSV columns");
    let rows = write_csv_table(writer, columns.columns(), event_rows(log, &columns), options)?;
    Ok(CSVExportSummary {
        columns: columns.len(),
        rows,
    })
}

/// Export [`EventLog`] to a CSV string
pub fn export_xes_csv_to_string(log: &EventLog) -> Result<String, CSVExportError> {
    export_xes_csv_to_string_with_options(log, &CSVExportOptions::default())
}

/// Export [`EventLog`] to a CSV string with options
pub fn export_xes_csv_to_string_with_options(
    log: &EventLog,
    options: &CSVExportOptions,
) -> Result<String, CSVExportError> {
    let mut buf = Vec::new();
    export_xes_csv_with_options(&mut buf, log, options)?;
    String::from_utf8(buf).map_err(|e| {
        CSVExportError::write(
            WriteStage::Flush,
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        )
    })
}
