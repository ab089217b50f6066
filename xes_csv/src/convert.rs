//! Conversion of XES files to CSV files

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};

use crate::{
    csv_export::{export_xes_csv_with_options, CSVExportError, CSVExportOptions, CSVExportSummary},
    event_log::import_xes::{import_xes_slice, XESParseError},
};

/// Error type for XES to CSV conversion
///
/// Each variant corresponds to the stage of the conversion that failed.
#[derive(Debug, thiserror::Error)]
pub enum XESToCSVError {
    /// Input path does not end in `.xes`
    #[error("input file must be an XES file: {}", .0.display())]
    InvalidExtension(PathBuf),
    /// Input file could not be read
    #[error("failed to open XES file {}", path.display())]
    FileOpen {
        /// Input path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
    /// Input is not a (well-formed) XES document
    #[error("failed to decode XES file")]
    Parse(#[from] XESParseError),
    /// Output file could not be created
    #[error("failed to create CSV file {}", path.display())]
    FileCreate {
        /// Output path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
    /// Writing the CSV output failed
    #[error(transparent)]
    Write(#[from] CSVExportError),
}

///
/// Check that `path` names an XES file (i.e., ends in `.xes`, ignoring case)
///
/// No file system access is performed.
///
pub fn validate_xes_path(path: &Path) -> Result<(), XESToCSVError> {
    if path.to_string_lossy().to_lowercase().ends_with(".xes") {
        Ok(())
    } else {
        Err(XESToCSVError::InvalidExtension(path.to_path_buf()))
    }
}

///
/// Convert the XES file at `input` to a CSV file at `output`
///
/// See [`convert_xes_to_csv_with_options`].
///
pub fn convert_xes_to_csv<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
) -> Result<CSVExportSummary, XESToCSVError> {
    convert_xes_to_csv_with_options(input, output, &CSVExportOptions::default())
}

///
/// Convert the XES file at `input` to a CSV file at `output` with custom options
///
/// The input is read and parsed completely before the output file is created,
/// so invalid input never creates or truncates `output`.
/// If writing fails midway, a partially written output file is left behind.
///
#[instrument(skip_all, fields(input = %input.as_ref().display(), output = %output.as_ref().display()))]
pub fn convert_xes_to_csv_with_options<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &CSVExportOptions,
) -> Result<CSVExportSummary, XESToCSVError> {
    let input = input.as_ref();
    let output = output.as_ref();
    validate_xes_path(input)?;

    let xes_data = std::fs::read(input).map_err(|source| XESToCSVError::FileOpen {
        path: input.to_path_buf(),
        source,
    })?;
    debug!(bytes = xes_data.len(), "Read XES file");
    let log = import_xes_slice(&xes_data)?;
    drop(xes_data);

    let file = File::create(output).map_err(|source| XESToCSVError::FileCreate {
        path: output.to_path_buf(),
        source,
    })?;
    let summary = export_xes_csv_with_options(BufWriter::new(file), &log, options)?;
    debug!(
        columns = summary.columns,
        rows = summary.rows,
        "Wrote CSV file"
    );
    Ok(summary)
}
