//! Flattening of XES event logs into CSV tables
//!
//! # Format Description
//!
//! Every event of the log becomes one row. The columns are all attribute keys
//! occurring in the log, where the trace ID (`concept:name` on trace level) is renamed to
//! `case:concept:name` so that it does not clash with the activity name of events:
//!
//! ```text
//! activity,case:concept:name,timestamp
//! start,case1,
//! ,case1,2024-01-01T00:00:00
//! ```
//!
//! Trace attributes are repeated for every event of the trace. If an event has no value for a column,
//! the cell is left empty. Keys and values are trimmed of surrounding whitespace; dates are copied as-is.
//!
//! # Export Behavior
//!
//! - Columns are sorted by name by default ([`ColumnOrder::Sorted`]), or kept in the order in which
//!   keys are first encountered ([`ColumnOrder::FirstSeen`]).
//! - Within a row, event string attributes are applied first, then event date attributes and finally
//!   trace attributes. A later value overwrites an earlier value for the same column, so trace
//!   attributes win over event attributes with the same key.
//! - The output starts with a UTF-8 byte order mark (can be disabled in [`CSVExportOptions`]).

mod column_set;
mod export_csv;
mod rows;

#[doc(inline)]
pub use column_set::*;
#[doc(inline)]
pub use export_csv::*;
#[doc(inline)]
pub use rows::*;
