#![warn(
    clippy::doc_markdown,
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs
)]

#![doc = include_str!("../README.md")]

///
/// Event Logs ([`EventLog`] and XES import)
///
pub mod event_log {
    /// Constants
    pub mod constants;
    /// [`EventLog`] struct and sub-structs
    pub mod event_log_struct;
    /// XES Import
    pub mod import_xes;
    pub use event_log_struct::{Attribute, AttributeValue, Attributes, Event, EventLog, Trace};
    #[cfg(test)]
    mod tests;
}

pub mod csv_export;

pub mod convert;


#[doc(inline)]
pub use event_log::event_log_struct::EventLog;

#[doc(inline)]
pub use event_log::import_xes::import_xes;

#[doc(inline)]
pub use event_log::import_xes::import_xes_slice;

#[doc(inline)]
pub use event_log::import_xes::import_xes_str;

#[doc(inline)]
pub use event_log::import_xes::XESParseError;

#[doc(inline)]
pub use csv_export::export_xes_csv;

#[doc(inline)]
pub use csv_export::export_xes_csv_with_options;

#[doc(inline)]
pub use csv_export::CSVExportOptions;

#[doc(inline)]
pub use csv_export::ColumnSet;

#[doc(inline)]
pub use convert::convert_xes_to_csv;

#[doc(inline)]
pub use convert::convert_xes_to_csv_with_options;

#[doc(inline)]
pub use convert::XESToCSVError;
