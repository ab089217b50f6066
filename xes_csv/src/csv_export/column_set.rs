use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::event_log::{constants::flattened_trace_key, EventLog};

/// Order of the columns in the flattened output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnOrder {
    /// Lexicographically sorted column names
    #[default]
    Sorted,
    /// Order in which the keys are first encountered
    ///
    /// Per trace: trace attributes first, then for each event its string attributes followed by its date attributes.
    FirstSeen,
}

///
/// All attribute keys of an event log (trimmed and with trace IDs renamed), in encounter order
///
/// The returned iterator yields duplicates; see [`ColumnSet::from_event_log`] for the de-duplicated columns.
///
pub fn collect_column_keys(log: &EventLog) -> impl Iterator<Item = &str> + '_ {
    log.traces
        .iter()
        .flat_map(|trace| {
            let trace_keys = trace.attributes.iter().map(|a| flattened_trace_key(&a.key));
            let event_keys = trace.events.iter().flat_map(|e| {
                e.string_attributes()
                    .chain(e.date_attributes())
                    .map(|a| a.key.as_str())
            });
            trace_keys.chain(event_keys)
        })
        .map(str::trim)
}

///
/// De-duplicated column names of a flattened event log together with an index from name to column position
///
/// Names are trimmed of surrounding whitespace. Lookups via [`ColumnSet::position`] also trim the queried key.
///
/// ```rust
/// use xes_csv::csv_export::ColumnSet;
/// let columns: ColumnSet = ["b", " a ", "b"].into_iter().collect();
///
/// assert_eq!(columns.columns(), &["b".to_string(), "a".to_string()]);
/// assert_eq!(columns.position("a"), Some(1));
/// assert_eq!(columns.position("c"), None);
/// ````
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSet {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColumnSet {
    ///
    /// Collect the columns of the given event log
    ///
    /// Every trace attribute key (with [`TRACE_ID_NAME`](crate::event_log::constants::TRACE_ID_NAME) renamed to
    /// [`PREFIXED_TRACE_ID_NAME`](crate::event_log::constants::PREFIXED_TRACE_ID_NAME)) and every event attribute key occurs exactly once.
    ///
    pub fn from_event_log(log: &EventLog, order: ColumnOrder) -> Self {
        match order {
            ColumnOrder::Sorted => collect_column_keys(log).unique().sorted().collect(),
            ColumnOrder::FirstSeen => collect_column_keys(log).collect(),
        }
    }

    /// Column names, in output order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Iterate over column names, in output order
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.columns.iter()
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether there are no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of the column with the given name (trimmed before lookup)
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key.trim()).copied()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ColumnSet {
    /// Keeps the first occurrence of every (trimmed) name
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = ColumnSet::default();
        for name in iter {
            let name = name.as_ref().trim();
            if !set.index.contains_key(name) {
                set.index.insert(name.to_string(), set.columns.len());
                set.columns.push(name.to_string());
            }
        }
        set
    }
}

impl<'a> IntoIterator for &'a ColumnSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
