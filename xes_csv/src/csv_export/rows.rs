use std::iter::FusedIterator;

use crate::event_log::{constants::flattened_trace_key, Event, EventLog, Trace};

use super::ColumnSet;

///
/// Flatten a single event (of the given trace) into a row matching `columns`
///
/// Cells are filled in this order, where later writes overwrite earlier ones in the same column:
/// 1. string attributes of the event
/// 2. date attributes of the event
/// 3. attributes of the trace (with the trace ID renamed, see [`flattened_trace_key`])
///
/// Values are trimmed of surrounding whitespace. Attributes without a matching column are skipped.
///
pub fn flatten_event(trace: &Trace, event: &Event, columns: &ColumnSet) -> Vec<String> {
    let mut row = vec![String::new(); columns.len()];
    for attr in event.string_attributes() {
        set_cell(&mut row, columns, &attr.key, attr.value.as_str());
    }
    for attr in event.date_attributes() {
        set_cell(&mut row, columns, &attr.key, attr.value.as_str());
    }
    for attr in &trace.attributes {
        set_cell(
            &mut row,
            columns,
            flattened_trace_key(&attr.key),
            attr.value.as_str(),
        );
    }
    row
}

fn set_cell(row: &mut [String], columns: &ColumnSet, key: &str, value: &str) {
    match columns.position(key) {
        Some(i) => row[i] = value.trim().to_string(),
        None => tracing::trace!(key, "No column for attribute, skipping"),
    }
}

///
/// Lazy iterator over the flattened rows of an event log (one per event, in document order)
///
/// Created by [`event_rows`].
///
#[derive(Debug, Clone)]
pub struct EventRows<'a> {
    columns: &'a ColumnSet,
    traces: std::slice::Iter<'a, Trace>,
    current_trace: Option<(&'a Trace, std::slice::Iter<'a, Event>)>,
    remaining: usize,
}

///
/// Flatten all events of `log` into rows matching `columns`
///
/// See [`flatten_event`] for how a single row is constructed.
///
pub fn event_rows<'a>(log: &'a EventLog, columns: &'a ColumnSet) -> EventRows<'a> {
    EventRows {
        columns,
        traces: log.traces.iter(),
        current_trace: None,
        remaining: log.num_events(),
    }
}

impl Iterator for EventRows<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((trace, events)) = &mut self.current_trace {
                if let Some(event) = events.next() {
                    self.remaining -= 1;
                    return Some(flatten_event(trace, event, self.columns));
                }
            }
            let trace = self.traces.next()?;
            self.current_trace = Some((trace, trace.events.iter()));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for EventRows<'_> {}

impl FusedIterator for EventRows<'_> {}
