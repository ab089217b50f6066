/// Common identifying field for trace identities (i.e., case IDs)
///
/// The same key is used by the concept XES extension for activity names on events,
/// which is why it is only renamed on the trace level.
pub const TRACE_ID_NAME: &str = "concept:name";
/// Column name used for the trace ID in the flattened CSV output
///
/// The `case:` prefix is the `PM4Py` convention for trace-level columns
pub const PREFIXED_TRACE_ID_NAME: &str = "case:concept:name";

///
/// Column key a trace attribute is flattened to
///
/// Only the trace ID ([`TRACE_ID_NAME`]) is renamed (to [`PREFIXED_TRACE_ID_NAME`]); all other keys are passed through unchanged.
///
pub fn flattened_trace_key(key: &str) -> &str {
    if key == TRACE_ID_NAME {
        PREFIXED_TRACE_ID_NAME
    } else {
        key
    }
}
