use serde::{Deserialize, Serialize};

///
/// Attribute values supported for flattening
///
/// Only `<string>` and `<date>` XES attributes are considered.
/// Dates are _not_ parsed: the literal text of the `value` XML attribute is kept as-is.
///
/// ```rust
/// use xes_csv::event_log::AttributeValue;
/// let v = AttributeValue::Date("2024-01-01T00:00:00".to_string());
///
/// assert_eq!(v.as_str(), "2024-01-01T00:00:00");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type", content = "content")]
pub enum AttributeValue {
    /// String values
    String(String),
    /// Date values (in their literal textual form)
    Date(String),
}

impl AttributeValue {
    ///
    /// Textual content of the value, regardless of its type
    ///
    pub fn as_str(&self) -> &str {
        match self {
            AttributeValue::String(v) | AttributeValue::Date(v) => v,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
///
/// Attribute made up of the key and value
///
pub struct Attribute {
    /// Attribute key
    pub key: String,
    /// Attribute value
    pub value: AttributeValue,
}

impl Attribute {
    ///
    /// Helper to create a new attribute
    ///
    pub fn new(key: impl Into<String>, attribute_val: AttributeValue) -> Self {
        Self {
            key: key.into(),
            value: attribute_val,
        }
    }
    /// Helper to create a new string attribute
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, AttributeValue::String(value.into()))
    }
    /// Helper to create a new date attribute
    pub fn date(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, AttributeValue::Date(value.into()))
    }
}

///
/// Attributes are [`Vec`]s of [`Attribute`]s
///
/// Keys are _not_ required to be unique. When flattening, a later attribute overwrites an earlier one with the same key.
///
pub type Attributes = Vec<Attribute>;

///
/// An event consists of multiple (event) attributes ([Attributes])
///
/// Attributes are kept in document order; string and date attributes can be interleaved.
///
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Event {
    /// Event attributes
    pub attributes: Attributes,
}

impl Event {
    /// Create a new event from the given attributes
    pub fn new(attributes: Attributes) -> Self {
        Self { attributes }
    }
    /// String attributes of this event (in document order)
    pub fn string_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes
            .iter()
            .filter(|a| matches!(a.value, AttributeValue::String(_)))
    }
    /// Date attributes of this event (in document order)
    pub fn date_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes
            .iter()
            .filter(|a| matches!(a.value, AttributeValue::Date(_)))
    }
}

///
/// A trace consists of a list of events and trace attributes (See also [`Event`] and [`Attributes`])
///
/// Trace attributes apply to every event of the trace once the log is flattened.
///
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Trace {
    /// Trace-level attributes
    pub attributes: Attributes,
    /// Events contained in trace
    pub events: Vec<Event>,
}

///
/// Event log consisting of a list of [`Trace`]s
///
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EventLog {
    /// Traces contained in log
    pub traces: Vec<Trace>,
}

impl EventLog {
    /// Total number of events over all traces
    pub fn num_events(&self) -> usize {
        self.traces.iter().map(|t| t.events.len()).sum()
    }
}
