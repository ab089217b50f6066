use std::io::BufRead;

use quick_xml::{events::BytesStart, Reader};
use tracing::{debug, warn};

use super::event_log_struct::{Attribute, AttributeValue, Event, EventLog, Trace};

///
/// Error encountered while parsing XES
///
#[derive(Debug, thiserror::Error)]
pub enum XESParseError {
    /// There is no top-level `<log>` (e.g., empty input or a different root element)
    #[error("there is no top-level <log> element")]
    NoTopLevelLog,
    /// The input ended before the top-level `<log>` was closed (e.g., truncated file)
    #[error("unexpected end of input: top-level <log> element was not closed")]
    UnexpectedEof,
    /// Parsing error: Expected to have a previously constructed trace available
    #[error("expected an open <trace> element")]
    MissingLastTrace,
    /// Parsing error: Expected to have a previously constructed event available
    #[error("expected an open <event> element")]
    MissingLastEvent,
    /// XML error (e.g., incorrect XML format or IO error of the underlying reader)
    #[error("malformed XML")]
    XMLParsingError(#[from] quick_xml::Error),
}

///
/// Currently open tag (i.e., what the children of the tag are interpreted as)
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Log,
    Trace,
    Event,
    /// `<string>`/`<date>` attribute; nested attributes are not supported
    Attribute,
    /// Unknown element; its whole subtree is skipped
    Ignored,
}

/// Parse XES from the given reader
///
/// Only `<trace>` children of the top-level `<log>`, `<string>` and `<event>` children of traces,
/// and `<string>` and `<date>` children of events are considered.
/// All other elements (including their children) are ignored silently.
///
/// Parsing stops once the top-level `<log>` is closed.
pub fn import_xes<T>(reader: T) -> Result<EventLog, XESParseError>
where
    T: BufRead,
{
    let mut reader = Reader::from_reader(reader);
    let mut buf: Vec<u8> = Vec::new();
    let mut log = EventLog::default();
    let mut open_tags: Vec<Mode> = Vec::new();
    let mut encountered_log = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            quick_xml::events::Event::Start(t) => {
                let mode = handle_tag(&t, open_tags.last().copied(), &mut log)?;
                encountered_log = true;
                open_tags.push(mode);
            }
            quick_xml::events::Event::Empty(t) => {
                handle_tag(&t, open_tags.last().copied(), &mut log)?;
                if open_tags.is_empty() {
                    // Empty log, but still a log
                    break;
                }
            }
            quick_xml::events::Event::End(_) => {
                if open_tags.pop().is_none() {
                    return Err(XESParseError::NoTopLevelLog);
                }
                if open_tags.is_empty() {
                    break;
                }
            }
            quick_xml::events::Event::Eof => {
                if encountered_log {
                    return Err(XESParseError::UnexpectedEof);
                }
                return Err(XESParseError::NoTopLevelLog);
            }
            _ => {}
        }
        buf.clear();
    }

    debug!(
        traces = log.traces.len(),
        events = log.num_events(),
        "Parsed XES"
    );
    Ok(log)
}

///
/// Import a XES [`EventLog`] directly from a string
///
pub fn import_xes_str(xes_str: &str) -> Result<EventLog, XESParseError> {
    import_xes(xes_str.as_bytes())
}

///
/// Import a XES [`EventLog`] from a byte slice (&\[u8\])
///
pub fn import_xes_slice(xes_data: &[u8]) -> Result<EventLog, XESParseError> {
    import_xes(xes_data)
}

///
/// Handle an opening (or self-closing) tag below the currently open `parent`
///
/// Returns the [`Mode`] the children of this tag are parsed in.
///
fn handle_tag(
    t: &BytesStart<'_>,
    parent: Option<Mode>,
    log: &mut EventLog,
) -> Result<Mode, XESParseError> {
    let mode = match (parent, t.local_name().as_ref()) {
        (None, b"log") => Mode::Log,
        (None, _) => return Err(XESParseError::NoTopLevelLog),
        (Some(Mode::Log), b"trace") => {
            log.traces.push(Trace::default());
            Mode::Trace
        }
        (Some(Mode::Trace), b"event") => {
            last_trace(log)?.events.push(Event::default());
            Mode::Event
        }
        (Some(Mode::Trace), b"string") => {
            let attr = read_attribute(t, AttributeValue::String)?;
            last_trace(log)?.attributes.push(attr);
            Mode::Attribute
        }
        (Some(Mode::Event), b"string") => {
            let attr = read_attribute(t, AttributeValue::String)?;
            last_event(log)?.attributes.push(attr);
            Mode::Attribute
        }
        (Some(Mode::Event), b"date") => {
            let attr = read_attribute(t, AttributeValue::Date)?;
            last_event(log)?.attributes.push(attr);
            Mode::Attribute
        }
        _ => Mode::Ignored,
    };
    Ok(mode)
}

fn last_trace(log: &mut EventLog) -> Result<&mut Trace, XESParseError> {
    log.traces
        .last_mut()
        .ok_or(XESParseError::MissingLastTrace)
}

fn last_event(log: &mut EventLog) -> Result<&mut Event, XESParseError> {
    last_trace(log)?
        .events
        .last_mut()
        .ok_or(XESParseError::MissingLastEvent)
}

fn read_attribute(
    t: &BytesStart<'_>,
    to_value: fn(String) -> AttributeValue,
) -> Result<Attribute, XESParseError> {
    let key = get_attribute_string(t, "key")?;
    let value = get_attribute_string(t, "value")?;
    Ok(Attribute::new(key, to_value(value)))
}

///
/// Get the (unescaped) value of the XML attribute `key`
///
/// A missing XML attribute is read as the empty string.
/// Line breaks (`\r\n` or a lone `\r`) are normalized to `\n`.
///
fn get_attribute_string(t: &BytesStart<'_>, key: &'static str) -> Result<String, XESParseError> {
    match t.try_get_attribute(key).map_err(quick_xml::Error::from)? {
        Some(attr) => {
            let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
            Ok(normalize_line_breaks(&value))
        }
        None => {
            warn!(
                tag = %String::from_utf8_lossy(t.name().as_ref()),
                "Did not find expected XML attribute with key {}. Will assume empty string as value.",
                key
            );
            Ok(String::new())
        }
    }
}

fn normalize_line_breaks(value: &str) -> String {
    if value.contains('\r') {
        value.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        value.to_owned()
    }
}
