use crate::event_log::{
    import_xes::{import_xes_slice, import_xes_str, XESParseError},
    Attribute, AttributeValue,
};

#[test]
fn test_xes_import_repair_example() {
    let x = include_bytes!("test_data/repair_example.xes");
    let log = import_xes_slice(x).unwrap();

    assert_eq!(log.traces.len(), 3);
    assert_eq!(log.num_events(), 5);

    // Only <string> trace attributes are kept (the float "cost" is dropped)
    assert_eq!(
        log.traces[1].attributes,
        vec![Attribute::string("concept:name", "10")]
    );

    // Global attributes, classifiers and log attributes are not part of any trace
    assert!(log.traces.iter().all(|t| t
        .attributes
        .iter()
        .all(|a| a.value.as_str() != "__INVALID__" && a.value.as_str() != "CPN Tools")));

    // Event attributes stay in document order, <int> is dropped
    let keys: Vec<&str> = log.traces[0].events[1]
        .attributes
        .iter()
        .map(|a| a.key.as_str())
        .collect();
    assert_eq!(
        keys,
        vec![
            "org:resource",
            "time:timestamp",
            "concept:name",
            "lifecycle:transition"
        ]
    );

    // Dates are kept as literal text
    assert_eq!(
        log.traces[0].events[2].attributes[1].value,
        AttributeValue::Date("1970-01-02T12:30:00.000+01:00".to_string())
    );

    // Nested attributes inside a <list> are not lifted to the event
    assert!(log.traces[1].events[1]
        .attributes
        .iter()
        .all(|a| a.key != "part" && a.key != "parts"));

    // Trace without events
    assert!(log.traces[2].events.is_empty());
    assert_eq!(log.traces[2].attributes.len(), 2);
}

#[test]
fn test_xes_import_single_case() {
    let x = include_str!("test_data/single_case.xes");
    let log = import_xes_str(x).unwrap();
    assert_eq!(log.traces.len(), 1);
    let trace = &log.traces[0];
    assert_eq!(
        trace.attributes,
        vec![Attribute::string("concept:name", "case1")]
    );
    assert_eq!(
        trace.events[0].attributes,
        vec![Attribute::string("activity", "start")]
    );
    assert_eq!(
        trace.events[1].attributes,
        vec![Attribute::date("timestamp", "2024-01-01T00:00:00")]
    );
}

#[test]
fn test_xes_import_values_are_unescaped() {
    let log = import_xes_str(
        r#"<log><trace><event><string key="a&amp;b" value="&quot;x&quot; &lt; y"/></event></trace></log>"#,
    )
    .unwrap();
    assert_eq!(
        log.traces[0].events[0].attributes,
        vec![Attribute::string("a&b", "\"x\" < y")]
    );
}

#[test]
fn test_xes_import_whitespace_is_kept() {
    // Trimming happens when flattening, not when parsing
    let log = import_xes_str(
        r#"<log><trace><string key=" concept:name " value="  c1  "/></trace></log>"#,
    )
    .unwrap();
    assert_eq!(
        log.traces[0].attributes,
        vec![Attribute::string(" concept:name ", "  c1  ")]
    );
}

#[test]
fn test_xes_import_line_breaks_are_normalized() {
    let log = import_xes_str(
        "<log><trace><event><string key=\"a\" value=\"l1\r\nl2\"/><date key=\"b\" value=\"x\ry\"/></event></trace></log>",
    )
    .unwrap();
    assert_eq!(
        log.traces[0].events[0].attributes,
        vec![Attribute::string("a", "l1\nl2"), Attribute::date("b", "x\ny")]
    );
}

#[test]
fn test_xes_import_only_direct_children() {
    let log = import_xes_str(
        r#"<log>
            <event><string key="orphan" value="x"/></event>
            <string key="log-level" value="x"/>
            <trace>
                <date key="trace-date" value="2024"/>
                <foo><event><string key="hidden" value="x"/></event></foo>
                <event>
                    <container key="c"><string key="nested" value="x"/></container>
                    <string key="kept" value="y">
                        <string key="child" value="z"/>
                    </string>
                </event>
            </trace>
        </log>"#,
    )
    .unwrap();
    assert_eq!(log.traces.len(), 1);
    assert!(log.traces[0].attributes.is_empty());
    assert_eq!(log.traces[0].events.len(), 1);
    assert_eq!(
        log.traces[0].events[0].attributes,
        vec![Attribute::string("kept", "y")]
    );
}

#[test]
fn test_xes_import_missing_key_or_value() {
    let log =
        import_xes_str(r#"<log><trace><event><string key="k"/><date value="v"/></event></trace></log>"#)
            .unwrap();
    assert_eq!(
        log.traces[0].events[0].attributes,
        vec![Attribute::string("k", ""), Attribute::date("", "v")]
    );
}

#[test]
fn test_xes_import_prefixed_root() {
    let log = import_xes_str(
        r#"<xes:log xmlns:xes="http://www.xes-standard.org/"><xes:trace><xes:event/></xes:trace></xes:log>"#,
    )
    .unwrap();
    assert_eq!(log.num_events(), 1);
}

#[test]
fn test_xes_import_empty_log() {
    assert_eq!(import_xes_str("<log/>").unwrap().traces.len(), 0);
    assert_eq!(import_xes_str("<log></log>").unwrap().traces.len(), 0);
}

#[test]
fn test_xes_import_stops_after_log() {
    let log = import_xes_str("<log><trace/></log><trace/>").unwrap();
    assert_eq!(log.traces.len(), 1);
}

#[test]
pub fn test_invalid_xes_empty() {
    let res = import_xes_str("");
    assert!(matches!(res, Err(XESParseError::NoTopLevelLog)));
}

#[test]
pub fn test_invalid_xes_not_xml() {
    let res = import_xes_str("this is not an event log");
    assert!(matches!(res, Err(XESParseError::NoTopLevelLog)));
}

#[test]
pub fn test_invalid_xes_wrong_root() {
    let res = import_xes_str(r#"<pnml><net id="n1"/></pnml>"#);
    assert!(matches!(res, Err(XESParseError::NoTopLevelLog)));
}

#[test]
pub fn test_invalid_xes_truncated() {
    let x = include_bytes!("test_data/truncated.xes");
    let res = import_xes_slice(x);
    assert!(matches!(res, Err(XESParseError::UnexpectedEof)));
}

#[test]
pub fn test_invalid_xes_mismatched_end_tag() {
    let res = import_xes_str("<log><trace></event></log>");
    assert!(matches!(res, Err(XESParseError::XMLParsingError(_))));
}

#[test]
pub fn test_invalid_xes_broken_attribute() {
    let res = import_xes_str(r#"<log><trace><string key="a" value="&unknown;"/></trace></log>"#);
    assert!(matches!(res, Err(XESParseError::XMLParsingError(_))));
}
