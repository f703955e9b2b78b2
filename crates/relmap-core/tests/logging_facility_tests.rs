#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use relmap_core::errors::RelmapError;
use relmap_core::logging_facility::test_capture::init_test_capture;
use relmap_core::types::{AttributeTypeRequest, DomainTypeId, ResolutionIndicators};
use relmap_core::{log_op_end, log_op_error, log_op_start, resolve_attribute_type};
use relmap_core::{TemporalPrecision, TypeConfiguration, TypeSettings};
use relmap_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_1";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();
    assert_eq!(end_events.len(), 1);
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_2";

    log_op_error!(op_name, RelmapError::UnknownTypeCode { code: 4242 }, duration_ms = 3);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].field("err.code"), Some("ERR_UNKNOWN_TYPE_CODE"));
}

#[test]
fn test_start_and_end_pair() {
    let capture = init_test_capture();
    let op_name = "test_start_end_pair_unique_3";

    log_op_start!(op_name, attribute = "Person.name");
    log_op_end!(op_name, duration_ms = 1);

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    let ends = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END)
    });
    assert_eq!(starts, 1);
    assert_eq!(ends, 1);
}

#[test]
fn test_bootstrap_logs_start_and_end() {
    let capture = init_test_capture();
    let config = TypeConfiguration::bootstrap(&TypeSettings::default()).unwrap();
    let ends: Vec<_> = capture
        .events_for_bootstrap(config.bootstrap_id())
        .into_iter()
        .filter(|e| e.op.as_deref() == Some("bootstrap"))
        .collect();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(ends[0].field("frozen"), Some("true"));
    capture.assert_event_exists("bootstrap", EVENT_START);
}

#[test]
fn test_resolution_failure_logged_with_attribute() {
    let capture = init_test_capture();
    let config = common::config();
    let attribute = "Person.logging_unique_name";
    let request = AttributeTypeRequest::new(attribute, DomainTypeId::String).with_indicators(
        ResolutionIndicators::new().with_temporal_precision(TemporalPrecision::Date),
    );

    let err = resolve_attribute_type(&config, &request).unwrap_err();
    assert!(matches!(err, RelmapError::NotTemporal { .. }));

    let errors: Vec<_> = capture
        .events_for_op("resolve_attribute_type")
        .into_iter()
        .filter(|e| e.field("attribute") == Some(attribute))
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field("err.code"), Some("ERR_NOT_TEMPORAL"));
    assert_eq!(
        errors[0].field("err.bootstrap_id"),
        Some(config.bootstrap_id().as_str())
    );
}

#[test]
fn test_unknown_key_failure_records_key() {
    let capture = init_test_capture();
    let config = common::config();
    let request = AttributeTypeRequest::new("Invoice.total", DomainTypeId::Double)
        .with_key("logging_unique_money");

    resolve_attribute_type(&config, &request).unwrap_err();

    let logged = capture.count_events(|e| {
        e.op.as_deref() == Some("resolve_attribute_type")
            && e.field("err.registration_key") == Some("logging_unique_money")
            && e.field("err.code") == Some("ERR_UNKNOWN_REGISTRATION_KEY")
    });
    assert_eq!(logged, 1);
}

#[test]
fn test_bootstrap_failure_carries_bootstrap_id() {
    let capture = init_test_capture();
    let settings = TypeSettings::from_toml_str(
        r#"
[[aliases]]
key = "logging_unique_alias"
domain = "rust_decimal::Decimal"
sql_type = "NUMERIC"
"#,
    )
    .unwrap();

    assert!(matches!(
        TypeConfiguration::bootstrap(&settings),
        Err(RelmapError::InvalidSettings { .. })
    ));

    let failures: Vec<_> = capture
        .failures("bootstrap")
        .into_iter()
        .filter(|e| e.error_code() == Some("ERR_INVALID_SETTINGS"))
        .collect();
    assert!(!failures.is_empty());
    assert!(failures
        .iter()
        .all(|e| e.bootstrap_id().is_some_and(|id| !id.is_empty())));
}

#[test]
fn test_double_registration_logged_at_error() {
    let capture = init_test_capture();
    let mut fixture = common::plural_fixture();
    fixture.group.register_index_table_group(&fixture.index_join).unwrap();
    let stray = common::stray_join(
        fixture.plural_path.append_index(),
        "logging_unique_phone_kind",
    );
    fixture.group.register_index_table_group(&stray).unwrap_err();

    let logged = capture.count_events(|e| {
        e.level == tracing::Level::ERROR
            && e.field("rejected").is_some_and(|r| r.contains("{index}"))
            && e.field("slot") == Some("index")
    });
    assert!(logged >= 1);
}
