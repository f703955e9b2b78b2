//! In-memory capture of log events for assertions
//!
//! A single global capture layer is installed the first time
//! `init_test_capture()` is called; every test shares it, so tests should
//! filter on something unique to the test: an attribute name, a
//! registration key, or the `BootstrapId` of the configuration they built.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use relmap_core_types::schema::{
    EVENT_END_ERROR, FIELD_BOOTSTRAP_ID, FIELD_COMPONENT, FIELD_ERR_BOOTSTRAP_ID, FIELD_ERR_CODE,
    FIELD_EVENT, FIELD_OP,
};
use relmap_core_types::BootstrapId;
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// A captured log event with all its fields
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    /// Field value as recorded (strings unquoted, everything else via Debug)
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Stable `ERR_*` code of a failure event
    pub fn error_code(&self) -> Option<&str> {
        self.field(FIELD_ERR_CODE)
    }

    /// Bootstrap the event belongs to, whether logged as context or on the error
    pub fn bootstrap_id(&self) -> Option<&str> {
        self.field(FIELD_BOOTSTRAP_ID)
            .or_else(|| self.field(FIELD_ERR_BOOTSTRAP_ID))
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }
}

/// Layer that appends every event to a shared buffer
pub struct TestCaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let layer = Self {
            events: Arc::clone(&events),
        };
        (layer, TestCapture { events })
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            component: visitor.fields.get(FIELD_COMPONENT).cloned(),
            op: visitor.fields.get(FIELD_OP).cloned(),
            event: visitor.fields.get(FIELD_EVENT).cloned(),
            fields: visitor.fields,
        };

        self.events
            .lock()
            .map(|mut events| events.push(captured))
            .ok();
    }
}

/// Handle for reading captured events
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    /// Get all captured events
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events recorded for one operation name
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op.as_deref() == Some(op))
            .collect()
    }

    /// `end_error` events for one operation name
    pub fn failures(&self, op: &str) -> Vec<CapturedEvent> {
        self.events_for_op(op)
            .into_iter()
            .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
            .collect()
    }

    /// Events tagged with one configuration's bootstrap id
    pub fn events_for_bootstrap(&self, bootstrap_id: &BootstrapId) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.bootstrap_id() == Some(bootstrap_id.as_str()))
            .collect()
    }

    /// Assert that an event exists with the given operation and event type
    ///
    /// # Panics
    ///
    /// Panics if the event is not found
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        let found = events
            .iter()
            .any(|e| e.op.as_deref() == Some(op) && e.event.as_deref() == Some(event));
        assert!(
            found,
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            events.len()
        );
    }

    /// Count events matching a predicate
    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install (once) and return the shared capture handle
///
/// ```
/// use relmap_core::logging_facility::test_capture::init_test_capture;
/// use relmap_core::{TypeConfiguration, TypeSettings};
///
/// let capture = init_test_capture();
/// let config = TypeConfiguration::bootstrap(&TypeSettings::default()).unwrap();
///
/// let events = capture.events_for_bootstrap(config.bootstrap_id());
/// assert!(events.iter().any(|e| e.op.as_deref() == Some("bootstrap")));
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            // Another subscriber may already be global (e.g. init(Profile::Test));
            // the capture then stays empty instead of panicking.
            let _ = tracing_subscriber::registry().with(layer).try_init();
            capture
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_event_field_lookup() {
        let mut fields = HashMap::new();
        fields.insert("type_code".to_string(), "2004".to_string());
        let event = CapturedEvent {
            level: Level::INFO,
            component: None,
            op: Some("resolve".to_string()),
            event: None,
            fields,
        };

        assert_eq!(event.field("type_code"), Some("2004"));
        assert_eq!(event.field("missing"), None);
        assert_eq!(event.error_code(), None);
    }

    #[test]
    fn test_bootstrap_id_from_error_context() {
        let mut fields = HashMap::new();
        fields.insert("err.code".to_string(), "ERR_INVALID_SETTINGS".to_string());
        fields.insert("err.bootstrap_id".to_string(), "0190-abc".to_string());
        let event = CapturedEvent {
            level: Level::ERROR,
            component: None,
            op: Some("bootstrap".to_string()),
            event: Some("end_error".to_string()),
            fields,
        };

        assert_eq!(event.error_code(), Some("ERR_INVALID_SETTINGS"));
        assert_eq!(event.bootstrap_id(), Some("0190-abc"));
    }
}
