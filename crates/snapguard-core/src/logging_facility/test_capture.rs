//! In-memory event capture for logging assertions
//!
//! Installs one global layer that records every event's fields as strings.
//! Queries are phrased in the schema's terms: the end event of an op, the
//! dispatch event for a canonical URL. All tests in a binary share one
//! buffer, so each test keys its queries on an op name or URL of its own.

use snapguard_core_types::schema::{
    EVENT_DISPATCH, FIELD_COMMAND, FIELD_COMPONENT, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_EVENT, FIELD_OP, FIELD_OUTCOME, FIELD_URL,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn component(&self) -> Option<&str> {
        self.field(FIELD_COMPONENT)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    /// Command name on a dispatch event
    pub fn command(&self) -> Option<&str> {
        self.field(FIELD_COMMAND)
    }

    /// `OK` or `fail` on a dispatch event
    pub fn outcome(&self) -> Option<&str> {
        self.field(FIELD_OUTCOME)
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.field(FIELD_DURATION_MS)?.parse().ok()
    }

    /// Stable error code on an `end_error` event
    pub fn error_code(&self) -> Option<&str> {
        self.field(FIELD_ERR_CODE)
    }

    pub fn is_op_event(&self, op: &str, event: &str) -> bool {
        self.op() == Some(op) && self.event() == Some(event)
    }

    pub fn is_dispatch_for(&self, url: &str) -> bool {
        self.event() == Some(EVENT_DISPATCH) && self.field(FIELD_URL) == Some(url)
    }
}

#[derive(Default)]
struct FieldRecorder(BTreeMap<String, String>);

impl Visit for FieldRecorder {
    // Strings are kept unquoted; everything else goes through Debug, which
    // prints numbers and bools plainly and `%`-fields via their Display.
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);
        let captured = CapturedEvent {
            level: *event.metadata().level(),
            fields: recorder.0,
        };
        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Handle on the shared event buffer
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events emitted for `op` with the given event name
    pub fn op_events(&self, op: &str, event: &str) -> Vec<CapturedEvent> {
        self.matching(|e| e.is_op_event(op, event))
    }

    /// Dispatch events whose canonical URL is `url`
    pub fn dispatch_events(&self, url: &str) -> Vec<CapturedEvent> {
        self.matching(|e| e.is_dispatch_for(url))
    }

    /// # Panics
    ///
    /// Panics if no event for `op` with that event name was recorded
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is_op_event(op, event)),
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            events.len()
        );
    }

    fn matching(&self, predicate: impl Fn(&CapturedEvent) -> bool) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .map(|events| events.iter().filter(|e| predicate(e)).cloned().collect())
            .unwrap_or_default()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer (first call only) and return its handle.
///
/// # Example
///
/// ```
/// use snapguard_core::logging_facility::test_capture::init_test_capture;
/// use snapguard_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example_op");
/// capture.assert_event_exists("doc_example_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let events = Arc::new(Mutex::new(Vec::new()));
            let layer = CaptureLayer {
                events: events.clone(),
            };
            tracing_subscriber::registry().with(layer).init();
            TestCapture { events }
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapguard_core_types::schema::{EVENT_END, OUTCOME_OK};

    fn event(pairs: &[(&str, &str)]) -> CapturedEvent {
        CapturedEvent {
            level: Level::INFO,
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_dispatch_event_accessors() {
        let e = event(&[
            (FIELD_OP, "dispatch"),
            (FIELD_EVENT, EVENT_DISPATCH),
            (FIELD_COMMAND, "save"),
            (FIELD_OUTCOME, OUTCOME_OK),
            (FIELD_URL, "https://x/p"),
        ]);

        assert!(e.is_dispatch_for("https://x/p"));
        assert!(!e.is_dispatch_for("https://x/q"));
        assert_eq!(e.command(), Some("save"));
        assert_eq!(e.outcome(), Some(OUTCOME_OK));
        assert_eq!(e.field("missing"), None);
    }

    #[test]
    fn test_op_event_and_duration() {
        let e = event(&[
            (FIELD_OP, "save_baseline"),
            (FIELD_EVENT, EVENT_END),
            (FIELD_DURATION_MS, "7"),
        ]);

        assert!(e.is_op_event("save_baseline", EVENT_END));
        assert!(!e.is_dispatch_for("https://x/p"));
        assert_eq!(e.duration_ms(), Some(7));
        assert_eq!(e.error_code(), None);
    }
}
