#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::MemoryStore;
use serde_json::json;
use snapguard_core::logging_facility::test_capture::init_test_capture;
use snapguard_core::{Request, SnapguardConfig, FEATURE_LOGGING};
use snapguard_core_types::schema::{
    EVENT_END, FIELD_FINGERPRINT, FIELD_MISMATCH_COUNT, FIELD_REMOVED_COUNT, FIELD_REQUEST_ID,
    FIELD_SUFFIX, OUTCOME_FAIL, OUTCOME_OK,
};
use snapguard_engine::Dispatcher;

#[test]
fn test_one_dispatch_event_per_command() {
    // Given: Logging enabled (the default)
    let capture = init_test_capture();
    let dispatcher = Dispatcher::new(SnapguardConfig::default(), MemoryStore::default());
    let path = "/logging_unique_1";

    // When: A save is dispatched
    let outcome = dispatcher.dispatch(
        &Request::parse("https://x", path, "TEST=save"),
        &json!({"a": 1}),
        "pc",
    );

    // Then: Exactly one dispatch event with the canonical fields
    let events = capture.dispatch_events("https://x/logging_unique_1");
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.command(), Some("save"));
    assert_eq!(event.outcome(), Some(OUTCOME_OK));
    assert_eq!(event.field(FIELD_SUFFIX), Some("pc"));
    let expected_fp = outcome.fingerprint().unwrap().to_hex();
    assert_eq!(event.field(FIELD_FINGERPRINT), Some(expected_fp.as_str()));
    assert!(event.field(FIELD_REQUEST_ID).is_some());
}

#[test]
fn test_failed_assert_logs_fail_outcome() {
    let capture = init_test_capture();
    let dispatcher = Dispatcher::new(SnapguardConfig::default(), MemoryStore::default());

    dispatcher.dispatch(
        &Request::parse("https://x", "/logging_unique_2", "TEST=assert"),
        &json!({"a": 1}),
        "",
    );

    let events = capture.dispatch_events("https://x/logging_unique_2");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].command(), Some("assert"));
    assert_eq!(events[0].outcome(), Some(OUTCOME_FAIL));
}

#[test]
fn test_mismatched_assert_records_mismatch_count() {
    // Given: A saved baseline under a fingerprint only this test uses
    let capture = init_test_capture();
    let dispatcher = Dispatcher::new(SnapguardConfig::default(), MemoryStore::default());
    let request = |command: &str| {
        Request::parse("https://x", "/logging_unique_6", &format!("TEST={}", command))
    };
    let save = dispatcher.dispatch(&request("save"), &json!({"a": 1, "b": 2}), "");
    let fingerprint = save.fingerprint().unwrap().to_hex();

    // When: Two fields changed
    dispatcher.dispatch(&request("assert"), &json!({"a": 9, "b": 8}), "");

    // Then: The op end event for that fingerprint carries the count
    let end = capture
        .op_events("assert_baseline", EVENT_END)
        .into_iter()
        .find(|e| e.field(FIELD_FINGERPRINT) == Some(fingerprint.as_str()))
        .expect("assert end event");
    assert_eq!(end.field(FIELD_MISMATCH_COUNT), Some("2"));
}

#[test]
fn test_logging_feature_off_emits_no_dispatch_event() {
    let capture = init_test_capture();
    let config = SnapguardConfig::default().with_feature(FEATURE_LOGGING, false);
    let dispatcher = Dispatcher::new(config, MemoryStore::default());

    dispatcher.dispatch(
        &Request::parse("https://x", "/logging_unique_3", "TEST=save"),
        &json!({"a": 1}),
        "",
    );

    assert!(capture.dispatch_events("https://x/logging_unique_3").is_empty());
}

#[test]
fn test_skipped_dispatch_emits_no_dispatch_event() {
    let capture = init_test_capture();
    let dispatcher = Dispatcher::new(SnapguardConfig::default(), MemoryStore::default());

    dispatcher.dispatch(
        &Request::parse("https://x", "/logging_unique_4", "TEST=bogus"),
        &json!(null),
        "",
    );

    assert!(capture.dispatch_events("https://x/logging_unique_4").is_empty());
}

#[test]
fn test_clear_emits_op_end_with_removed_count() {
    let capture = init_test_capture();
    let store = MemoryStore::default();
    let dispatcher = Dispatcher::new(SnapguardConfig::default(), store.clone());
    dispatcher.dispatch(
        &Request::parse("https://x", "/logging_unique_5", "TEST=save"),
        &json!(1),
        "",
    );

    dispatcher.dispatch(
        &Request::parse("https://x", "/logging_unique_5", "TEST=clear"),
        &json!(null),
        "",
    );

    let ends = capture.op_events("clear_baselines", EVENT_END);
    assert!(ends.iter().any(|e| e.field(FIELD_REMOVED_COUNT).is_some()));
    assert_eq!(store.len(), 0);
    let clears = capture.dispatch_events("https://x/logging_unique_5");
    assert!(clears.iter().any(|e| e.command() == Some("clear")));
}
