//! Custom assertion helpers for testing
//!
//! These check the one-event-per-invocation contract against a
//! [`RecordingSink`].

use super::mock::RecordingSink;
use crate::passkey::PasskeyEvent;

/// Assert that exactly one event was delivered and that it matches
///
/// # Panics
///
/// Panics if the sink holds a different number of events or the event or
/// payload differ.
pub fn assert_single_event(sink: &RecordingSink, event: PasskeyEvent, payload: &str) {
    let events = sink.events();
    assert_eq!(
        events.len(),
        1,
        "Expected exactly one event, got {events:?}"
    );
    assert_eq!(events[0].0, event, "Wrong event delivered");
    assert_eq!(events[0].1, payload, "Wrong payload for {event}");
}

/// Assert that exactly one failure event with `code` was delivered
///
/// # Panics
///
/// Panics if the sink does not hold exactly that failure.
pub fn assert_single_failure(sink: &RecordingSink, event: PasskeyEvent, code: &str) {
    assert!(event.is_failure(), "{event} is not a failure event");
    assert_single_event(sink, event, code);
}

/// Assert that no event was delivered
///
/// # Panics
///
/// Panics if the sink holds any event.
pub fn assert_no_events(sink: &RecordingSink) {
    assert!(
        sink.is_empty(),
        "Expected no events, got {:?}",
        sink.events()
    );
}
