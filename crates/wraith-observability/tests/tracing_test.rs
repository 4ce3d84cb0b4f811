use wraith_core::config::ObservabilityConfig;
use wraith_observability::{events, init_tracing, init_tracing_with_filter};

#[test]
fn second_install_is_reported_not_panicking() {
    let first = init_tracing_with_filter("debug", false);
    let second = init_tracing(&ObservabilityConfig::default());
    // Only one global subscriber can exist per process.
    assert!(!(first && second));
}

#[test]
fn events_emit_without_subscriber_panicking() {
    events::session_created("session-ABC123");
    events::participant_joined("session-ABC123", "ana", 1);
    events::action_applied("session-ABC123", "mark_clue", 1, 1);
    events::action_rejected("session-ABC123", "unknown hypothesis");
    events::session_destroyed("session-ABC123", "explicit");
    events::sweep_completed("idle", 0, 0);
}

#[test]
fn sweep_span_builds() {
    let sweep = wraith_observability::sweep_span!(3usize);
    drop(sweep);
}
