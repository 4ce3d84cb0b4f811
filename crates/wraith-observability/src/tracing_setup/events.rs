//! Structured log events for session lifecycle, presence, and actions.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

pub fn session_created(session_id: &str) {
    tracing::info!(event = "session_created", session_id = %session_id, "session created");
}

/// `reason` is one of `idle`, `empty`, `grace_expired`, `explicit`.
pub fn session_destroyed(session_id: &str, reason: &str) {
    tracing::info!(
        event = "session_destroyed",
        session_id = %session_id,
        reason = %reason,
        "session destroyed"
    );
}

pub fn participant_joined(session_id: &str, identity_key: &str, active: usize) {
    tracing::info!(
        event = "participant_joined",
        session_id = %session_id,
        identity_key = %identity_key,
        active = active,
        "participant joined"
    );
}

pub fn participant_left(session_id: &str, identity_key: &str, active: usize) {
    tracing::info!(
        event = "participant_left",
        session_id = %session_id,
        identity_key = %identity_key,
        active = active,
        "participant left"
    );
}

pub fn grace_scheduled(session_id: &str, grace_secs: u64) {
    tracing::debug!(
        event = "grace_scheduled",
        session_id = %session_id,
        grace_secs = grace_secs,
        "empty-session grace timer scheduled"
    );
}

pub fn grace_cancelled(session_id: &str) {
    tracing::debug!(
        event = "grace_cancelled",
        session_id = %session_id,
        "empty-session grace timer cancelled"
    );
}

pub fn action_applied(session_id: &str, kind: &str, entries: usize, version: u64) {
    tracing::info!(
        event = "action_applied",
        session_id = %session_id,
        kind = %kind,
        entries = entries,
        version = version,
        "action applied"
    );
}

pub fn action_rejected(session_id: &str, reason: &str) {
    tracing::warn!(
        event = "action_rejected",
        session_id = %session_id,
        reason = %reason,
        "action rejected"
    );
}

pub fn action_replayed(session_id: &str, token: &str) {
    tracing::debug!(
        event = "action_replayed",
        session_id = %session_id,
        token = %token,
        "duplicate action ignored"
    );
}

pub fn subscriber_dropped(session_id: &str, identity_key: &str, reason: &str) {
    tracing::debug!(
        event = "subscriber_dropped",
        session_id = %session_id,
        identity_key = %identity_key,
        reason = %reason,
        "push subscriber dropped"
    );
}

pub fn sweep_completed(kind: &str, removed: usize, remaining: usize) {
    tracing::info!(
        event = "sweep_completed",
        kind = %kind,
        removed = removed,
        remaining = remaining,
        "sweep completed"
    );
}
