//! Span definitions for background work.

/// Span around one background sweep pass.
#[macro_export]
macro_rules! sweep_span {
    ($sessions:expr) => {
        tracing::debug_span!("wraith.sweep", sessions = $sessions)
    };
}
