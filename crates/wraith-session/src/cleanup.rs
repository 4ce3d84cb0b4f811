//! Session lifecycle sweeps.
//!
//! Both sweeps decide under each session's own lock, so a session is never
//! destroyed in the middle of a mutation.

use std::time::Duration;

use tokio::time::Instant;
use wraith_observability::{events, sweep_span};

use crate::store::SessionStore;

/// Outcome of one sweep pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Sessions looked at.
    pub examined: usize,
    /// Ids of the sessions destroyed by this pass.
    pub removed: Vec<String>,
}

impl SweepReport {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

impl SessionStore {
    /// Destroy every session whose last access is older than `max_idle`.
    pub fn sweep_idle(&self, max_idle: Duration) -> SweepReport {
        self.sweep("idle", |session, now| session.idle_for(now) > max_idle)
    }

    /// Destroy every session whose roster has been empty for longer than
    /// `max_empty`.
    pub fn sweep_empty(&self, max_empty: Duration) -> SweepReport {
        self.sweep("empty", |session, now| {
            session
                .empty_since()
                .is_some_and(|since| now.saturating_duration_since(since) > max_empty)
        })
    }

    fn sweep<F>(&self, kind: &str, should_remove: F) -> SweepReport
    where
        F: Fn(&crate::session::Session, Instant) -> bool,
    {
        let handles = self.handles();
        let _span = sweep_span!(handles.len()).entered();
        let now = Instant::now();
        let mut report = SweepReport {
            examined: handles.len(),
            removed: Vec::new(),
        };
        for handle in handles {
            if self.retire_if(&handle, kind, |s| should_remove(s, now)) {
                report.removed.push(handle.id().to_string());
            }
        }
        events::sweep_completed(kind, report.removed.len(), self.len());
        report
    }
}
