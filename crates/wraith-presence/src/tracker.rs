//! PresenceTracker: join, leave, heartbeat and roster sync.
//!
//! Every roster change and the grace-timer bookkeeping it implies happen
//! inside one `with_session` call, so "count reached zero" and "timer
//! scheduled" (or "count left zero" and "timer cancelled") are atomic with
//! respect to other callers of the same session.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use wraith_core::errors::SessionError;
use wraith_core::models::{Identity, IdentityKey};
use wraith_observability::events;
use wraith_session::{Occupancy, SessionHandle, SessionStore};

use crate::grace::GraceTimers;

pub struct PresenceTracker {
    store: Arc<SessionStore>,
    grace: Duration,
    timers: GraceTimers,
}

impl PresenceTracker {
    /// Tracker over `store`; empty sessions are reclaimed `grace` after
    /// their last participant leaves.
    pub fn new(store: Arc<SessionStore>, grace: Duration) -> Self {
        Self {
            store,
            grace,
            timers: GraceTimers::new(),
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn grace(&self) -> Duration {
        self.grace
    }

    pub fn timers(&self) -> &GraceTimers {
        &self.timers
    }

    /// Add `identity` to the session, creating the session if needed.
    /// Idempotent. Returns the participant count afterwards.
    pub fn join(&self, session_id: &str, identity: &Identity) -> usize {
        loop {
            let handle = self.store.get_or_create(session_id);
            if let Ok(count) = self.join_handle(&handle, identity) {
                return count;
            }
        }
    }

    /// Add `identity` to an already-obtained session.
    pub fn join_handle(
        &self,
        handle: &Arc<SessionHandle>,
        identity: &Identity,
    ) -> Result<usize, SessionError> {
        let now = Instant::now();
        handle.with_session(|session| {
            if let Some(occupancy) = session.add_participant(identity.clone(), now) {
                self.on_occupancy(handle, occupancy);
                events::participant_joined(
                    handle.id(),
                    identity.key.as_str(),
                    session.participant_count(),
                );
            }
            session.touch(now);
            session.participant_count()
        })
    }

    /// Remove `key` from the session. Leaving a session that does not exist,
    /// or that the identity is not in, is a no-op.
    pub fn leave(&self, session_id: &str, key: &IdentityKey) -> usize {
        let Some(handle) = self.store.peek(session_id) else {
            return 0;
        };
        let now = Instant::now();
        handle
            .with_session(|session| {
                if let Some(occupancy) = session.remove_participant(key, now) {
                    self.on_occupancy(&handle, occupancy);
                    events::participant_left(
                        handle.id(),
                        key.as_str(),
                        session.participant_count(),
                    );
                }
                session.participant_count()
            })
            .unwrap_or(0)
    }

    /// Refresh `last_seen` for a participant already in the session.
    /// Returns `false` if the session or participant is unknown.
    pub fn heartbeat(&self, session_id: &str, key: &IdentityKey) -> bool {
        let Some(handle) = self.store.peek(session_id) else {
            return false;
        };
        let now = Instant::now();
        handle
            .with_session(|session| {
                let known = session.heartbeat(key, now);
                if known {
                    session.touch(now);
                }
                known
            })
            .unwrap_or(false)
    }

    /// Current participants ordered by identity key. Empty for unknown
    /// sessions.
    pub fn active_identities(&self, session_id: &str) -> Vec<Identity> {
        self.store
            .peek(session_id)
            .and_then(|handle| {
                handle
                    .with_session(|s| s.participants().map(|p| p.identity.clone()).collect())
                    .ok()
            })
            .unwrap_or_default()
    }

    pub fn count(&self, session_id: &str) -> usize {
        self.store
            .peek(session_id)
            .and_then(|handle| handle.with_session(|s| s.participant_count()).ok())
            .unwrap_or(0)
    }

    /// Replace the roster with an externally supplied list, creating the
    /// session if needed. Returns the participant count afterwards.
    pub fn sync_roster(&self, session_id: &str, roster: &[Identity]) -> usize {
        loop {
            let handle = self.store.get_or_create(session_id);
            let now = Instant::now();
            let result = handle.with_session(|session| {
                let occupancy = session.replace_participants(roster.iter().cloned(), now);
                self.on_occupancy(&handle, occupancy);
                session.participant_count()
            });
            if let Ok(count) = result {
                tracing::debug!(session_id = %session_id, count, "roster synced");
                return count;
            }
        }
    }

    /// Remove participants not heard from within `max_silence` across all
    /// sessions. Returns how many were removed.
    pub fn sweep_silent(&self, max_silence: Duration) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        for handle in self.store.handles() {
            let _ = handle.with_session(|session| {
                for key in session.silent_participants(max_silence, now) {
                    if let Some(occupancy) = session.remove_participant(&key, now) {
                        self.on_occupancy(&handle, occupancy);
                        events::participant_left(
                            handle.id(),
                            key.as_str(),
                            session.participant_count(),
                        );
                        removed += 1;
                    }
                }
            });
        }
        if removed > 0 {
            tracing::info!(removed, "silent participants swept");
        }
        removed
    }

    /// Abort every pending grace timer.
    pub fn shutdown(&self) {
        self.timers.cancel_all();
    }

    // Called with the session lock held.
    fn on_occupancy(&self, handle: &Arc<SessionHandle>, occupancy: Occupancy) {
        match occupancy {
            Occupancy::Unchanged => {}
            Occupancy::BecameOccupied => {
                self.timers.cancel(handle.id());
            }
            Occupancy::BecameEmpty { epoch } => {
                self.timers.schedule(&self.store, handle, epoch, self.grace);
            }
        }
    }
}
