//! Empty-session grace timers.
//!
//! One pending timer per session at most. A timer carries the grace epoch
//! it was scheduled for and only destroys the session if, under the
//! session lock, the roster is still empty with that same epoch. Aborting
//! the task on rejoin is cleanup; the epoch check is what makes a late
//! firing harmless.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use wraith_observability::events;
use wraith_session::{SessionHandle, SessionStore};

struct PendingTimer {
    epoch: u64,
    task: JoinHandle<()>,
}

/// Pending grace timers keyed by session id.
#[derive(Clone, Default)]
pub struct GraceTimers {
    pending: Arc<DashMap<String, PendingTimer>>,
}

impl GraceTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a timer for `handle`'s current empty period.
    ///
    /// Must be called while holding the session lock, right after the
    /// roster dropped to zero. Outside a tokio runtime nothing is scheduled
    /// and the periodic empty sweep reclaims the session instead.
    pub fn schedule(
        &self,
        store: &Arc<SessionStore>,
        handle: &Arc<SessionHandle>,
        epoch: u64,
        grace: Duration,
    ) {
        let Ok(runtime) = Handle::try_current() else {
            debug!(session_id = %handle.id(), "no runtime; leaving empty session to the sweep");
            return;
        };
        let session_id = handle.id().to_string();
        let task = runtime.spawn(expire_after(
            Arc::clone(store),
            Arc::clone(handle),
            Arc::clone(&self.pending),
            epoch,
            grace,
        ));
        if let Some(previous) = self
            .pending
            .insert(session_id.clone(), PendingTimer { epoch, task })
        {
            previous.task.abort();
        }
        events::grace_scheduled(&session_id, grace.as_secs());
    }

    /// Abort the pending timer for `session_id`, if any.
    pub fn cancel(&self, session_id: &str) -> bool {
        match self.pending.remove(session_id) {
            Some((_, timer)) => {
                timer.task.abort();
                events::grace_cancelled(session_id);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, session_id: &str) -> bool {
        self.pending.contains_key(session_id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Abort every pending timer.
    pub fn cancel_all(&self) {
        self.pending.retain(|_, timer| {
            timer.task.abort();
            false
        });
    }
}

async fn expire_after(
    store: Arc<SessionStore>,
    handle: Arc<SessionHandle>,
    pending: Arc<DashMap<String, PendingTimer>>,
    epoch: u64,
    grace: Duration,
) {
    tokio::time::sleep(grace).await;
    store.retire_if(&handle, "grace_expired", |session| {
        session.is_empty() && session.grace_epoch() == epoch
    });
    pending.remove_if(handle.id(), |_, timer| timer.epoch == epoch);
}
