//! SessionStore: concurrent per-session access via DashMap.
//!
//! The map only hands out `Arc<SessionHandle>`s; the session itself sits
//! behind the handle's own mutex. A handle whose slot is `None` has been
//! retired: anyone still holding it gets `SessionExpired`, and the map
//! entry is replaced on the next `get_or_create`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::time::Instant;

use wraith_core::catalog::Catalog;
use wraith_core::config::SessionConfig;
use wraith_core::errors::SessionError;
use wraith_observability::events;

use crate::session::Session;

/// Exclusive access point for one session.
#[derive(Debug)]
pub struct SessionHandle {
    id: String,
    state: Mutex<Option<Session>>,
}

impl SessionHandle {
    fn new(session: Session) -> Self {
        Self {
            id: session.id().to_string(),
            state: Mutex::new(Some(session)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Run `f` with the session locked. Fails with `SessionExpired` when the
    /// session was reclaimed after this handle was obtained.
    pub fn with_session<T>(&self, f: impl FnOnce(&mut Session) -> T) -> Result<T, SessionError> {
        let mut guard = self.lock();
        match guard.as_mut() {
            Some(session) => Ok(f(session)),
            None => Err(SessionError::SessionExpired {
                session_id: self.id.clone(),
            }),
        }
    }

    /// Point-in-time copy of the whole session.
    pub fn snapshot(&self) -> Result<Session, SessionError> {
        self.with_session(|s| s.clone())
    }

    pub fn is_retired(&self) -> bool {
        self.lock().is_none()
    }

    // Every mutation is validated before it touches state, so a poisoned
    // lock still guards a consistent session.
    fn lock(&self) -> MutexGuard<'_, Option<Session>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// In-memory table of live sessions.
pub struct SessionStore {
    sessions: DashMap<String, Arc<SessionHandle>>,
    catalog: Arc<Catalog>,
    config: SessionConfig,
}

impl SessionStore {
    pub fn new(catalog: Arc<Catalog>, config: SessionConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            catalog,
            config,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Return the session for `session_id`, creating it with default state
    /// if absent. Refreshes `last_accessed_at` either way. Never fails.
    pub fn get_or_create(&self, session_id: &str) -> Arc<SessionHandle> {
        loop {
            let (handle, created) = self.entry(session_id);
            let now = Instant::now();
            if handle.with_session(|s| s.touch(now)).is_ok() {
                if created {
                    events::session_created(session_id);
                }
                return handle;
            }
            // Retired between lookup and lock; drop the stale entry and retry.
            self.sessions
                .remove_if(session_id, |_, current| Arc::ptr_eq(current, &handle));
        }
    }

    /// Create `session_id` only if no entry for it exists. `None` when the
    /// id is already taken, even by a session that is being retired.
    pub fn create_new(&self, session_id: &str) -> Option<Arc<SessionHandle>> {
        let handle = match self.sessions.entry(session_id.to_string()) {
            Entry::Occupied(_) => return None,
            Entry::Vacant(vacant) => {
                let handle = self.new_handle(session_id);
                vacant.insert(Arc::clone(&handle));
                handle
            }
        };
        events::session_created(session_id);
        Some(handle)
    }

    /// Return an existing session and refresh it. Never creates.
    pub fn get(&self, session_id: &str) -> Result<Arc<SessionHandle>, SessionError> {
        let not_found = || SessionError::SessionNotFound {
            session_id: session_id.to_string(),
        };
        let handle = self.peek(session_id).ok_or_else(not_found)?;
        let now = Instant::now();
        handle
            .with_session(|s| s.touch(now))
            .map_err(|_| not_found())?;
        Ok(handle)
    }

    /// Look up a handle without touching the session.
    pub fn peek(&self, session_id: &str) -> Option<Arc<SessionHandle>> {
        self.sessions.get(session_id).map(|r| Arc::clone(r.value()))
    }

    pub fn exists(&self, session_id: &str) -> bool {
        self.peek(session_id).is_some_and(|h| !h.is_retired())
    }

    /// Destroy a session. No-op when it does not exist.
    pub fn destroy(&self, session_id: &str) -> bool {
        match self.peek(session_id) {
            Some(handle) => self.retire_if(&handle, "explicit", |_| true),
            None => false,
        }
    }

    /// Retire `handle` if `predicate` holds for its session, checked under
    /// the session lock. Returns whether it was retired by this call.
    pub fn retire_if(
        &self,
        handle: &Arc<SessionHandle>,
        reason: &str,
        predicate: impl FnOnce(&Session) -> bool,
    ) -> bool {
        {
            let mut guard = handle.lock();
            if !guard.as_ref().is_some_and(predicate) {
                return false;
            }
            *guard = None;
        }
        self.sessions
            .remove_if(handle.id(), |_, current| Arc::ptr_eq(current, handle));
        events::session_destroyed(handle.id(), reason);
        true
    }

    /// Snapshot of every live handle. Shard guards are released before return.
    pub fn handles(&self) -> Vec<Arc<SessionHandle>> {
        self.sessions.iter().map(|r| Arc::clone(r.value())).collect()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn entry(&self, session_id: &str) -> (Arc<SessionHandle>, bool) {
        match self.sessions.entry(session_id.to_string()) {
            Entry::Occupied(occupied) => (Arc::clone(occupied.get()), false),
            Entry::Vacant(vacant) => {
                let handle = self.new_handle(session_id);
                vacant.insert(Arc::clone(&handle));
                (handle, true)
            }
        }
    }

    fn new_handle(&self, session_id: &str) -> Arc<SessionHandle> {
        let session = Session::new(
            session_id,
            &self.catalog,
            self.config.dedup_window,
            Instant::now(),
        );
        Arc::new(SessionHandle::new(session))
    }
}
