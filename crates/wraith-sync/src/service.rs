//! SyncService: the transport-facing facade.
//!
//! Transports hand in a resolved identity with every call and get back full
//! views. Pull transports call [`SyncService::get_view`] on each poll; push
//! transports call [`SyncService::subscribe`] once and then read from the
//! returned [`Subscription`].

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, instrument};

use wraith_actions::{ActionProcessor, AppliedResult};
use wraith_core::catalog::Catalog;
use wraith_core::config::WraithConfig;
use wraith_core::errors::{SessionError, WraithError};
use wraith_core::models::{Action, DedupToken, Identity, IdentityKey};
use wraith_observability::events;
use wraith_presence::PresenceTracker;
use wraith_session::{SessionHandle, SessionStore};

use crate::errors::SyncError;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::push::{PushHub, Subscription};
use crate::view::SessionView;

/// Prefix of minted session ids.
pub const SESSION_PREFIX: &str = "session-";
const CODE_LEN: usize = 6;

/// A freshly minted session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionCode {
    pub session_id: String,
    /// The short code humans type to join.
    pub code: String,
}

/// Debug summary of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub version: u64,
    pub log_len: usize,
    pub marked_clues: usize,
    pub marked_hypotheses: usize,
    pub participants: usize,
    pub idle_secs: u64,
}

/// Whether a session is reachable, for transports deciding when to show
/// reconnection UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Active { participants: usize },
    /// Nobody in it, but still inside the grace period.
    Empty { idle_for: Duration },
    Missing,
}

pub struct SyncService {
    store: Arc<SessionStore>,
    presence: Arc<PresenceTracker>,
    processor: ActionProcessor,
    hub: Arc<PushHub>,
    config: WraithConfig,
}

impl SyncService {
    pub fn new(catalog: Arc<Catalog>, config: WraithConfig) -> Self {
        let store = Arc::new(SessionStore::new(
            Arc::clone(&catalog),
            config.session.clone(),
        ));
        let presence = Arc::new(PresenceTracker::new(
            Arc::clone(&store),
            config.session.empty_grace(),
        ));
        Self {
            store,
            presence,
            processor: ActionProcessor::new(catalog),
            hub: Arc::new(PushHub::new(config.sync.subscriber_buffer)),
            config,
        }
    }

    /// Build a service from configuration, loading the catalog it names.
    pub fn from_config(config: WraithConfig) -> Result<Self, WraithError> {
        config.validate()?;
        let catalog = Catalog::from_config(&config.catalog)?;
        Ok(Self::new(Arc::new(catalog), config))
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.store.catalog()
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn presence(&self) -> &Arc<PresenceTracker> {
        &self.presence
    }

    pub fn hub(&self) -> &Arc<PushHub> {
        &self.hub
    }

    pub fn config(&self) -> &WraithConfig {
        &self.config
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Full view for `requester`. Creates the session if it does not exist
    /// and counts as first contact / heartbeat for the requester.
    #[instrument(skip(self, requester), fields(identity_key = %requester.key))]
    pub fn get_view(&self, session_id: &str, requester: &Identity) -> SessionView {
        loop {
            let handle = self.store.get_or_create(session_id);
            if let Ok(view) = self.join_and_view(&handle, requester) {
                return view;
            }
        }
    }

    /// Join a session only if it already exists. Accepts either a full
    /// session id or the short code.
    #[instrument(skip(self, requester), fields(identity_key = %requester.key))]
    pub fn join_existing(
        &self,
        code_or_id: &str,
        requester: &Identity,
    ) -> Result<SessionView, SyncError> {
        let session_id = self.resolve_code(code_or_id);
        let handle = self.store.get(&session_id)?;
        Ok(self.join_and_view(&handle, requester)?)
    }

    /// Mint a new session with a fresh code.
    pub fn create_session(&self) -> SessionCode {
        loop {
            let code = mint_code();
            let session_id = format!("{SESSION_PREFIX}{code}");
            if self.store.create_new(&session_id).is_some() {
                return SessionCode { session_id, code };
            }
        }
    }

    pub fn session_info(&self, session_id: &str) -> Option<SessionInfo> {
        let handle = self.store.peek(session_id)?;
        let now = Instant::now();
        handle
            .with_session(|s| SessionInfo {
                session_id: s.id().to_string(),
                version: s.version(),
                log_len: s.log.len(),
                marked_clues: s.clues.marked_count(),
                marked_hypotheses: s.hypotheses.marked_count(),
                participants: s.participant_count(),
                idle_secs: s.idle_for(now).as_secs(),
            })
            .ok()
    }

    pub fn status(&self, session_id: &str) -> SessionStatus {
        let Some(handle) = self.store.peek(session_id) else {
            return SessionStatus::Missing;
        };
        let now = Instant::now();
        handle
            .with_session(|s| match s.empty_since() {
                None => SessionStatus::Active {
                    participants: s.participant_count(),
                },
                Some(since) => SessionStatus::Empty {
                    idle_for: now.saturating_duration_since(since),
                },
            })
            .unwrap_or(SessionStatus::Missing)
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Apply `action` for `requester` and push the resulting view to every
    /// subscriber. Fails with `SessionExpired` if the session is gone.
    #[instrument(skip(self, requester, action, dedup), fields(identity_key = %requester.key, kind = action.kind()))]
    pub fn submit_action(
        &self,
        session_id: &str,
        requester: &Identity,
        action: &Action,
        dedup: Option<&DedupToken>,
    ) -> Result<AppliedResult, SyncError> {
        // Rejected actions leave the roster alone too.
        if let Err(e) = self.processor.validate(action) {
            events::action_rejected(session_id, &e.to_string());
            return Err(e.into());
        }
        let handle = self
            .store
            .get(session_id)
            .map_err(|_| SyncError::SessionExpired {
                session_id: session_id.to_string(),
            })?;
        self.presence.join_handle(&handle, requester)?;
        let result = self.processor.apply(&handle, requester, action, dedup)?;
        if result.entries_appended > 0 {
            self.broadcast(&handle);
        }
        Ok(result)
    }

    /// Decode a JSON action and submit it.
    pub fn submit_json(
        &self,
        session_id: &str,
        requester: &Identity,
        json: &str,
        dedup: Option<&DedupToken>,
    ) -> Result<AppliedResult, SyncError> {
        let action = Action::from_json(json)?;
        self.submit_action(session_id, requester, &action, dedup)
    }

    /// Graceful departure. Best-effort: never fails, never blocks on I/O.
    pub fn notify_disconnect(&self, session_id: &str, key: &IdentityKey) {
        let remaining = self.presence.leave(session_id, key);
        debug!(session_id, identity_key = %key, remaining, "disconnect notified");
    }

    /// Register a push subscriber. The first view received is the initial
    /// sync; later ones follow every accepted action.
    #[instrument(skip(self, requester), fields(identity_key = %requester.key))]
    pub fn subscribe(&self, session_id: &str, requester: &Identity) -> Subscription {
        let subscription = Subscription::new(
            session_id,
            &requester.key,
            Arc::clone(&self.hub),
            Arc::clone(&self.presence),
        );
        let view = self.get_view(session_id, requester);
        subscription.seed(&view);
        subscription
    }

    /// Dispatch one decoded wire message. `None` means no reply is due.
    pub fn handle_message(&self, message: ClientMessage) -> Option<ServerMessage> {
        match message {
            ClientMessage::Join {
                session_id,
                identity,
            } => Some(ServerMessage::SyncState {
                view: self.get_view(&session_id, &identity),
            }),
            ClientMessage::Action {
                session_id,
                identity,
                action,
                dedup,
            } => Some(
                match self.submit_action(&session_id, &identity, &action, dedup.as_ref()) {
                    Ok(result) => ServerMessage::ActionOk { result },
                    Err(error) => ServerMessage::ActionRejected { error },
                },
            ),
            ClientMessage::Heartbeat {
                session_id,
                identity_key,
            } => {
                self.presence.heartbeat(&session_id, &identity_key);
                None
            }
            ClientMessage::Leave {
                session_id,
                identity_key,
            } => {
                self.notify_disconnect(&session_id, &identity_key);
                None
            }
        }
    }

    /// Abort pending grace timers. Sessions stay in memory.
    pub fn shutdown(&self) {
        self.presence.shutdown();
    }

    fn join_and_view(
        &self,
        handle: &Arc<SessionHandle>,
        requester: &Identity,
    ) -> Result<SessionView, SessionError> {
        self.presence.join_handle(handle, requester)?;
        handle.with_session(|s| SessionView::build(s, self.catalog(), Some(&requester.key)))
    }

    fn broadcast(&self, handle: &SessionHandle) {
        let Ok(view) = handle.with_session(|s| SessionView::build(s, self.catalog(), None)) else {
            return;
        };
        for key in self.hub.publish(&view) {
            self.presence.leave(&view.session_id, &key);
        }
    }

    fn resolve_code(&self, code_or_id: &str) -> String {
        let trimmed = code_or_id.trim();
        if self.store.exists(trimmed) || trimmed.starts_with(SESSION_PREFIX) {
            return trimmed.to_string();
        }
        format!("{SESSION_PREFIX}{}", trimmed.to_ascii_uppercase())
    }
}

fn mint_code() -> String {
    uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(CODE_LEN)
        .collect::<String>()
        .to_ascii_uppercase()
}
