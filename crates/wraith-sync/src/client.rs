//! Pull-mode client: polling with backoff and retried sends.
//!
//! The client never asks "what changed": each poll fetches the whole view
//! and the client compares it with the previous one itself.

use std::future::Future;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use wraith_actions::AppliedResult;
use wraith_core::config::SyncConfig;
use wraith_core::models::{Action, DedupToken, Identity, IdentityKey};

use crate::errors::{ClientError, SyncError, TransportError};
use crate::service::SyncService;
use crate::view::SessionView;

/// Whatever carries requests to a [`SyncService`].
pub trait SyncEndpoint {
    fn fetch_view(
        &self,
        session_id: &str,
        identity: &Identity,
    ) -> impl Future<Output = Result<SessionView, TransportError>> + Send;

    /// Outer error: the request did not get through. Inner error: the
    /// service answered and refused it.
    fn send_action(
        &self,
        session_id: &str,
        identity: &Identity,
        action: &Action,
        dedup: &DedupToken,
    ) -> impl Future<Output = Result<Result<AppliedResult, SyncError>, TransportError>> + Send;

    fn leave(
        &self,
        session_id: &str,
        key: &IdentityKey,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// In-process endpoint. Never fails at the transport level.
#[derive(Clone)]
pub struct LocalEndpoint {
    service: Arc<SyncService>,
}

impl LocalEndpoint {
    pub fn new(service: Arc<SyncService>) -> Self {
        Self { service }
    }
}

impl SyncEndpoint for LocalEndpoint {
    async fn fetch_view(
        &self,
        session_id: &str,
        identity: &Identity,
    ) -> Result<SessionView, TransportError> {
        Ok(self.service.get_view(session_id, identity))
    }

    async fn send_action(
        &self,
        session_id: &str,
        identity: &Identity,
        action: &Action,
        dedup: &DedupToken,
    ) -> Result<Result<AppliedResult, SyncError>, TransportError> {
        Ok(self
            .service
            .submit_action(session_id, identity, action, Some(dedup)))
    }

    async fn leave(&self, session_id: &str, key: &IdentityKey) -> Result<(), TransportError> {
        self.service.notify_disconnect(session_id, key);
        Ok(())
    }
}

/// What one poll observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    /// First view, or a view that differs from the previous one.
    StateChanged(SessionView),
    Unchanged,
    /// The poll failed. The next attempt waits `retry_in`.
    ConnectionLost { failures: u32, retry_in: Duration },
    /// A poll succeeded after one or more failures.
    ConnectionRestored(SessionView),
}

/// Polls one session on behalf of one identity.
pub struct PollingClient<E: SyncEndpoint> {
    endpoint: E,
    session_id: String,
    identity: Identity,
    config: SyncConfig,
    last: Option<SessionView>,
    failures: u32,
}

impl<E: SyncEndpoint> PollingClient<E> {
    pub fn new(endpoint: E, session_id: impl Into<String>, identity: Identity, config: SyncConfig) -> Self {
        Self {
            endpoint,
            session_id: session_id.into(),
            identity,
            config,
            last: None,
            failures: 0,
        }
    }

    /// Latest view received, if any.
    pub fn last_view(&self) -> Option<&SessionView> {
        self.last.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.failures == 0
    }

    /// Delay before the next poll: the regular interval while healthy,
    /// otherwise `base * 2^(failures - 1)` capped at the configured maximum.
    pub fn next_delay(&self) -> Duration {
        if self.failures == 0 {
            return self.config.poll_interval();
        }
        let exp = (self.failures - 1).min(16);
        let backoff = self.config.poll_backoff_base_ms.saturating_mul(1u64 << exp);
        Duration::from_millis(backoff.min(self.config.poll_backoff_max_ms))
    }

    /// Fetch once and classify the result.
    pub async fn poll_once(&mut self) -> PollEvent {
        match self
            .endpoint
            .fetch_view(&self.session_id, &self.identity)
            .await
        {
            Ok(view) => {
                let recovered = self.failures > 0;
                self.failures = 0;
                let changed = self.last.as_ref() != Some(&view);
                self.last = Some(view.clone());
                if recovered {
                    debug!(session_id = %self.session_id, "connection restored");
                    PollEvent::ConnectionRestored(view)
                } else if changed {
                    PollEvent::StateChanged(view)
                } else {
                    PollEvent::Unchanged
                }
            }
            Err(e) => {
                self.failures = self.failures.saturating_add(1);
                let retry_in = self.next_delay();
                warn!(
                    session_id = %self.session_id,
                    failures = self.failures,
                    retry_in_ms = retry_in.as_millis() as u64,
                    error = %e,
                    "poll failed"
                );
                PollEvent::ConnectionLost {
                    failures: self.failures,
                    retry_in,
                }
            }
        }
    }

    /// Poll until `on_event` breaks, sleeping [`PollingClient::next_delay`]
    /// between polls. Signals a best-effort leave on the way out.
    pub async fn run<F>(&mut self, mut on_event: F)
    where
        F: FnMut(PollEvent) -> ControlFlow<()>,
    {
        loop {
            let event = self.poll_once().await;
            if on_event(event).is_break() {
                break;
            }
            tokio::time::sleep(self.next_delay()).await;
        }
        self.leave().await;
    }

    /// Send `action`, retrying transport failures with one dedup token so
    /// the service applies it at most once. A refusal from the service is
    /// returned immediately.
    pub async fn send_with_retry(&self, action: &Action) -> Result<AppliedResult, ClientError> {
        let token = DedupToken::new(uuid::Uuid::new_v4().to_string());
        let attempts = self.config.send_retries.max(1);
        let mut last = TransportError::Closed;
        for attempt in 1..=attempts {
            match self
                .endpoint
                .send_action(&self.session_id, &self.identity, action, &token)
                .await
            {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(refused)) => return Err(ClientError::Rejected(refused)),
                Err(e) => {
                    warn!(
                        session_id = %self.session_id,
                        attempt,
                        error = %e,
                        "action send failed"
                    );
                    last = e;
                    if attempt < attempts {
                        tokio::time::sleep(self.config.send_retry_delay()).await;
                    }
                }
            }
        }
        Err(ClientError::Unreachable { attempts, last })
    }

    /// Best-effort graceful leave. Errors are logged and swallowed.
    pub async fn leave(&self) {
        if let Err(e) = self
            .endpoint
            .leave(&self.session_id, &self.identity.key)
            .await
        {
            debug!(session_id = %self.session_id, error = %e, "leave not delivered");
        }
    }
}
