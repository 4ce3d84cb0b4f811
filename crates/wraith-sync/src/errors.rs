//! Errors surfaced to transports and clients.

use wraith_actions::ApplyError;
use wraith_core::errors::{ActionError, SessionError};

/// Outcome of a mutation or join-existing request that was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyncError {
    #[error("invalid action: {reason}")]
    InvalidAction { reason: String },

    #[error("session expired: {session_id}")]
    SessionExpired { session_id: String },

    #[error("session not found: {session_id}")]
    SessionNotFound { session_id: String },
}

impl From<ActionError> for SyncError {
    fn from(err: ActionError) -> Self {
        match err {
            ActionError::InvalidAction { reason } => Self::InvalidAction { reason },
        }
    }
}

impl From<SessionError> for SyncError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::SessionNotFound { session_id } => Self::SessionNotFound { session_id },
            SessionError::SessionExpired { session_id } => Self::SessionExpired { session_id },
        }
    }
}

impl From<ApplyError> for SyncError {
    fn from(err: ApplyError) -> Self {
        match err {
            ApplyError::Invalid(e) => e.into(),
            ApplyError::Session(e) => e.into(),
        }
    }
}

/// Delivery failure between a client and the service. Recovered by the
/// client through retry and backoff; never changes session state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("transport failure: {reason}")]
    TransportFailure { reason: String },

    #[error("transport closed")]
    Closed,
}

impl TransportError {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::TransportFailure {
            reason: reason.into(),
        }
    }
}

/// Error from [`crate::PollingClient::send_with_retry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The service answered and refused the action. Not retried.
    #[error(transparent)]
    Rejected(#[from] SyncError),

    /// Every attempt failed to reach the service.
    #[error("gave up after {attempts} attempts: {last}")]
    Unreachable { attempts: u32, last: TransportError },
}
