/// Errors for operations addressed to a session that is not there.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The session was never created (join-existing-only requests).
    #[error("session not found: {session_id}")]
    SessionNotFound { session_id: String },

    /// The session existed but was reclaimed while the caller held it.
    #[error("session expired: {session_id}")]
    SessionExpired { session_id: String },
}
