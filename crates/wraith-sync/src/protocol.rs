//! JSON wire messages for socket or HTTP transports.
//!
//! Both directions are tagged by `"type"`. An action nested in
//! [`ClientMessage::Action`] carries its own `"type"` tag.

use serde::{Deserialize, Serialize};

use wraith_actions::AppliedResult;
use wraith_core::errors::ActionError;
use wraith_core::models::{Action, DedupToken, Identity, IdentityKey};

use crate::errors::{SyncError, TransportError};
use crate::view::SessionView;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Join {
        session_id: String,
        identity: Identity,
    },
    Action {
        session_id: String,
        identity: Identity,
        action: Action,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dedup: Option<DedupToken>,
    },
    Heartbeat {
        session_id: String,
        identity_key: IdentityKey,
    },
    Leave {
        session_id: String,
        identity_key: IdentityKey,
    },
}

impl ClientMessage {
    /// Decode a client frame. Unknown message or action tags are
    /// `InvalidAction`.
    pub fn decode(json: &str) -> Result<Self, ActionError> {
        serde_json::from_str(json).map_err(|e| ActionError::invalid(e.to_string()))
    }

    pub fn encode(&self) -> Result<String, TransportError> {
        serde_json::to_string(self).map_err(|e| TransportError::failure(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    SyncState { view: SessionView },
    ActionOk { result: AppliedResult },
    ActionRejected { error: SyncError },
    Error { message: String },
}

impl ServerMessage {
    pub fn decode(json: &str) -> Result<Self, TransportError> {
        serde_json::from_str(json).map_err(|e| TransportError::failure(e.to_string()))
    }

    pub fn encode(&self) -> Result<String, TransportError> {
        serde_json::to_string(self).map_err(|e| TransportError::failure(e.to_string()))
    }
}
