use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Presence tracking configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    /// Seconds without a heartbeat before a participant is dropped. Default: 1800.
    pub heartbeat_timeout_secs: u64,
}

impl PresenceConfig {
    pub fn heartbeat_timeout(&self) -> Duration {
        Duration::from_secs(self.heartbeat_timeout_secs)
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            heartbeat_timeout_secs: defaults::DEFAULT_HEARTBEAT_TIMEOUT_SECS,
        }
    }
}
