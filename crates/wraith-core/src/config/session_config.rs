use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Session lifecycle configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds without any access before a session is reclaimed. Default: 7200.
    pub idle_timeout_secs: u64,
    /// Seconds an empty session is kept alive for reconnects. Default: 30.
    pub empty_grace_secs: u64,
    /// Seconds between background sweeps. Default: 300.
    pub sweep_interval_secs: u64,
    /// Dedup tokens remembered per session. Default: 256.
    pub dedup_window: usize,
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn empty_grace(&self) -> Duration {
        Duration::from_secs(self.empty_grace_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: defaults::DEFAULT_IDLE_TIMEOUT_SECS,
            empty_grace_secs: defaults::DEFAULT_EMPTY_GRACE_SECS,
            sweep_interval_secs: defaults::DEFAULT_SWEEP_INTERVAL_SECS,
            dedup_window: defaults::DEFAULT_DEDUP_WINDOW,
        }
    }
}
