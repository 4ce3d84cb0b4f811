use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Transport-side configuration: push buffers, polling cadence, send retries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Views buffered per push subscriber before deliveries are dropped.
    pub subscriber_buffer: usize,
    pub poll_interval_ms: u64,
    /// Backoff after `n` consecutive failures is `base * 2^(n-1)`, capped at `max`.
    pub poll_backoff_base_ms: u64,
    pub poll_backoff_max_ms: u64,
    /// Attempts per logical action, including the first.
    pub send_retries: u32,
    pub send_retry_delay_ms: u64,
}

impl SyncConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn send_retry_delay(&self) -> Duration {
        Duration::from_millis(self.send_retry_delay_ms)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            subscriber_buffer: defaults::DEFAULT_SUBSCRIBER_BUFFER,
            poll_interval_ms: defaults::DEFAULT_POLL_INTERVAL_MS,
            poll_backoff_base_ms: defaults::DEFAULT_POLL_BACKOFF_BASE_MS,
            poll_backoff_max_ms: defaults::DEFAULT_POLL_BACKOFF_MAX_MS,
            send_retries: defaults::DEFAULT_SEND_RETRIES,
            send_retry_delay_ms: defaults::DEFAULT_SEND_RETRY_DELAY_MS,
        }
    }
}
