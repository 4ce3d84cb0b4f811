// Single source of truth for all default values.

// --- Session ---
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 2 * 60 * 60; // 2 hours
pub const DEFAULT_EMPTY_GRACE_SECS: u64 = 30;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 5 * 60;
pub const DEFAULT_DEDUP_WINDOW: usize = 256;

// --- Presence ---
pub const DEFAULT_HEARTBEAT_TIMEOUT_SECS: u64 = 30 * 60;

// --- Sync ---
pub const DEFAULT_SUBSCRIBER_BUFFER: usize = 64;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;
pub const DEFAULT_POLL_BACKOFF_BASE_MS: u64 = 1_000;
pub const DEFAULT_POLL_BACKOFF_MAX_MS: u64 = 10_000;
pub const DEFAULT_SEND_RETRIES: u32 = 3;
pub const DEFAULT_SEND_RETRY_DELAY_MS: u64 = 1_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = false;
