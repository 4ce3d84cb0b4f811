//! Tracing setup: subscriber installation, span helpers, and event types.

pub mod events;
pub mod spans;

use tracing_subscriber::EnvFilter;
use wraith_core::config::ObservabilityConfig;

/// Environment variable holding a full `EnvFilter` directive.
pub const LOG_ENV: &str = "WRAITH_LOG";

/// Install the global subscriber.
///
/// `WRAITH_LOG` wins over `config.log_level` when set. Returns `false` if a
/// subscriber was already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    install(filter, config.json)
}

/// Install with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str, json: bool) -> bool {
    install(EnvFilter::new(filter), json)
}

fn install(filter: EnvFilter, json: bool) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if json {
        builder
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
            .is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
