//! Configuration system for wraith.
//! TOML-based, 3-layer resolution: env > file > defaults.

pub mod defaults;

mod catalog_config;
mod observability_config;
mod presence_config;
mod session_config;
mod sync_config;
mod wraith_config;

pub use catalog_config::CatalogConfig;
pub use observability_config::ObservabilityConfig;
pub use presence_config::PresenceConfig;
pub use session_config::SessionConfig;
pub use sync_config::SyncConfig;
pub use wraith_config::WraithConfig;
