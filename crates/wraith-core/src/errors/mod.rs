//! Error handling for wraith.
//! One error enum per concern, `thiserror` only.

mod action_error;
mod catalog_error;
mod config_error;
mod session_error;

pub use action_error::ActionError;
pub use catalog_error::CatalogError;
pub use config_error::ConfigError;
pub use session_error::SessionError;

/// Umbrella error for callers that do not care which subsystem failed.
#[derive(Debug, thiserror::Error)]
pub enum WraithError {
    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type WraithResult<T> = Result<T, WraithError>;
