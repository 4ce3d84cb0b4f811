use wraith_core::errors::{ActionError, SessionError, WraithError};

/// Why an action was not applied. Either way nothing was mutated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    #[error(transparent)]
    Invalid(#[from] ActionError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<ApplyError> for WraithError {
    fn from(err: ApplyError) -> Self {
        match err {
            ApplyError::Invalid(e) => WraithError::Action(e),
            ApplyError::Session(e) => WraithError::Session(e),
        }
    }
}
