/// Rejection of a submitted action. Never leaves a partial mutation behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Unknown tag, malformed payload, or a value outside the catalog.
    #[error("invalid action: {reason}")]
    InvalidAction { reason: String },
}

impl ActionError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidAction {
            reason: reason.into(),
        }
    }
}
