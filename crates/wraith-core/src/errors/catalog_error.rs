/// Catalog loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog has no hypotheses")]
    Empty,

    #[error("duplicate hypothesis id: {id}")]
    DuplicateHypothesis { id: String },

    #[error("hypothesis {id} lists {clue} as both evidence and decoy")]
    DecoyOverlapsEvidence { id: String, clue: String },

    #[error("failed to parse catalog {path}: {message}")]
    Parse { path: String, message: String },
}
