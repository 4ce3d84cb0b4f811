use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the hypothesis catalog comes from. `None` selects the built-in one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}
