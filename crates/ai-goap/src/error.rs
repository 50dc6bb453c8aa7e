#[cfg(feature = "catalog")]
use std::path::PathBuf;

use thiserror::Error;

use crate::action::ActionId;

/// Errors raised while registering actions or planning.
///
/// An unreachable goal is not an error: planning returns `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum GoapError {
    #[error("condition capacity of {capacity} exceeded while registering `{name}`")]
    ConditionCapacity { name: String, capacity: usize },

    #[error("unknown condition `{name}`")]
    UnknownCondition { name: String },

    #[error("action {id} was never registered with this planner")]
    UnknownAction { id: ActionId },

    #[error("action `{action}` has zero cost")]
    ZeroCost { action: String },

    #[error("search space exhausted: open/closed capacity of {capacity} nodes reached")]
    SearchSpaceExhausted { capacity: usize },

    #[cfg(feature = "catalog")]
    #[error("failed to read catalog at '{path}': {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "catalog")]
    #[error("invalid YAML catalog: {0}")]
    CatalogYaml(#[from] serde_yaml::Error),

    #[cfg(feature = "catalog")]
    #[error("invalid JSON catalog: {0}")]
    CatalogJson(#[from] serde_json::Error),

    #[cfg(feature = "catalog")]
    #[error("unsupported catalog format at '{path}' (expected .yaml, .yml or .json)")]
    CatalogFormat { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, GoapError>;
