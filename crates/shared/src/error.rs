use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Area,
    PropertyGroup,
    Block,
    UnitType,
    Unit,
}

/// Nothing in this taxonomy is fatal to a browsing session: a `Parse`
/// failure renders an empty catalog and `NotFound` renders a distinct
/// not-found state instead of partial data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog document is not a mapping of areas: {0}")]
    Parse(String),
    #[error("{kind:?} '{key}' not found in catalog")]
    NotFound { kind: EntityKind, key: String },
}

impl CatalogError {
    pub fn not_found(kind: EntityKind, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }
}
