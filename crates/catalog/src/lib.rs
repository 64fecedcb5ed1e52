use std::{fs, path::Path};

use shared::{domain::Catalog, error::CatalogError};

pub mod aggregate;
pub mod listing;

/// Parses the fetched catalog document. Fails with [`CatalogError::Parse`]
/// when the document is not a mapping of areas; the calling shell renders an
/// empty catalog in that case rather than crashing.
pub fn load_document(raw: &str) -> Result<Catalog, CatalogError> {
    serde_json::from_str(raw).map_err(|err| CatalogError::Parse(err.to_string()))
}

/// Convenience for shells that read the document from a local path. A
/// missing or unreadable file is the same failure mode as a malformed one:
/// the catalog is unavailable.
pub fn load_file(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|err| {
        CatalogError::Parse(format!(
            "unreadable catalog document '{}': {err}",
            path.display()
        ))
    })?;
    load_document(&raw)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
