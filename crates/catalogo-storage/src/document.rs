use catalogo_core::{CatalogError, Result};
use std::path::Path;

/// Reads and parses a whole JSON document.
pub async fn read_json(path: &Path) -> Result<serde_json::Value> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CatalogError::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| CatalogError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
