use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::GraphDexError;

pub fn to_pretty<T: Serialize>(value: &T) -> Result<String, GraphDexError> {
    Ok(serde_json::to_string_pretty(value)?)
}

async fn ensure_parent(path: &Path) -> Result<(), GraphDexError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(())
}

/// Writes records as a pretty-printed JSON array, creating parent directories.
pub async fn write_records<T: Serialize>(
    records: &[T],
    path: &Path,
) -> Result<(), GraphDexError> {
    ensure_parent(path).await?;
    tokio::fs::write(path, to_pretty(&records)?).await?;
    info!(count = records.len(), path = %path.display(), "Saved records");
    Ok(())
}

/// Writes one value as a pretty-printed JSON document.
pub async fn write_value<T: Serialize>(value: &T, path: &Path) -> Result<(), GraphDexError> {
    ensure_parent(path).await?;
    tokio::fs::write(path, to_pretty(value)?).await?;
    info!(path = %path.display(), "Saved document");
    Ok(())
}
