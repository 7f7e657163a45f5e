//! Catalog file loading and atomic persistence.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::Catalog;
use crate::error::SyncError;

/// Reads and writes `{locale}.json` catalogs under one directory.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    /// Directory holding the catalog files.
    dir: PathBuf,
}

impl CatalogStore {
    /// What: Create a store rooted at a catalog directory.
    ///
    /// Inputs:
    /// - `dir`: Directory containing `{locale}.json` files
    ///
    /// Output:
    /// - `CatalogStore` instance
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Catalog directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the catalog file for `locale`.
    #[must_use]
    pub fn path_for(&self, locale: &str) -> PathBuf {
        self.dir.join(format!("{locale}.json"))
    }

    /// What: Load a locale's catalog from disk.
    ///
    /// Inputs:
    /// - `locale`: Locale code
    ///
    /// Output:
    /// - `Catalog` in file key order
    ///
    /// # Errors
    /// - Returns `SyncError::CatalogRead` when the file is missing or unreadable
    /// - Returns `SyncError::CatalogRead` when the content is not a JSON object of entries
    ///
    /// Details:
    /// - Always reads from disk; nothing is cached between attempts.
    pub async fn load(&self, locale: &str) -> Result<Catalog, SyncError> {
        let path = self.path_for(locale);
        let contents =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| SyncError::CatalogRead {
                    path: path.clone(),
                    detail: e.to_string(),
                })?;
        let catalog: Catalog =
            serde_json::from_str(&contents).map_err(|e| SyncError::CatalogRead {
                path: path.clone(),
                detail: format!("invalid catalog JSON: {e}"),
            })?;
        tracing::debug!(
            locale = %locale,
            path = %path.display(),
            keys = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// What: Write a locale's catalog back to disk.
    ///
    /// Inputs:
    /// - `locale`: Locale code
    /// - `catalog`: Full catalog to serialize
    ///
    /// Output:
    /// - `Ok(())` once the new content is in place
    ///
    /// # Errors
    /// - Returns `SyncError::CatalogWrite` when the temporary file cannot be written or renamed
    ///
    /// Details:
    /// - Serializes as pretty JSON (2-space indent) into a temporary file in the
    ///   same directory, then renames it over the catalog so readers never see
    ///   a partial file.
    /// - An existing catalog keeps its permissions.
    pub async fn persist(&self, locale: &str, catalog: &Catalog) -> Result<(), SyncError> {
        let path = self.path_for(locale);
        let body = serde_json::to_string_pretty(catalog).map_err(|e| SyncError::CatalogWrite {
            path: path.clone(),
            source: std::io::Error::other(e),
        })?;
        let dir = self.dir.clone();
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&dir, &target, body.as_bytes()))
            .await
            .map_err(|e| SyncError::CatalogWrite {
                path: path.clone(),
                source: std::io::Error::other(e),
            })?
            .map_err(|source| SyncError::CatalogWrite {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(locale = %locale, path = %path.display(), "catalog persisted");
        Ok(())
    }
}

/// Write `bytes` to a temp file in `dir` and rename it onto `target`.
fn write_atomic(dir: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    // Temp files are created 0600; keep the mode the catalog already had.
    match std::fs::metadata(target) {
        Ok(meta) => tmp.as_file().set_permissions(meta.permissions())?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}
