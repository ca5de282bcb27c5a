//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── {stem}.json    # CatalogFile
//! └── {stem}.csv     # CSV backup
//! ```
//!
//! Every file is written to a `.tmp` sibling first and renamed into place,
//! so readers never observe a half-written export.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{Catalog, Resource};
use crate::storage::{CatalogFile, CatalogStorage, ExportOptions, WriteMetadata, render_csv};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(path)
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<PathBuf> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CatalogStorage for LocalStorage {
    async fn write_catalog(
        &self,
        catalog: &Catalog,
        options: &ExportOptions,
    ) -> Result<WriteMetadata> {
        let selected = options.select(catalog);
        let filtered_out = catalog.len() - selected.len();

        let csv_path = if options.csv_backup {
            let csv = render_csv(&selected);
            let path = self
                .write_bytes(&format!("{}.csv", options.file_stem), csv.as_bytes())
                .await?;
            Some(path)
        } else {
            None
        };

        let resources: Vec<Resource> = selected.into_iter().cloned().collect();
        let file = CatalogFile::new(resources, catalog.dropped, options.min_quality_score);
        let json_path = self
            .write_json(&format!("{}.json", options.file_stem), &file)
            .await?;

        log::info!(
            "Exported {} resources to {} ({} below filters)",
            file.count,
            json_path.display(),
            filtered_out
        );

        Ok(WriteMetadata {
            exported_count: file.count,
            filtered_out,
            json_path,
            csv_path,
            timestamp: file.generated_at,
        })
    }

    async fn load_catalog(&self, file_stem: &str) -> Result<Option<CatalogFile>> {
        let file = self.read_json(&format!("{file_stem}.json")).await?;
        if file.is_none() {
            log::warn!("No catalog found at {}", self.path(file_stem).display());
        }
        Ok(file)
    }
}
