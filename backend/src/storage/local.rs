//! Local JSON file backend.

use crate::error::{Result, WallError};
use crate::storage::{encode_dataset, DatasetStore, Snapshot, VersionToken};
use async_trait::async_trait;
use common::model::dataset::Dataset;
use log::{debug, warn};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Stores the wall document in a single JSON file.
///
/// Reads never fail: a missing or unreadable file, or one that is not JSON
/// at all, reads as the default document. Valid JSON with loosely typed
/// fields is kept and coerced field by field. Writes go to a temporary file in the same directory
/// which is then renamed over the target, so readers see either the old or
/// the new document, never a partial one. There is no version check;
/// concurrent writers race and the last rename wins.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    path: PathBuf,
}

impl LocalFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocalFileStore { path: path.into() }
    }
}

fn load(path: &Path) -> Dataset {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Error reading data file {:?}: {}; using defaults", path, e);
            return Dataset::default();
        }
    };
    match serde_json::from_str::<Value>(&text) {
        Ok(document) => Dataset::from_value(document),
        Err(e) => {
            warn!("Data file {:?} is not valid JSON: {}; using defaults", path, e);
            Dataset::default()
        }
    }
}

fn save(path: &Path, text: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(text.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl DatasetStore for LocalFileStore {
    async fn read(&self) -> Result<Snapshot> {
        let path = self.path.clone();
        let dataset = match tokio::task::spawn_blocking(move || load(&path)).await {
            Ok(dataset) => dataset,
            Err(e) => {
                warn!("Data file read task failed: {}; using defaults", e);
                Dataset::default()
            }
        };
        Ok(Snapshot {
            dataset,
            version: None,
        })
    }

    async fn write(
        &self,
        dataset: &Dataset,
        expected: Option<&VersionToken>,
    ) -> Result<Option<VersionToken>> {
        if let Some(token) = expected {
            debug!("Local store ignores version token {}", token);
        }

        let text = encode_dataset(dataset)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || save(&path, &text))
            .await
            .map_err(|e| WallError::Write(format!("Task join error: {}", e)))?
            .map_err(|e| {
                WallError::Write(format!("could not write {}: {}", self.path.display(), e))
            })?;
        Ok(None)
    }
}
