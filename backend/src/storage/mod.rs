//! # Dataset persistence
//!
//! The wall document is always read and written as a whole. Two backends sit
//! behind the [`DatasetStore`] trait:
//!
//! - [`local::LocalFileStore`]: a pretty-printed JSON file on disk, replaced
//!   atomically on every write. Single writer assumed; last write wins.
//! - [`github::GitHubContentStore`]: a file committed to a GitHub repository.
//!   Each read returns the blob sha as a [`VersionToken`] and each write must
//!   present it, so a write based on a stale read fails with
//!   [`WallError::Conflict`] instead of overwriting someone else's change.
//!
//! The backend is chosen once at startup by [`build_store`]; nothing else in
//! the crate looks at which one is active.

pub mod github;
pub mod local;
#[cfg(test)]
pub mod memory;

use crate::config::{Config, StorageBackend};
use crate::error::{Result, WallError};
use async_trait::async_trait;
use common::model::dataset::Dataset;
use std::fmt;
use std::fmt::Debug;
use std::sync::Arc;

/// Opaque version of the stored document, handed out by a read and required
/// by the following write.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionToken(String);

impl VersionToken {
    pub fn new(token: impl Into<String>) -> Self {
        VersionToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a read: the document and the version it was read at.
///
/// `version` is `None` when the backend does not version its content, or
/// when the document does not exist yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub dataset: Dataset,
    pub version: Option<VersionToken>,
}

/// Whole-document storage for the wall.
#[async_trait]
pub trait DatasetStore: Debug + Send + Sync {
    /// Loads the current document.
    async fn read(&self) -> Result<Snapshot>;

    /// Replaces the document.
    ///
    /// `expected` is the version from the read this write is based on.
    /// Versioned backends fail with [`WallError::Conflict`] when it is no
    /// longer current. Returns the new version, if the backend has one.
    async fn write(
        &self,
        dataset: &Dataset,
        expected: Option<&VersionToken>,
    ) -> Result<Option<VersionToken>>;
}

/// Builds the backend selected in the configuration.
pub fn build_store(config: &Config) -> Result<Arc<dyn DatasetStore>> {
    match config.storage {
        StorageBackend::Local => Ok(Arc::new(local::LocalFileStore::new(
            config.data_file.clone(),
        ))),
        StorageBackend::Github => {
            let token = config
                .github_token
                .clone()
                .ok_or_else(|| WallError::Config("GITHUB_TOKEN not configured".to_string()))?;
            let repo = config
                .github_repo
                .clone()
                .ok_or_else(|| WallError::Config("GITHUB_REPO not configured".to_string()))?;
            let store = github::GitHubContentStore::new(github::GitHubSettings {
                api_url: config.github_api_url.clone(),
                repo,
                file_path: config.github_file_path.clone(),
                branch: config.github_branch.clone(),
                token,
                timeout: config.remote_timeout(),
            })?;
            Ok(Arc::new(store))
        }
    }
}

/// Pretty-printed JSON, the on-disk and in-repo format of the document.
pub(crate) fn encode_dataset(dataset: &Dataset) -> Result<String> {
    let mut text = serde_json::to_string_pretty(dataset)?;
    text.push('\n');
    Ok(text)
}
