//! In-process versioned store used by tests.
//!
//! Behaves like the GitHub backend: every write must present the version of
//! the read it is based on, and versions are content hashes.

use crate::error::{Result, WallError};
use crate::storage::{encode_dataset, DatasetStore, Snapshot, VersionToken};
use async_trait::async_trait;
use common::model::dataset::Dataset;
use md5::Context;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    current: RwLock<Option<(String, VersionToken)>>,
    unreachable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// A store whose every call fails, like a remote that cannot be reached.
    pub fn unreachable() -> Self {
        MemoryStore {
            unreachable: true,
            ..MemoryStore::default()
        }
    }

    pub async fn with_dataset(dataset: &Dataset) -> Self {
        let store = MemoryStore::new();
        store.write(dataset, None).await.unwrap();
        store
    }
}

fn content_hash(text: &str) -> VersionToken {
    let mut hasher = Context::new();
    hasher.consume(text.as_bytes());
    VersionToken::new(format!("{:x}", hasher.finalize()))
}

#[async_trait]
impl DatasetStore for MemoryStore {
    async fn read(&self) -> Result<Snapshot> {
        if self.unreachable {
            return Err(WallError::Read("connection refused".to_string()));
        }
        match self.current.read().await.as_ref() {
            Some((text, version)) => Ok(Snapshot {
                dataset: Dataset::from_value(serde_json::from_str(text)?),
                version: Some(version.clone()),
            }),
            None => Ok(Snapshot::default()),
        }
    }

    async fn write(
        &self,
        dataset: &Dataset,
        expected: Option<&VersionToken>,
    ) -> Result<Option<VersionToken>> {
        if self.unreachable {
            return Err(WallError::Write("connection refused".to_string()));
        }
        let mut current = self.current.write().await;
        let current_version = current.as_ref().map(|(_, version)| version);
        if current_version != expected {
            return Err(WallError::Conflict {
                expected: expected.map_or_else(|| "none".to_string(), |token| token.to_string()),
            });
        }

        let text = encode_dataset(dataset)?;
        let version = content_hash(&text);
        *current = Some((text, version.clone()));
        Ok(Some(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::influencer::InfluencerRecord;

    fn named(name: &str) -> Dataset {
        Dataset {
            influencers: vec![InfluencerRecord {
                name: name.to_string(),
                ..InfluencerRecord::default()
            }],
            ..Dataset::default()
        }
    }

    #[tokio::test]
    async fn test_second_writer_with_stale_version_conflicts() {
        let store = MemoryStore::with_dataset(&Dataset::default()).await;
        let stale = store.read().await.unwrap().version;
        assert!(stale.is_some());

        store.write(&named("first"), stale.as_ref()).await.unwrap();
        let err = store.write(&named("second"), stale.as_ref()).await.unwrap_err();
        assert!(matches!(err, WallError::Conflict { .. }));

        let snapshot = store.read().await.unwrap();
        assert_eq!(snapshot.dataset, named("first"));
    }

    #[tokio::test]
    async fn test_fresh_version_after_conflict_succeeds() {
        let store = MemoryStore::with_dataset(&named("first")).await;
        let stale = store.read().await.unwrap().version;
        store.write(&named("second"), stale.as_ref()).await.unwrap();

        assert!(store.write(&named("third"), stale.as_ref()).await.is_err());
        let fresh = store.read().await.unwrap().version;
        store.write(&named("third"), fresh.as_ref()).await.unwrap();
        assert_eq!(store.read().await.unwrap().dataset, named("third"));
    }

    #[tokio::test]
    async fn test_create_requires_no_version() {
        let store = MemoryStore::new();
        let bogus = VersionToken::new("deadbeef");
        assert!(store.write(&named("x"), Some(&bogus)).await.is_err());
        assert!(store.write(&named("x"), None).await.is_ok());
        assert!(store.write(&named("y"), None).await.is_err());
    }
}
