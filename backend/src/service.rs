//! # Dataset service
//!
//! Orchestrates the read and write paths of the wall on top of a
//! [`DatasetStore`]. There is no cache: every call starts with a fresh read of
//! the store, and every admin write replaces the whole document using the
//! version token from that read.
//!
//! ## Read path
//! store read → [`aggregate`] → follower display strings → [`PublicView`].
//! A failing store degrades to the default document; the public page never
//! sees an error.
//!
//! ## Write path
//! shape check → store read (prior settings + version) → [`RecordSanitizer`]
//! → settings merge → conditional store write → deploy hook.
//! A conflict is returned to the caller as is; retrying would mean replaying
//! a full list that was edited against an outdated document.

use crate::deploy::DeployNotifier;
use crate::error::{Result, WallError};
use crate::sanitizer::{sanitize_settings, RecordSanitizer};
use crate::storage::{DatasetStore, Snapshot};
use common::followers::{format_followers, parse_followers};
use common::model::dataset::{Dataset, Settings};
use common::model::lenient::coerce_total_slots;
use common::model::view::{DecoratedRecord, PublicView};
use common::stats::aggregate;
use log::{info, warn};
use serde_json::Value;
use std::sync::Arc;

/// What an admin save did, for the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub records: usize,
    pub settings: Settings,
    pub redeploy_triggered: bool,
}

#[derive(Debug, Clone)]
pub struct DatasetService {
    store: Arc<dyn DatasetStore>,
    notifier: DeployNotifier,
}

impl DatasetService {
    pub fn new(store: Arc<dyn DatasetStore>, notifier: DeployNotifier) -> Self {
        DatasetService { store, notifier }
    }

    /// Builds the public page payload. Never fails.
    pub async fn public_view(&self) -> PublicView {
        let dataset = match self.store.read().await {
            Ok(snapshot) => snapshot.dataset,
            Err(e) => {
                warn!("Public view falling back to defaults: {}", e);
                Dataset::default()
            }
        };
        decorate(dataset)
    }

    /// Replaces the record list, and the settings when `raw_settings` is an
    /// object, with sanitized versions of the submitted values.
    pub async fn apply_admin_update(
        &self,
        raw_records: &Value,
        raw_settings: Option<&Value>,
    ) -> Result<SaveOutcome> {
        self.apply_admin_update_with(RecordSanitizer::now(), raw_records, raw_settings)
            .await
    }

    pub(crate) async fn apply_admin_update_with(
        &self,
        sanitizer: RecordSanitizer,
        raw_records: &Value,
        raw_settings: Option<&Value>,
    ) -> Result<SaveOutcome> {
        let Some(entries) = raw_records.as_array() else {
            return Err(WallError::Structural(
                "influencers must be an array".to_string(),
            ));
        };

        let Snapshot { dataset, version } = self.store.read().await?;
        let settings = raw_settings
            .and_then(sanitize_settings)
            .unwrap_or(dataset.settings);
        let next = Dataset {
            settings,
            influencers: sanitizer.sanitize_batch(entries),
        };

        self.store.write(&next, version.as_ref()).await?;

        Ok(SaveOutcome {
            records: next.influencers.len(),
            settings,
            redeploy_triggered: self.notifier.notify(),
        })
    }

    /// Changes only the settings fields that are present.
    pub async fn update_settings(
        &self,
        goal_reach: Option<&Value>,
        total_slots: Option<&Value>,
    ) -> Result<Settings> {
        let Snapshot {
            mut dataset,
            version,
        } = self.store.read().await?;

        if let Some(goal) = goal_reach {
            dataset.settings.goal_reach = parse_followers(goal);
        }
        if let Some(slots) = total_slots {
            dataset.settings.total_slots = coerce_total_slots(Some(slots));
        }

        self.store.write(&dataset, version.as_ref()).await?;
        info!(
            "Settings updated: goal {} / {} slots",
            dataset.settings.goal_reach, dataset.settings.total_slots
        );
        self.notifier.notify();
        Ok(dataset.settings)
    }
}

/// Attaches aggregate stats and display strings to a stored document.
pub fn decorate(dataset: Dataset) -> PublicView {
    let stats = aggregate(&dataset);
    let influencers = dataset
        .influencers
        .into_iter()
        .map(|record| DecoratedRecord {
            followers_display: format_followers(record.followers),
            record,
        })
        .collect();

    PublicView {
        settings: dataset.settings,
        stats,
        influencers,
    }
}
