//! Read-side shapes returned by the public endpoint.
//!
//! These are derived on every request from the stored [`Dataset`] and are
//! never persisted.
//!
//! [`Dataset`]: crate::model::dataset::Dataset

use crate::model::dataset::Settings;
use crate::model::influencer::InfluencerRecord;
use serde::{Deserialize, Serialize};

/// Aggregate figures for the wall header. Raw integers are kept next to
/// their display strings so clients can compute exact ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallStats {
    pub filled_slots: usize,
    pub total_slots: u32,
    /// `total_slots - filled_slots`; negative when the wall is over-full.
    pub available_slots: i64,
    pub current_reach: u64,
    pub current_reach_display: String,
    pub goal_reach: u64,
    pub goal_reach_display: String,
    /// Percentage of the goal reached, 0 when the goal is 0. Not clamped.
    pub progress_percent: f64,
}

/// A stored record plus its formatted follower count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoratedRecord {
    #[serde(flatten)]
    pub record: InfluencerRecord,
    pub followers_display: String,
}

/// Response body of `GET /api/influencers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicView {
    pub settings: Settings,
    pub stats: WallStats,
    pub influencers: Vec<DecoratedRecord>,
}
