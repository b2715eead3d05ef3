use crate::model::influencer::InfluencerRecord;
use crate::model::lenient;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reach goal used when nothing has been stored yet.
pub const DEFAULT_GOAL_REACH: u64 = 150_000_000;
/// Declared grid capacity used when nothing has been stored yet.
pub const DEFAULT_TOTAL_SLOTS: u32 = 50;

/// Wall-wide settings edited from the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Target aggregate follower count.
    #[serde(deserialize_with = "lenient::goal_reach")]
    pub goal_reach: u64,
    /// Declared number of slots. Not tied to the number of records.
    #[serde(deserialize_with = "lenient::total_slots")]
    pub total_slots: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            goal_reach: DEFAULT_GOAL_REACH,
            total_slots: DEFAULT_TOTAL_SLOTS,
        }
    }
}

/// The whole persisted document. Record order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    #[serde(deserialize_with = "lenient::object")]
    pub settings: Settings,
    #[serde(deserialize_with = "lenient::records")]
    pub influencers: Vec<InfluencerRecord>,
}

impl Dataset {
    /// Builds a dataset from any parsed JSON document. Never fails: a
    /// document that is not an object is the default dataset, and fields of
    /// the wrong shape degrade one by one.
    pub fn from_value(value: Value) -> Self {
        lenient::object_or_default(value)
    }
}
