//! Aggregate figures shown above the wall grid.

use crate::followers::format_followers;
use crate::model::dataset::Dataset;
use crate::model::view::WallStats;

/// Derives the wall header figures from a dataset.
///
/// Pure function of its input. The declared slot count is reported as is,
/// even when it is smaller than the number of records.
pub fn aggregate(dataset: &Dataset) -> WallStats {
    let filled_slots = dataset.influencers.len();
    let total_slots = dataset.settings.total_slots;
    let current_reach = dataset
        .influencers
        .iter()
        .fold(0u64, |sum, record| sum.saturating_add(record.followers));
    let goal_reach = dataset.settings.goal_reach;

    WallStats {
        filled_slots,
        total_slots,
        available_slots: i64::from(total_slots) - filled_slots as i64,
        current_reach,
        current_reach_display: format_followers(current_reach),
        goal_reach,
        goal_reach_display: format_followers(goal_reach),
        progress_percent: progress_percent(current_reach, goal_reach),
    }
}

/// `current / goal * 100`, or 0 when there is no goal.
pub fn progress_percent(current_reach: u64, goal_reach: u64) -> f64 {
    if goal_reach == 0 {
        return 0.0;
    }
    current_reach as f64 / goal_reach as f64 * 100.0
}
