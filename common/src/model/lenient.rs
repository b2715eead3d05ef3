//! Tolerant readers for the stored document.
//!
//! The data file is shared with hand edits and with older writers that stored
//! `null` categories or fractional follower counts. Any value that is valid
//! JSON must load without losing the rest of the document, so every stored
//! field is read through [`Value`] and coerced instead of rejected.

use crate::followers::parse_followers;
use crate::model::dataset::{DEFAULT_GOAL_REACH, DEFAULT_TOTAL_SLOTS};
use crate::model::influencer::{InfluencerRecord, RecordId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Converts an object into `T`, or gives `T::default()` for any other shape.
pub fn object_or_default<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    if value.is_object() {
        serde_json::from_value(value).unwrap_or_default()
    } else {
        T::default()
    }
}

/// Reads a slot count the way an integer form field is read: leading integer
/// digits of a string or the integer part of a number. Anything that does not
/// give a positive count falls back to the default of 50.
pub fn coerce_total_slots(raw: Option<&Value>) -> u32 {
    let parsed: Option<i64> = match raw {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => leading_integer(s),
        _ => None,
    };

    match parsed {
        Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => DEFAULT_TOTAL_SLOTS,
    }
}

fn leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Overflowing digit runs saturate instead of failing.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * magnitude)
}

pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        _ => String::new(),
    })
}

pub(crate) fn followers<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| parse_followers(&value))
}

pub(crate) fn record_id<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => match n.as_u64() {
            Some(id) => RecordId::Numeric(id),
            None => RecordId::Text(n.to_string()),
        },
        Value::String(s) => RecordId::Text(s),
        _ => RecordId::default(),
    })
}

pub(crate) fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Value::deserialize(deserializer).map(object_or_default)
}

pub(crate) fn records<'de, D>(deserializer: D) -> Result<Vec<InfluencerRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(object_or_default).collect(),
        _ => Vec::new(),
    })
}

pub(crate) fn goal_reach<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => DEFAULT_GOAL_REACH,
        value => parse_followers(&value),
    })
}

pub(crate) fn total_slots<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| coerce_total_slots(Some(&value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dataset::Dataset;
    use serde_json::json;

    #[test]
    fn test_total_slots_coercion() {
        assert_eq!(coerce_total_slots(Some(&json!(60))), 60);
        assert_eq!(coerce_total_slots(Some(&json!("75"))), 75);
        assert_eq!(coerce_total_slots(Some(&json!("12 slots"))), 12);
        assert_eq!(coerce_total_slots(Some(&json!(3.9))), 3);
        assert_eq!(coerce_total_slots(Some(&json!("abc"))), 50);
        assert_eq!(coerce_total_slots(Some(&json!(0))), 50);
        assert_eq!(coerce_total_slots(Some(&json!(-4))), 50);
        assert_eq!(coerce_total_slots(None), 50);
    }

    #[test]
    fn test_loose_records_are_kept() {
        let dataset = Dataset::from_value(json!({
            "settings": { "goalReach": 2.5e6, "totalSlots": "30" },
            "influencers": [
                { "id": 1, "name": "Ana", "category": null, "followers": 1200 },
                { "id": "b", "name": 7, "category": "Music", "followers": 1.5,
                  "social": null },
                { "id": null, "name": "Cy", "followers": "14.7M",
                  "social": { "instagram": null, "tiktok": "https://tiktok.com/@cy" } }
            ]
        }));

        assert_eq!(dataset.settings.goal_reach, 2_500_000);
        assert_eq!(dataset.settings.total_slots, 30);
        assert_eq!(dataset.influencers.len(), 3);

        let [ana, b, cy] = &dataset.influencers[..] else {
            panic!("expected three records");
        };
        assert_eq!(ana.category, "");
        assert_eq!(ana.followers, 1200);
        assert_eq!(b.id, RecordId::Text("b".to_string()));
        assert_eq!(b.name, "7");
        assert_eq!(b.followers, 2);
        assert_eq!(b.social.instagram, "");
        assert_eq!(cy.id, RecordId::default());
        assert_eq!(cy.followers, 14_700_000);
        assert_eq!(cy.social.instagram, "");
        assert_eq!(cy.social.tiktok, "https://tiktok.com/@cy");
    }

    #[test]
    fn test_wrong_shapes_degrade_per_field() {
        let dataset = Dataset::from_value(json!({
            "settings": null,
            "influencers": [ "not a record", { "name": "Dee" } ]
        }));
        assert_eq!(dataset.settings, Default::default());
        assert_eq!(dataset.influencers.len(), 2);
        assert_eq!(dataset.influencers[0], InfluencerRecord::default());
        assert_eq!(dataset.influencers[1].name, "Dee");

        let dataset = Dataset::from_value(json!({ "influencers": { "name": "Eve" } }));
        assert!(dataset.influencers.is_empty());

        assert_eq!(Dataset::from_value(json!([1, 2, 3])), Dataset::default());
    }

    #[test]
    fn test_null_goal_keeps_default() {
        let dataset = Dataset::from_value(json!({ "settings": { "goalReach": null } }));
        assert_eq!(dataset.settings.goal_reach, DEFAULT_GOAL_REACH);
        assert_eq!(dataset.settings.total_slots, DEFAULT_TOTAL_SLOTS);
    }
}
