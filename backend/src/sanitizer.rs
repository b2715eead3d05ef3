//! Normalization of admin-submitted wall entries.
//!
//! The admin panel posts whatever the operator typed. Every entry is turned
//! into a well-formed [`InfluencerRecord`] before it is stored: strings are
//! coerced, trimmed and truncated, follower counts are parsed, missing fields
//! are filled in. Nothing here rejects input; bad values degrade to empty
//! strings and zero counts.

use common::followers::parse_followers;
use common::model::dataset::{Settings, DEFAULT_GOAL_REACH};
use common::model::influencer::{InfluencerRecord, LinkKind, RecordId, SocialLinks};
use common::model::lenient::coerce_total_slots;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

pub const NAME_MAX_LEN: usize = 100;
pub const CATEGORY_MAX_LEN: usize = 50;
pub const LINK_MAX_LEN: usize = 500;

/// Sanitizes the entries of one admin save.
///
/// Entries without an id get `batch_millis + index`, so ids generated within
/// one batch never collide with each other.
#[derive(Debug, Clone, Copy)]
pub struct RecordSanitizer {
    batch_millis: u64,
}

impl RecordSanitizer {
    pub fn new(batch_millis: u64) -> Self {
        RecordSanitizer { batch_millis }
    }

    /// Uses the current wall clock as the id base.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        RecordSanitizer::new(millis)
    }

    /// Normalizes a single raw entry at position `index` of its batch.
    pub fn sanitize(&self, raw: &Value, index: usize) -> InfluencerRecord {
        let id = raw
            .get("id")
            .and_then(record_id)
            .unwrap_or_else(|| RecordId::Numeric(self.batch_millis.saturating_add(index as u64)));

        let mut social = SocialLinks::default();
        for kind in LinkKind::ALL {
            let url = raw.get("social").and_then(|links| links.get(kind.key()));
            social.set(kind, clean_text(url, LINK_MAX_LEN));
        }

        InfluencerRecord {
            id,
            name: clean_text(raw.get("name"), NAME_MAX_LEN),
            category: clean_text(raw.get("category"), CATEGORY_MAX_LEN),
            followers: raw.get("followers").map(parse_followers).unwrap_or(0),
            social,
        }
    }

    /// Normalizes every entry independently, preserving order.
    pub fn sanitize_batch(&self, raw: &[Value]) -> Vec<InfluencerRecord> {
        raw.iter()
            .enumerate()
            .map(|(index, entry)| self.sanitize(entry, index))
            .collect()
    }
}

/// Builds settings from an explicitly submitted settings object.
///
/// Returns `None` when `raw` is not an object, in which case the caller keeps
/// the stored settings. Fields missing from the object take their defaults.
pub fn sanitize_settings(raw: &Value) -> Option<Settings> {
    if !raw.is_object() {
        return None;
    }
    Some(Settings {
        goal_reach: raw
            .get("goalReach")
            .map(parse_followers)
            .unwrap_or(DEFAULT_GOAL_REACH),
        total_slots: coerce_total_slots(raw.get("totalSlots")),
    })
}

/// A caller-supplied id, if it is usable. Zero, empty and null ids are
/// treated as absent.
fn record_id(raw: &Value) -> Option<RecordId> {
    match raw {
        Value::Number(n) => {
            if let Some(id) = n.as_u64() {
                return (id != 0).then_some(RecordId::Numeric(id));
            }
            let float = n.as_f64()?;
            if float == 0.0 || !float.is_finite() {
                None
            } else if float > 0.0 && float.fract() == 0.0 && float < u64::MAX as f64 {
                Some(RecordId::Numeric(float as u64))
            } else {
                Some(RecordId::Text(n.to_string()))
            }
        }
        Value::String(s) if !s.is_empty() => Some(RecordId::Text(s.clone())),
        Value::Bool(true) => Some(RecordId::Text("true".to_string())),
        _ => None,
    }
}

/// Coerces a loose JSON value to display text, trimmed and cut to `max_len`
/// characters. Falsy and structured values become the empty string.
fn clean_text(raw: Option<&Value>, max_len: usize) -> String {
    let text = match raw {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => return String::new(),
    };
    truncate_chars(text, max_len)
}

fn truncate_chars(mut text: String, max_len: usize) -> String {
    if let Some((cut, _)) = text.char_indices().nth(max_len) {
        text.truncate(cut);
    }
    text
}
