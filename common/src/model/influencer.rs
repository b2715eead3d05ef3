use crate::model::lenient;
use serde::{Deserialize, Serialize};

/// Opaque identifier of a wall entry.
///
/// Entries created through the admin panel get a numeric id derived from the
/// save timestamp, while hand-edited data files may carry any string. Both
/// shapes are accepted and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Numeric(u64),
    Text(String),
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Numeric(0)
    }
}

/// The fixed set of social link slots shown on an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Instagram,
    Tiktok,
    Twitter,
    Youtube,
    Discord,
    Website,
}

impl LinkKind {
    pub const ALL: [LinkKind; 6] = [
        LinkKind::Instagram,
        LinkKind::Tiktok,
        LinkKind::Twitter,
        LinkKind::Youtube,
        LinkKind::Discord,
        LinkKind::Website,
    ];

    /// Field name used in the stored JSON document.
    pub fn key(self) -> &'static str {
        match self {
            LinkKind::Instagram => "instagram",
            LinkKind::Tiktok => "tiktok",
            LinkKind::Twitter => "twitter",
            LinkKind::Youtube => "youtube",
            LinkKind::Discord => "discord",
            LinkKind::Website => "website",
        }
    }
}

/// Social links of an entry. An empty string means the link is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    #[serde(deserialize_with = "lenient::text")]
    pub instagram: String,
    #[serde(deserialize_with = "lenient::text")]
    pub tiktok: String,
    #[serde(deserialize_with = "lenient::text")]
    pub twitter: String,
    #[serde(deserialize_with = "lenient::text")]
    pub youtube: String,
    #[serde(deserialize_with = "lenient::text")]
    pub discord: String,
    #[serde(deserialize_with = "lenient::text")]
    pub website: String,
}

impl SocialLinks {
    pub fn set(&mut self, kind: LinkKind, url: String) {
        let slot = match kind {
            LinkKind::Instagram => &mut self.instagram,
            LinkKind::Tiktok => &mut self.tiktok,
            LinkKind::Twitter => &mut self.twitter,
            LinkKind::Youtube => &mut self.youtube,
            LinkKind::Discord => &mut self.discord,
            LinkKind::Website => &mut self.website,
        };
        *slot = url;
    }
}

/// A single slot on the wall, as persisted.
///
/// Stored fields are read leniently: `null` text is empty, and fractional or
/// abbreviated follower counts are parsed rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluencerRecord {
    #[serde(deserialize_with = "lenient::record_id")]
    pub id: RecordId,
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(deserialize_with = "lenient::followers")]
    pub followers: u64,
    #[serde(deserialize_with = "lenient::object")]
    pub social: SocialLinks,
}
