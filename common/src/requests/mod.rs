use crate::model::dataset::Settings;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request payload for `POST /api/admin/verify`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VerifyRequest {
    pub password: String,
}

/// Request payload for `POST /api/admin/influencers`.
///
/// Both fields are kept as raw JSON: the list is checked for shape and every
/// entry is sanitized server side, so nothing here is trusted.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminUpdateRequest {
    pub influencers: Value,
    pub settings: Option<Value>,
}

/// Request payload for `POST /api/admin/settings`. Only present fields change.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsRequest {
    pub goal_reach: Option<Value>,
    pub total_slots: Option<Value>,
}

/// Success body of the admin write endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AdminResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

impl AdminResponse {
    pub fn ok() -> Self {
        AdminResponse {
            success: true,
            message: None,
            settings: None,
        }
    }
}
