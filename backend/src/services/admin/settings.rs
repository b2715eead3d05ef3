//! # Wall Settings Service
//!
//! Handles `POST /api/admin/settings`, which changes the reach goal or the
//! declared slot count without touching the influencer list.
//!
//! ## Workflow
//!
//! 1.  The shared secret is checked by `auth::require_admin` before the body
//!     is parsed.
//! 2.  `DatasetService::update_settings` reads the stored document, changes the
//!     fields present in the body and writes it back with the read version.
//! 3.  The response carries the resulting settings.

use crate::service::DatasetService;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::requests::{AdminResponse, SettingsRequest};
use log::error;

/// Actix web handler for `POST /api/admin/settings`.
///
/// `goalReach` accepts the same forms as follower counts (`"150M"`), and
/// `totalSlots` falls back to 50 when it is not a positive integer.
pub async fn process(
    service: web::Data<DatasetService>,
    payload: web::Json<SettingsRequest>,
) -> impl Responder {
    match service
        .update_settings(payload.goal_reach.as_ref(), payload.total_slots.as_ref())
        .await
    {
        Ok(settings) => HttpResponse::Ok().json(AdminResponse {
            settings: Some(settings),
            ..AdminResponse::ok()
        }),
        Err(e) => {
            error!("Failed to save settings: {}", e);
            e.error_response()
        }
    }
}
