//! # Influencer List Save Service
//!
//! Backend logic for `POST /api/admin/influencers`, the "Save" button of the
//! admin panel.
//!
//! ## Workflow
//!
//! 1.  **Authorization**: `auth::require_admin` has already checked the shared
//!     secret; unauthorized requests never reach this handler.
//!
//! 2.  **Body**: The JSON body is extracted into an `AdminUpdateRequest`. Its
//!     `influencers` and `settings` fields stay raw JSON values, since the
//!     panel posts whatever the operator typed.
//!
//! 3.  **Update**: `DatasetService::apply_admin_update` checks that
//!     `influencers` is an array, sanitizes every entry, merges the settings
//!     and writes the whole document against the version it read.
//!
//! 4.  **HTTP Response**: `200 OK` with the stored settings, plus a message when
//!     a redeploy was triggered. Conflicts and timeouts are logged as warnings
//!     since the operator can simply retry; other failures are errors.

use crate::service::DatasetService;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::requests::{AdminResponse, AdminUpdateRequest};
use log::{error, info, warn};

const REDEPLOY_MESSAGE: &str = "Saved! Site will redeploy shortly.";

/// Actix web handler for `POST /api/admin/influencers`.
///
/// # Returns
/// - `200 OK` with `{success: true, settings}` once the new list is persisted,
///   plus a `message` when a redeploy was triggered.
/// - The status of the `WallError` otherwise, with `{success: false, error}`.
pub async fn process(
    service: web::Data<DatasetService>,
    payload: web::Json<AdminUpdateRequest>,
) -> impl Responder {
    match service
        .apply_admin_update(&payload.influencers, payload.settings.as_ref())
        .await
    {
        Ok(outcome) => {
            info!("Admin save stored {} influencers", outcome.records);
            HttpResponse::Ok().json(AdminResponse {
                message: outcome
                    .redeploy_triggered
                    .then(|| REDEPLOY_MESSAGE.to_string()),
                settings: Some(outcome.settings),
                ..AdminResponse::ok()
            })
        }
        Err(e) => {
            if e.is_retryable() {
                warn!("Save not applied: {}", e);
            } else {
                error!("Save failed: {}", e);
            }
            e.error_response()
        }
    }
}
