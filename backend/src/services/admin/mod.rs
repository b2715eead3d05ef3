//! # Admin Service Module
//!
//! Endpoints used by the admin panel. Everything except `/verify` requires the
//! shared secret in the `x-admin-password` header, checked by
//! `auth::require_admin` before the request body is read.
//!
//! ## Sub-modules:
//! - `auth`: Shared-secret check used by the write endpoints.
//! - `verify`: Password check behind the admin login form.
//! - `save`: Replaces the full influencer list (and optionally the settings).
//! - `settings`: Partial update of the wall settings.

pub mod auth;
mod save;
mod settings;
mod verify;

use actix_web::middleware::from_fn;
use actix_web::web::{post, resource, scope};
use actix_web::Scope;

/// The base path for all admin endpoints.
const API_PATH: &str = "/api/admin";

/// Configures and returns the Actix `Scope` for the admin routes.
///
/// # Registered Routes:
///
/// *   **`POST /verify`**:
///     - **Handler**: `verify::process`
///     - **Description**: Body `{password}`. Answers `200 {success: true}` or
///       `401 {success: false, error}`.
///
/// *   **`POST /influencers`**:
///     - **Handler**: `save::process`
///     - **Description**: Body `{influencers: [...], settings?: {...}}`. Every entry is
///       sanitized and the whole list replaces the stored one. `400` when `influencers`
///       is not an array, `409` when the stored document changed since it was read,
///       `504` when the remote store timed out, `500` for other persistence failures.
///
/// *   **`POST /settings`**:
///     - **Handler**: `settings::process`
///     - **Description**: Body `{goalReach?, totalSlots?}`. Only present fields change.
///       Returns the resulting settings.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/verify", post().to(verify::process))
        .service(
            resource("/influencers")
                .wrap(from_fn(auth::require_admin))
                .route(post().to(save::process)),
        )
        .service(
            resource("/settings")
                .wrap(from_fn(auth::require_admin))
                .route(post().to(settings::process)),
        )
}
