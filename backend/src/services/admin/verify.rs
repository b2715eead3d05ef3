//! # Admin Login Check
//!
//! `POST /api/admin/verify` lets the admin panel test a password before it is
//! used for writes. The endpoint is not behind `auth::require_admin`; it
//! compares the submitted `password` with the configured secret in constant
//! time and answers `200 {success: true}` or `401 {success: false, error}`.

use crate::services::admin::auth::AdminSecret;
use actix_web::{web, HttpResponse, Responder};
use common::requests::VerifyRequest;
use log::{info, warn};

/// Actix web handler for `POST /api/admin/verify`.
///
/// Only the length of a rejected password is logged.
pub async fn process(
    secret: web::Data<AdminSecret>,
    payload: web::Json<VerifyRequest>,
) -> impl Responder {
    if secret.matches(&payload.password) {
        info!("Login successful");
        HttpResponse::Ok().json(serde_json::json!({ "success": true }))
    } else {
        warn!(
            "Login failed - received password length: {}",
            payload.password.len()
        );
        HttpResponse::Unauthorized().json(serde_json::json!({
            "success": false,
            "error": "Invalid password",
        }))
    }
}
