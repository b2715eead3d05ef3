//! Shared-secret authentication for the admin write endpoints.
//!
//! The check runs as middleware in front of the handlers, so an unauthorized
//! request is answered with `401` before its body is read or validated.

use crate::error::{Result, WallError};
use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{web, HttpRequest, ResponseError};
use log::warn;
use std::fmt;

/// Header carrying the shared secret on admin write requests.
pub const ADMIN_HEADER: &str = "x-admin-password";

/// The admin shared secret. Kept out of `Debug` output.
#[derive(Clone)]
pub struct AdminSecret(String);

impl AdminSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        AdminSecret(secret.into())
    }

    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), candidate.as_bytes())
    }

    /// Checks the `x-admin-password` header of a request.
    pub fn authorize(&self, req: &HttpRequest) -> Result<()> {
        let provided = req
            .headers()
            .get(ADMIN_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if self.matches(provided) {
            Ok(())
        } else {
            Err(WallError::Unauthorized)
        }
    }
}

impl fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminSecret(..)")
    }
}

/// Middleware rejecting requests without the admin secret.
///
/// Reads the [`AdminSecret`] registered as app data; without one, every
/// request is rejected. The rejection is a regular `401` response, so the
/// wrapped handler and its extractors never run.
pub async fn require_admin<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> std::result::Result<ServiceResponse<EitherBody<B>>, actix_web::Error> {
    let verdict = match req.app_data::<web::Data<AdminSecret>>() {
        Some(secret) => secret.authorize(req.request()),
        None => Err(WallError::Unauthorized),
    };
    if let Err(e) = verdict {
        warn!("Rejected admin request to {}", req.path());
        return Ok(req.into_response(e.error_response()).map_into_right_body());
    }
    next.call(req).await.map(ServiceResponse::map_into_left_body)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for i in 0..a.len() {
        diff |= a[i] ^ b[i];
    }
    diff == 0
}
