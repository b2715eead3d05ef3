//! # Public Wall Service
//!
//! Serves `GET /api/influencers`, the data behind the public wall page.
//!
//! ## Workflow
//!
//! 1.  `DatasetService::public_view` reads the stored document.
//! 2.  Stats are aggregated and every record gets its `followersDisplay` string.
//! 3.  The view is returned with `200 OK`. A failing store yields the default,
//!     empty wall rather than an error, so this endpoint never fails.

use crate::service::DatasetService;
use actix_web::{web, HttpResponse, Responder};

/// Actix web handler for `GET /api/influencers`.
pub async fn process(service: web::Data<DatasetService>) -> impl Responder {
    HttpResponse::Ok().json(service.public_view().await)
}
