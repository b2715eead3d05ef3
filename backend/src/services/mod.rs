//! HTTP surface of the wall. Each area registers its own `Scope`.

pub mod admin;
pub mod influencers;

use crate::error::WallError;
use actix_web::web;

/// Registers every route of the application.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(influencers::configure_routes())
        .service(admin::configure_routes());
}

/// JSON extractor settings: body size limit, and malformed bodies answered
/// with the same `{success: false, error}` shape as other failures.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| WallError::Structural(err.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::DeployNotifier;
    use crate::service::DatasetService;
    use crate::services::admin::auth::{AdminSecret, ADMIN_HEADER};
    use crate::storage::local::LocalFileStore;
    use crate::storage::memory::MemoryStore;
    use crate::storage::DatasetStore;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    const SECRET: &str = "letmein";

    fn app_data(store: Arc<dyn DatasetStore>) -> (web::Data<DatasetService>, web::Data<AdminSecret>) {
        (
            web::Data::new(DatasetService::new(store, DeployNotifier::disabled())),
            web::Data::new(AdminSecret::new(SECRET)),
        )
    }

    macro_rules! init_app {
        ($store:expr) => {{
            let (service, secret) = app_data($store);
            test::init_service(
                App::new()
                    .app_data(json_config(1024 * 1024))
                    .app_data(service)
                    .app_data(secret)
                    .configure(configure_app),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_admin_save_then_public_view() {
        let app = init_app!(Arc::new(MemoryStore::new()));

        let req = test::TestRequest::post()
            .uri("/api/admin/influencers")
            .insert_header((ADMIN_HEADER, SECRET))
            .set_json(json!({
                "influencers": [{ "name": "A".repeat(150), "followers": "1.2M" }]
            }))
            .to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["success"], true);
        assert_eq!(resp["settings"]["totalSlots"], 50);
        assert!(resp.get("message").is_none());

        let req = test::TestRequest::get().uri("/api/influencers").to_request();
        let view: Value = test::call_and_read_body_json(&app, req).await;
        let records = view["influencers"].as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"].as_str().unwrap().len(), 100);
        assert_eq!(records[0]["followersDisplay"], "1.2M");
        assert_eq!(records[0]["followers"], 1_200_000);
        assert_eq!(records[0]["social"]["website"], "");
        assert_eq!(view["stats"]["filledSlots"], 1);
        assert_eq!(view["stats"]["currentReachDisplay"], "1.2M");
        assert_eq!(view["stats"]["goalReachDisplay"], "150M");
    }

    #[actix_web::test]
    async fn test_admin_save_to_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("influencers.json");
        let app = init_app!(Arc::new(LocalFileStore::new(&path)));

        let req = test::TestRequest::post()
            .uri("/api/admin/influencers")
            .insert_header((ADMIN_HEADER, SECRET))
            .set_json(json!({
                "influencers": [{ "id": 11, "name": "Ana", "followers": "2,300" }],
                "settings": { "goalReach": "10M", "totalSlots": 20 }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let stored: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored["settings"], json!({ "goalReach": 10_000_000, "totalSlots": 20 }));
        assert_eq!(stored["influencers"][0]["id"], 11);
        assert_eq!(stored["influencers"][0]["followers"], 2_300);
        assert!(stored["influencers"][0].get("followersDisplay").is_none());
    }

    #[actix_web::test]
    async fn test_admin_save_requires_secret() {
        let app = init_app!(Arc::new(MemoryStore::new()));

        for header in [None, Some("wrong")] {
            let mut req = test::TestRequest::post()
                .uri("/api/admin/influencers")
                .set_json(json!({ "influencers": [] }));
            if let Some(value) = header {
                req = req.insert_header((ADMIN_HEADER, value));
            }
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[actix_web::test]
    async fn test_admin_save_rejects_non_array() {
        let app = init_app!(Arc::new(MemoryStore::new()));

        for body in [json!({ "influencers": { "name": "A" } }), json!({})] {
            let req = test::TestRequest::post()
                .uri("/api/admin/influencers")
                .insert_header((ADMIN_HEADER, SECRET))
                .set_json(body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["success"], false);
        }
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let app = init_app!(Arc::new(MemoryStore::new()));
        let req = test::TestRequest::post()
            .uri("/api/admin/influencers")
            .insert_header((ADMIN_HEADER, SECRET))
            .insert_header(("content-type", "application/json"))
            .set_payload("{ nope")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_secret_checked_before_body() {
        let app = init_app!(Arc::new(MemoryStore::new()));

        for uri in ["/api/admin/influencers", "/api/admin/settings"] {
            let req = test::TestRequest::post()
                .uri(uri)
                .insert_header(("content-type", "application/json"))
                .set_payload("{ nope")
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", uri);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["success"], false);
        }
    }

    #[actix_web::test]
    async fn test_persistence_failure_is_500_with_message() {
        let app = init_app!(Arc::new(MemoryStore::unreachable()));
        let req = test::TestRequest::post()
            .uri("/api/admin/influencers")
            .insert_header((ADMIN_HEADER, SECRET))
            .set_json(json!({ "influencers": [] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("connection refused"));
    }

    #[actix_web::test]
    async fn test_public_view_never_errors() {
        let app = init_app!(Arc::new(MemoryStore::unreachable()));
        let req = test::TestRequest::get().uri("/api/influencers").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let view: Value = test::read_body_json(resp).await;
        assert_eq!(view["stats"]["totalSlots"], 50);
        assert_eq!(view["influencers"], json!([]));
    }

    #[actix_web::test]
    async fn test_verify_password() {
        let app = init_app!(Arc::new(MemoryStore::new()));

        let req = test::TestRequest::post()
            .uri("/api/admin/verify")
            .set_json(json!({ "password": SECRET }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "success": true }));

        let req = test::TestRequest::post()
            .uri("/api/admin/verify")
            .set_json(json!({ "password": "guess" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "success": false, "error": "Invalid password" }));
    }

    #[actix_web::test]
    async fn test_settings_partial_update() {
        let app = init_app!(Arc::new(MemoryStore::new()));

        let req = test::TestRequest::post()
            .uri("/api/admin/settings")
            .insert_header((ADMIN_HEADER, SECRET))
            .set_json(json!({ "goalReach": "200M" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(
            body["settings"],
            json!({ "goalReach": 200_000_000, "totalSlots": 50 })
        );

        let req = test::TestRequest::post()
            .uri("/api/admin/settings")
            .insert_header((ADMIN_HEADER, SECRET))
            .set_json(json!({ "totalSlots": "64" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body["settings"],
            json!({ "goalReach": 200_000_000, "totalSlots": 64 })
        );

        let req = test::TestRequest::get().uri("/api/influencers").to_request();
        let view: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(view["stats"]["goalReachDisplay"], "200M");
        assert_eq!(view["stats"]["totalSlots"], 64);
    }

    #[actix_web::test]
    async fn test_settings_requires_secret() {
        let app = init_app!(Arc::new(MemoryStore::new()));
        let req = test::TestRequest::post()
            .uri("/api/admin/settings")
            .set_json(json!({ "totalSlots": 10 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
