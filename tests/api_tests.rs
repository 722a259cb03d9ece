//! HTTP surface tests
//!
//! Drives the actix services the same way the server assembles them:
//! shorten, redirect, health, and the error contract around them.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};

use snip::api::services::shorten::json_error_handler;
use snip::api::services::{AppStartTime, health_routes, redirect_routes, shorten_routes};
use snip::services::Shortener;
use snip::storage::MemoryKvStore;

const BASE_URL: &str = "http://snip.test";

macro_rules! test_app {
    ($shortener:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($shortener.clone()))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .service(shorten_routes())
                .service(health_routes())
                .service(redirect_routes()),
        )
        .await
    };
}

fn new_shortener() -> Arc<Shortener> {
    Arc::new(Shortener::new(Arc::new(MemoryKvStore::new()), BASE_URL))
}

#[actix_web::test]
async fn test_post_shorten_creates_link() {
    let shortener = new_shortener();
    let app = test_app!(shortener);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(serde_json::json!({ "url": "https://example.com/abc" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], "g0XlPMM");
    assert_eq!(body["short_url"], "http://snip.test/g0XlPMM");
    assert_eq!(body["url"], "https://example.com/abc");
}

#[actix_web::test]
async fn test_post_shorten_is_idempotent() {
    let shortener = new_shortener();
    let app = test_app!(shortener);

    let mut short_urls = Vec::new();
    for _ in 0..2 {
        let req = TestRequest::post()
            .uri("/api/shorten")
            .set_json(serde_json::json!({ "url": "https://example.com/foo" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        short_urls.push(body["short_url"].as_str().unwrap().to_string());
    }

    assert_eq!(short_urls[0], short_urls[1]);
}

#[actix_web::test]
async fn test_post_shorten_rejects_invalid_urls() {
    let shortener = new_shortener();
    let app = test_app!(shortener);

    for bad in ["not-a-url", "ftp://x", ""] {
        let req = TestRequest::post()
            .uri("/api/shorten")
            .set_json(serde_json::json!({ "url": bad }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "input: {bad:?}");
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
}

#[actix_web::test]
async fn test_post_shorten_rejects_malformed_body() {
    let shortener = new_shortener();
    let app = test_app!(shortener);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_post_shorten_rejects_missing_url_field() {
    let shortener = new_shortener();
    let app = test_app!(shortener);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(serde_json::json!({ "link": "https://example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_redirect_returns_302_with_location() {
    let shortener = new_shortener();
    let app = test_app!(shortener);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(serde_json::json!({ "url": "https://example.com/abc" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let id = body["id"].as_str().unwrap();

    let req = TestRequest::get().uri(&format!("/{id}")).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "https://example.com/abc"
    );
}

#[actix_web::test]
async fn test_redirect_unknown_id_is_404() {
    let shortener = new_shortener();
    let app = test_app!(shortener);

    let req = TestRequest::get().uri("/doesnotexist").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not found");
}

#[actix_web::test]
async fn test_health_is_ok_without_store() {
    let shortener = new_shortener();
    let app = test_app!(shortener);

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}
