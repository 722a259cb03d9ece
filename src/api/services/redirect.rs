use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};

use crate::errors::SnipError;
use crate::services::Shortener;

pub struct RedirectService {}

impl RedirectService {
    /// 短码跳转：302 到原始 URL
    ///
    /// Ids are opaque here: whatever the path segment holds is passed to
    /// the store unchanged, so an unknown or malformed id is just a miss.
    pub async fn handle_redirect(
        path: web::Path<String>,
        shortener: web::Data<Arc<Shortener>>,
    ) -> impl Responder {
        let id = path.into_inner();

        match shortener.resolve(&id).await {
            Ok(target) => HttpResponse::build(StatusCode::FOUND)
                .insert_header(("Location", target))
                .finish(),
            Err(SnipError::NotFound(_)) => {
                debug!("Redirect link not found: {}", id);
                HttpResponse::NotFound().json(json!({ "error": "not found" }))
            }
            Err(e) => {
                error!("Store error during redirect lookup: {}", e);
                HttpResponse::InternalServerError().json(json!({ "error": e.message() }))
            }
        }
    }
}

/// Redirect 路由配置
pub fn redirect_routes() -> actix_web::Scope {
    web::scope("")
        .route("/{id}", web::get().to(RedirectService::handle_redirect))
        .route("/{id}", web::head().to(RedirectService::handle_redirect))
}
