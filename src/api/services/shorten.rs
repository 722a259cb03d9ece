use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};

use crate::errors::SnipError;
use crate::services::Shortener;

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub id: String,
    pub short_url: String,
    pub url: String,
}

pub struct ShortenService {}

impl ShortenService {
    pub async fn post_shorten(
        payload: web::Json<ShortenRequest>,
        shortener: web::Data<Arc<Shortener>>,
    ) -> impl Responder {
        match shortener.shorten(&payload.url).await {
            Ok(link) => HttpResponse::Created().json(ShortenResponse {
                id: link.id,
                short_url: link.short_url,
                url: link.original_url,
            }),
            Err(e @ (SnipError::Validation(_) | SnipError::GenerationExhausted(_))) => {
                debug!("Shorten request rejected: {}", e);
                HttpResponse::BadRequest().json(json!({ "error": e.message() }))
            }
            Err(e) => {
                error!("Shorten request failed: {}", e);
                HttpResponse::InternalServerError().json(json!({ "error": e.message() }))
            }
        }
    }
}

/// Rewrite actix's JSON binding errors into the API error shape
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    let response = HttpResponse::BadRequest().json(json!({ "error": message }));
    InternalError::from_response(err, response).into()
}

/// Shorten 路由配置
pub fn shorten_routes() -> actix_web::Scope {
    web::scope("/api").route("/shorten", web::post().to(ShortenService::post_shorten))
}
