use crate::utils::AppError;
use actix_web::HttpResponse;

pub mod assets;
pub mod auth;
pub mod health;
pub mod payments;
pub mod swagger;
pub mod teams;
pub mod users;

/// Maps the service error taxonomy onto client-facing statuses. Guard
/// failures and not-found are NOT errors; they come back as 200 with a
/// null/zero-match body.
pub(crate) fn error_response(e: AppError) -> HttpResponse {
    match e {
        AppError::InvalidId(msg) | AppError::InvalidRequest(msg) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "message": msg }))
        }
        AppError::Unauthorized(msg) => {
            HttpResponse::Unauthorized().json(serde_json::json!({ "message": msg }))
        }
        AppError::Forbidden(_) => {
            HttpResponse::Forbidden().json(serde_json::json!({ "message": "forbidden access" }))
        }
        e => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e.to_string()
        })),
    }
}
