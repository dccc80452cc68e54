use crate::services::token_service;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct IdentityRequest {
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    request_body = IdentityRequest,
    responses(
        (status = 200, description = "Signed token, expires in 1h", body = TokenResponse)
    )
)]
pub async fn issue_token(request: web::Json<IdentityRequest>) -> HttpResponse {
    log::info!("🔐 POST /jwt - email: {}", request.email);

    match token_service::sign_token(&request.email, request.name.as_deref()) {
        Ok(token) => HttpResponse::Ok().json(TokenResponse { token }),
        Err(e) => {
            log::error!("❌ Token signing failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
