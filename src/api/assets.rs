use crate::api::error_response;
use crate::database::MongoDB;
use crate::middleware::auth::claims_from_headers;
use crate::models::Asset;
use crate::services::{asset_service, user_service};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AssetQuery {
    #[serde(rename = "productType")]
    pub product_type: Option<String>,
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

#[utoipa::path(
    get,
    path = "/assets/productTypes",
    tag = "Assets",
    responses((status = 200, description = "Distinct productType values"))
)]
pub async fn product_types(db: web::Data<MongoDB>) -> HttpResponse {
    match asset_service::product_types(&db).await {
        Ok(types) => HttpResponse::Ok().json(types),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/assets",
    tag = "Assets",
    params(
        ("productType" = Option<String>, Query, description = "Exact-match product type"),
        ("searchTerm" = Option<String>, Query, description = "Case-insensitive substring of productName")
    ),
    responses((status = 200, description = "All assets matching the filter"))
)]
pub async fn list_assets(db: web::Data<MongoDB>, query: web::Query<AssetQuery>) -> HttpResponse {
    match asset_service::list_assets(
        &db,
        query.product_type.as_deref(),
        query.search_term.as_deref(),
    )
    .await
    {
        Ok(assets) => HttpResponse::Ok().json(assets),
        Err(e) => error_response(e),
    }
}

/// POST /assets - creating a listing takes the hr manager capability
#[utoipa::path(
    post,
    path = "/assets",
    tag = "Assets",
    responses(
        (status = 200, description = "Insert result"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller lacks the manager capability")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_asset(
    req: HttpRequest,
    db: web::Data<MongoDB>,
    asset: web::Json<Asset>,
) -> HttpResponse {
    let claims = match claims_from_headers(req.headers()) {
        Ok(claims) => claims,
        Err(e) => return error_response(e),
    };
    if let Err(e) = user_service::require_hr_manager(&db, &claims.email).await {
        return error_response(e);
    }

    log::info!("📦 POST /assets - {} by {}", asset.product_name, claims.email);

    match asset_service::create_asset(&db, asset.into_inner()).await {
        Ok(inserted_id) => {
            HttpResponse::Ok().json(serde_json::json!({ "insertedId": inserted_id }))
        }
        Err(e) => error_response(e),
    }
}

/// PUT /assets/{id} - approve the listing itself (status, not requestStatus)
#[utoipa::path(
    put,
    path = "/assets/{id}",
    tag = "Assets",
    params(("id" = String, Path, description = "Asset id")),
    responses(
        (status = 200, description = "Pre-update record, or null on no match"),
        (status = 400, description = "Malformed asset id")
    )
)]
pub async fn approve_listing(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    match asset_service::approve_listing(&db, &path.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/assets/{id}",
    tag = "Assets",
    params(("id" = String, Path, description = "Asset id")),
    responses(
        (status = 200, description = "Deleted record, or null on no match"),
        (status = 400, description = "Malformed asset id")
    )
)]
pub async fn delete_asset(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    match asset_service::delete_asset(&db, &path.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(e),
    }
}

/// PUT /assets/request/{id} - requestStatus := pending (no prior-state guard)
#[utoipa::path(
    put,
    path = "/assets/request/{id}",
    tag = "Assets",
    params(("id" = String, Path, description = "Asset id")),
    responses(
        (status = 200, description = "Pre-update record, or null on no match"),
        (status = 400, description = "Malformed asset id")
    )
)]
pub async fn request_asset(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    match asset_service::request_asset(&db, &path.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(e),
    }
}

/// PUT /assets/cancel/{id} - pending -> cancelled; null body when the guard
/// does not match (already cancelled, approved, or unknown id)
#[utoipa::path(
    put,
    path = "/assets/cancel/{id}",
    tag = "Assets",
    params(("id" = String, Path, description = "Asset id")),
    responses(
        (status = 200, description = "Pre-update record, or null when the request was not pending"),
        (status = 400, description = "Malformed asset id")
    )
)]
pub async fn cancel_request(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    match asset_service::cancel_request(&db, &path.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(e),
    }
}

/// PUT /assets/return/{id} - approved+returnable -> returned, quantity += 1
#[utoipa::path(
    put,
    path = "/assets/return/{id}",
    tag = "Assets",
    params(("id" = String, Path, description = "Asset id")),
    responses(
        (status = 200, description = "Pre-update record, or null when the guard fails"),
        (status = 400, description = "Malformed asset id")
    )
)]
pub async fn return_asset(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    match asset_service::return_asset(&db, &path.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(e),
    }
}
