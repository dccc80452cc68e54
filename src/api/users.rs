use crate::api::error_response;
use crate::database::MongoDB;
use crate::models::User;
use crate::services::{token_service::Claims, user_service};
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct StatusUpdateRequest {
    pub owner: String,
}

#[utoipa::path(
    get,
    path = "/users/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses((status = 200, description = "User record, or null when unknown"))
)]
pub async fn get_user_by_email(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();

    match user_service::find_by_email(&db, &email).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(("status" = Option<String>, Query, description = "Exact-match status filter")),
    responses((status = 200, description = "All users matching the filter"))
)]
pub async fn list_users(db: web::Data<MongoDB>, query: web::Query<UserQuery>) -> HttpResponse {
    match user_service::list_users(&db, query.status.as_deref()).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Insert result; insertedId is null when the email already exists")
    )
)]
pub async fn create_user(db: web::Data<MongoDB>, user: web::Json<User>) -> HttpResponse {
    log::info!("📝 POST /users - email: {}", user.email);

    match user_service::create_user(&db, user.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(e),
    }
}

/// PUT /status_update/{id} - hr-gated acceptance of a join request
#[utoipa::path(
    put,
    path = "/status_update/{id}",
    tag = "Users",
    request_body = StatusUpdateRequest,
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Pre-update record, or null on no match"),
        (status = 400, description = "Malformed user id"),
        (status = 403, description = "Caller lacks the manager capability")
    ),
    security(("bearer_auth" = []))
)]
pub async fn accept_request(
    caller: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<StatusUpdateRequest>,
) -> HttpResponse {
    if let Err(e) = user_service::require_hr_manager(&db, &caller.email).await {
        return error_response(e);
    }

    match user_service::accept_request(&db, &path.into_inner(), &body.owner).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(e),
    }
}

/// DELETE /reject_request/{id} - hr-gated hard delete of a join request
#[utoipa::path(
    delete,
    path = "/reject_request/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted record, or null on no match"),
        (status = 400, description = "Malformed user id"),
        (status = 403, description = "Caller lacks the manager capability")
    ),
    security(("bearer_auth" = []))
)]
pub async fn reject_request(
    caller: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(e) = user_service::require_hr_manager(&db, &caller.email).await {
        return error_response(e);
    }

    match user_service::reject_request(&db, &path.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/my_employees/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Owner (manager) email")),
    responses((status = 200, description = "Users whose owner equals the supplied email"))
)]
pub async fn my_employees(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    match user_service::my_employees(&db, &path.into_inner()).await {
        Ok(employees) => HttpResponse::Ok().json(employees),
        Err(e) => error_response(e),
    }
}
