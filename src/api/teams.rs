use crate::api::error_response;
use crate::database::MongoDB;
use crate::models::Team;
use crate::services::team_service;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TeamQuery {
    pub status: Option<String>,
}

#[utoipa::path(
    get,
    path = "/teams",
    tag = "Teams",
    params(("status" = Option<String>, Query, description = "Exact-match status filter")),
    responses((status = 200, description = "All teams matching the filter"))
)]
pub async fn list_teams(db: web::Data<MongoDB>, query: web::Query<TeamQuery>) -> HttpResponse {
    match team_service::list_teams(&db, query.status.as_deref()).await {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/teams",
    tag = "Teams",
    responses((status = 200, description = "Insert result"))
)]
pub async fn create_team(db: web::Data<MongoDB>, team: web::Json<Team>) -> HttpResponse {
    match team_service::create_team(&db, team.into_inner()).await {
        Ok(inserted_id) => {
            HttpResponse::Ok().json(serde_json::json!({ "insertedId": inserted_id }))
        }
        Err(e) => error_response(e),
    }
}
