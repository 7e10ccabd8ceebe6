use crate::{error::AppError, repository::teams};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeam {
    #[serde(default)]
    #[schema(example = "Sales")]
    pub name: String,
    #[serde(default = "default_true")]
    #[schema(example = true)]
    pub is_active: bool,
}

/// Omitted fields keep their stored value.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeam {
    #[schema(example = "Retail")]
    pub name: Option<String>,
    #[schema(example = false)]
    pub is_active: Option<bool>,
}

fn default_true() -> bool {
    true
}

/// List teams
#[utoipa::path(
    get,
    path = "/api/teams",
    responses(
        (status = 200, description = "All teams, by name", body = [crate::model::team::Team])
    ),
    tag = "Team"
)]
pub async fn list_teams(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let teams = teams::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(teams))
}

/// Get Team by ID
#[utoipa::path(
    get,
    path = "/api/teams/{id}",
    params(("id", Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team found", body = crate::model::team::Team),
        (status = 404, description = "Team not found", body = crate::error::ErrorBody)
    ),
    tag = "Team"
)]
pub async fn get_team(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let team = teams::find(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(team))
}

/// Create Team
#[utoipa::path(
    post,
    path = "/api/teams",
    request_body = CreateTeam,
    responses(
        (status = 201, description = "Team created", body = crate::model::team::Team),
        (status = 400, description = "Name missing or already taken", body = crate::error::ErrorBody, example = json!({
            "error": "Name is required"
        }))
    ),
    tag = "Team"
)]
pub async fn create_team(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateTeam>,
) -> Result<HttpResponse, AppError> {
    let team = teams::create(pool.get_ref(), &payload.name, payload.is_active).await?;
    Ok(HttpResponse::Created().json(team))
}

/// Update Team
#[utoipa::path(
    put,
    path = "/api/teams/{id}",
    params(("id", Path, description = "Team ID")),
    request_body = UpdateTeam,
    responses(
        (status = 200, description = "Team updated", body = crate::model::team::Team),
        (status = 400, description = "Blank or duplicate name", body = crate::error::ErrorBody),
        (status = 404, description = "Team not found", body = crate::error::ErrorBody, example = json!({
            "error": "Team not found"
        }))
    ),
    tag = "Team"
)]
pub async fn update_team(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<UpdateTeam>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    let team = teams::update(
        pool.get_ref(),
        path.into_inner(),
        payload.name.as_deref(),
        payload.is_active,
    )
    .await?;
    Ok(HttpResponse::Ok().json(team))
}

/// Delete Team
///
/// Members are kept and left without a team.
#[utoipa::path(
    delete,
    path = "/api/teams/{id}",
    params(("id", Path, description = "Team ID")),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 404, description = "Team not found", body = crate::error::ErrorBody)
    ),
    tag = "Team"
)]
pub async fn delete_team(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    teams::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
