use crate::{
    error::AppError,
    repository::{presence, summary},
    utils::params::{json_or_default, optional_id},
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PresenceQuery {
    /// Only members of this team
    #[serde(default, deserialize_with = "optional_id")]
    #[param(value_type = Option<i64>)]
    pub team_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetPresence {
    #[serde(default = "default_true")]
    #[schema(example = true)]
    pub is_present: bool,
}

impl Default for SetPresence {
    fn default() -> Self {
        Self { is_present: true }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresenceResponse {
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = true)]
    pub is_present: bool,
}

fn default_true() -> bool {
    true
}

/// Who is in
///
/// Active employees currently marked present, by name.
#[utoipa::path(
    get,
    path = "/api/presence",
    params(PresenceQuery),
    responses(
        (status = 200, description = "Present employees", body = [crate::model::presence::PresentEmployee])
    ),
    tag = "Presence"
)]
pub async fn list_presence(
    pool: web::Data<SqlitePool>,
    query: web::Query<PresenceQuery>,
) -> Result<HttpResponse, AppError> {
    let rows = presence::list_present(pool.get_ref(), query.team_id).await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// Mark an Employee present or absent
#[utoipa::path(
    post,
    path = "/api/presence/{employee_id}",
    params(("employee_id", Path, description = "Employee ID")),
    request_body(content = SetPresence, description = "Optional; an empty body marks present"),
    responses(
        (status = 200, description = "Presence recorded", body = PresenceResponse),
        (status = 400, description = "Employee is inactive", body = crate::error::ErrorBody, example = json!({
            "error": "Employee is inactive"
        })),
        (status = 404, description = "Employee not found", body = crate::error::ErrorBody)
    ),
    tag = "Presence"
)]
pub async fn set_presence(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let SetPresence { is_present } = json_or_default(&body)?;
    let record = presence::set(pool.get_ref(), path.into_inner(), is_present).await?;
    Ok(HttpResponse::Ok().json(PresenceResponse {
        employee_id: record.employee_id,
        is_present: record.is_present,
    }))
}

/// Dashboard summary
#[utoipa::path(
    get,
    path = "/api/summary",
    responses(
        (status = 200, description = "Presence counters over active employees", body = crate::model::presence::Summary)
    ),
    tag = "Presence"
)]
pub async fn get_summary(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let summary = summary::summary(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(summary))
}
