use crate::{
    error::AppError,
    model::{
        employee::{EmployeeFields, EmployeeFilter},
        role::Role,
    },
    repository::employees,
    utils::params::{json_or_default, optional_flag, optional_id},
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

/// Body of both create and update; update replaces every field, so omitted
/// fields fall back to the same defaults as on create.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    #[serde(default)]
    #[schema(example = "Alice Martin")]
    pub name: String,

    #[serde(default, deserialize_with = "optional_id")]
    #[schema(example = 1, nullable = true, value_type = Option<i64>)]
    pub team_id: Option<i64>,

    #[serde(default)]
    #[schema(example = true)]
    pub epi_cert: bool,

    #[serde(default)]
    #[schema(example = false)]
    pub sst_cert: bool,

    #[serde(default = "default_true")]
    #[schema(example = true)]
    pub active: bool,

    #[serde(default)]
    pub role: Role,
}

impl From<EmployeePayload> for EmployeeFields {
    fn from(p: EmployeePayload) -> Self {
        Self {
            name: p.name,
            team_id: p.team_id,
            epi_cert: p.epi_cert,
            sst_cert: p.sst_cert,
            active: p.active,
            role: p.role,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EmployeeQuery {
    /// Only members of this team
    #[serde(default, deserialize_with = "optional_id")]
    #[param(value_type = Option<i64>)]
    pub team_id: Option<i64>,

    /// `true` or `false`
    #[serde(default, deserialize_with = "optional_flag")]
    #[param(value_type = Option<bool>)]
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetActive {
    #[serde(default = "default_true")]
    #[schema(example = false)]
    pub active: bool,
}

impl Default for SetActive {
    fn default() -> Self {
        Self { active: true }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActiveResponse {
    #[schema(example = 6)]
    pub id: i64,
    #[schema(example = false)]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Employees by name, with their team name", body = [crate::model::employee::Employee]),
        (status = 400, description = "Malformed filter", body = crate::error::ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = EmployeeFilter {
        team_id: query.team_id,
        active: query.active,
    };
    let employees = employees::list(pool.get_ref(), filter).await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = crate::model::employee::Employee),
        (status = 404, description = "Employee not found", body = crate::error::ErrorBody, example = json!({
            "error": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let employee = employees::find(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Create Employee
///
/// Also opens the employee's presence record, marked absent.
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeePayload,
    responses(
        (status = 201, description = "Employee created", body = crate::model::employee::Employee),
        (status = 400, description = "Name missing or unknown team", body = crate::error::ErrorBody, example = json!({
            "error": "Name is required"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, AppError> {
    let employee = employees::create(pool.get_ref(), payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(employee))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    request_body = EmployeePayload,
    responses(
        (status = 200, description = "Employee updated", body = crate::model::employee::Employee),
        (status = 400, description = "Name missing or unknown team", body = crate::error::ErrorBody),
        (status = 404, description = "Employee not found", body = crate::error::ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, AppError> {
    let employee =
        employees::update(pool.get_ref(), path.into_inner(), payload.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Employee and presence record deleted"),
        (status = 404, description = "Employee not found", body = crate::error::ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    employees::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Activate or deactivate an Employee
#[utoipa::path(
    patch,
    path = "/api/employees/{id}/activate",
    params(("id", Path, description = "Employee ID")),
    request_body(content = SetActive, description = "Optional; an empty body activates"),
    responses(
        (status = 200, description = "Activation changed", body = ActiveResponse),
        (status = 404, description = "Employee not found", body = crate::error::ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn set_employee_active(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let SetActive { active } = json_or_default(&body)?;
    employees::set_active(pool.get_ref(), id, active).await?;
    Ok(HttpResponse::Ok().json(ActiveResponse { id, active }))
}
