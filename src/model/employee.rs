use crate::model::role::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employee row joined with its team's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 1,
        "name": "Alice Martin",
        "teamId": 1,
        "epiCert": true,
        "sstCert": false,
        "active": true,
        "role": "employee",
        "teamName": "Sales"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Alice Martin")]
    pub name: String,

    #[schema(example = 1, nullable = true)]
    pub team_id: Option<i64>,

    #[schema(example = true)]
    pub epi_cert: bool,

    #[schema(example = false)]
    pub sst_cert: bool,

    #[schema(example = true)]
    pub active: bool,

    pub role: Role,

    /// Null when the employee has no team.
    #[schema(example = "Sales", nullable = true)]
    pub team_name: Option<String>,
}

/// Writable fields of an employee, shared by create and full-replace update.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeFields {
    pub name: String,
    pub team_id: Option<i64>,
    pub epi_cert: bool,
    pub sst_cert: bool,
    pub active: bool,
    pub role: Role,
}

#[cfg(test)]
impl EmployeeFields {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team_id: None,
            epi_cert: false,
            sst_cert: false,
            active: true,
            role: Role::Employee,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeFilter {
    pub team_id: Option<i64>,
    pub active: Option<bool>,
}
