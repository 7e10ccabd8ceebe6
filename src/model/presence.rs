use crate::model::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the "who is in" list: an active employee currently marked present.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresentEmployee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Alice Martin")]
    pub name: String,

    pub role: Role,

    #[schema(example = 1, nullable = true)]
    pub team_id: Option<i64>,

    #[schema(example = "Sales", nullable = true)]
    pub team_name: Option<String>,

    #[schema(example = true)]
    pub is_present: bool,

    #[schema(value_type = String, format = DateTime, example = "2026-10-18T08:30:00Z")]
    pub updated_at: DateTime<Utc>,
}

/// Stored presence state of a single employee.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PresenceRecord {
    pub employee_id: i64,
    pub is_present: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamPresence {
    #[schema(example = 2)]
    pub team_id: i64,

    #[schema(example = "Operations")]
    pub team_name: String,

    #[schema(example = 1)]
    pub present_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "totalPresent": 3,
        "perTeam": [
            { "teamId": 2, "teamName": "Operations", "presentCount": 1 },
            { "teamId": 1, "teamName": "Sales", "presentCount": 1 },
            { "teamId": 3, "teamName": "Support", "presentCount": 0 }
        ],
        "epiPresent": 2,
        "sstPresent": 1,
        "visitorsPresent": 1
    })
)]
pub struct Summary {
    pub total_present: i64,
    pub per_team: Vec<TeamPresence>,
    pub epi_present: i64,
    pub sst_present: i64,
    pub visitors_present: i64,
}
