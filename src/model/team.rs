use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({ "id": 1, "name": "Sales", "isActive": true }))]
pub struct Team {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Sales")]
    pub name: String,

    /// Stored and returned, never used to filter.
    #[schema(example = true)]
    pub is_active: bool,
}
