use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Orthogonal to team membership and certifications.
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    sqlx::Type,
    ToSchema,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    Employee,
    Visitor,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn wire_names_are_lowercase() {
        assert_eq!(Role::Visitor.as_ref(), "visitor");
        assert_eq!(Role::from_str("employee").unwrap(), Role::Employee);
        assert_eq!(serde_json::to_string(&Role::Visitor).unwrap(), "\"visitor\"");
        assert!(serde_json::from_str::<Role>("\"manager\"").is_err());
    }
}
