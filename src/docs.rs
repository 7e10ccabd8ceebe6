use crate::api::employee::{ActiveResponse, EmployeePayload, SetActive};
use crate::api::presence::{PresenceResponse, SetPresence};
use crate::api::teams::{CreateTeam, UpdateTeam};
use crate::error::ErrorBody;
use crate::model::employee::Employee;
use crate::model::presence::{PresentEmployee, Summary, TeamPresence};
use crate::model::role::Role;
use crate::model::team::Team;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Store Presence API",
        version = "1.0.0",
        description = r#"
## Store presence tracker

Records who works in the store, which team they belong to, their EPI / SST
certifications and whether they are in today.

### Key Features
- **Teams**: create, rename, deactivate and delete teams
- **Employees**: manage employees and visitors, activate or deactivate them
- **Presence**: mark people present or absent, list who is in
- **Summary**: dashboard counters per team, per certification and for visitors

Only active employees count toward presence and the summary.

### Errors
Every error answers with `{ "error": "<message>" }`.
"#,
    ),
    paths(
        crate::api::health::health,

        crate::api::teams::list_teams,
        crate::api::teams::get_team,
        crate::api::teams::create_team,
        crate::api::teams::update_team,
        crate::api::teams::delete_team,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::set_employee_active,

        crate::api::presence::list_presence,
        crate::api::presence::set_presence,
        crate::api::presence::get_summary
    ),
    components(
        schemas(
            ErrorBody,
            Team,
            CreateTeam,
            UpdateTeam,
            Role,
            Employee,
            EmployeePayload,
            SetActive,
            ActiveResponse,
            PresentEmployee,
            SetPresence,
            PresenceResponse,
            TeamPresence,
            Summary
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Team", description = "Team management APIs"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Presence", description = "Presence marking and dashboard APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        for expected in [
            "/api/health",
            "/api/teams",
            "/api/teams/{id}",
            "/api/employees",
            "/api/employees/{id}",
            "/api/employees/{id}/activate",
            "/api/presence",
            "/api/presence/{employee_id}",
            "/api/summary",
        ] {
            assert!(paths.iter().any(|p| p == expected), "missing {expected}");
        }
    }
}
