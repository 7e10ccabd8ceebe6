use super::{RepoResult, required_name};
use crate::error::AppError;
use crate::model::team::Team;
use sqlx::SqlitePool;
use tracing::info;

pub async fn list(pool: &SqlitePool) -> RepoResult<Vec<Team>> {
    let teams = sqlx::query_as::<_, Team>("SELECT id, name, is_active FROM teams ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(teams)
}

pub async fn find(pool: &SqlitePool, id: i64) -> RepoResult<Team> {
    sqlx::query_as::<_, Team>("SELECT id, name, is_active FROM teams WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(AppError::team_not_found)
}

/// Duplicate names surface as [`AppError::Conflict`] with the store's message.
pub async fn create(pool: &SqlitePool, name: &str, is_active: bool) -> RepoResult<Team> {
    let name = required_name(name)?;

    let team = sqlx::query_as::<_, Team>(
        "INSERT INTO teams (name, is_active) VALUES (?, ?) RETURNING id, name, is_active",
    )
    .bind(&name)
    .bind(is_active)
    .fetch_one(pool)
    .await?;

    info!(team_id = team.id, name = %team.name, "Team created");
    Ok(team)
}

/// Renames and/or toggles `is_active`. A `None` keeps the stored value.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: Option<&str>,
    is_active: Option<bool>,
) -> RepoResult<Team> {
    let name = name.map(required_name).transpose()?;

    let team = sqlx::query_as::<_, Team>(
        r#"
        UPDATE teams
        SET name = COALESCE(?, name), is_active = COALESCE(?, is_active)
        WHERE id = ?
        RETURNING id, name, is_active
        "#,
    )
    .bind(name)
    .bind(is_active)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(AppError::team_not_found)?;

    info!(team_id = id, name = %team.name, is_active = team.is_active, "Team updated");
    Ok(team)
}

/// Members of the team stay, with their `team_id` set to NULL by the schema.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM teams WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::team_not_found());
    }

    info!(team_id = id, "Team deleted");
    Ok(())
}
