use super::RepoResult;
use crate::error::AppError;
use crate::model::presence::{PresenceRecord, PresentEmployee};
use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::{debug, info};

/// Opens an absent presence row for a new employee. An existing row is left
/// untouched, so this can be retried freely.
///
/// Returns whether a row was inserted.
pub async fn ensure_record<'e, E>(executor: E, employee_id: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "INSERT OR IGNORE INTO presence (employee_id, is_present, updated_at) VALUES (?, 0, ?)",
    )
    .bind(employee_id)
    .bind(Utc::now())
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

#[cfg(test)]
pub async fn find(pool: &SqlitePool, employee_id: i64) -> RepoResult<Option<PresenceRecord>> {
    let record = sqlx::query_as::<_, PresenceRecord>(
        "SELECT employee_id, is_present, updated_at FROM presence WHERE employee_id = ?",
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

/// Marks an active employee present or absent.
///
/// The write is one `INSERT .. ON CONFLICT(employee_id) DO UPDATE` whose source
/// row only exists while the employee is active, so the activity check and the
/// upsert cannot interleave with another writer. When nothing was written the
/// employee is looked up to tell "unknown" from "inactive".
pub async fn set(pool: &SqlitePool, employee_id: i64, is_present: bool) -> RepoResult<PresenceRecord> {
    let written = sqlx::query_as::<_, PresenceRecord>(
        r#"
        INSERT INTO presence (employee_id, is_present, updated_at)
        SELECT id, ?, ? FROM employees WHERE id = ? AND active = 1
        ON CONFLICT(employee_id) DO UPDATE SET
            is_present = excluded.is_present,
            updated_at = excluded.updated_at
        RETURNING employee_id, is_present, updated_at
        "#,
    )
    .bind(is_present)
    .bind(Utc::now())
    .bind(employee_id)
    .fetch_optional(pool)
    .await?;

    if let Some(record) = written {
        info!(employee_id, is_present, "Presence updated");
        return Ok(record);
    }

    let active: Option<bool> = sqlx::query_scalar("SELECT active FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_optional(pool)
        .await?;

    match active {
        None => Err(AppError::employee_not_found()),
        Some(_) => {
            debug!(employee_id, "Rejected presence change for inactive employee");
            Err(AppError::EmployeeInactive)
        }
    }
}

/// Active employees currently marked present, by name.
pub async fn list_present(
    pool: &SqlitePool,
    team_id: Option<i64>,
) -> RepoResult<Vec<PresentEmployee>> {
    let mut sql = String::from(
        r#"
        SELECT e.id, e.name, e.role, e.team_id, t.name AS team_name,
               p.is_present, p.updated_at
        FROM presence p
        JOIN employees e ON p.employee_id = e.id
        LEFT JOIN teams t ON e.team_id = t.id
        WHERE p.is_present = 1 AND e.active = 1
        "#,
    );
    if team_id.is_some() {
        sql.push_str(" AND e.team_id = ?");
    }
    sql.push_str(" ORDER BY e.name");

    let mut query = sqlx::query_as::<_, PresentEmployee>(&sql);
    if let Some(team_id) = team_id {
        query = query.bind(team_id);
    }

    Ok(query.fetch_all(pool).await?)
}
