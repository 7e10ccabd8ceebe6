use super::RepoResult;
use crate::model::presence::{Summary, TeamPresence};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct Totals {
    total_present: i64,
    epi_present: i64,
    sst_present: i64,
    visitors_present: i64,
}

/// Dashboard counters over active employees, recomputed on every call.
///
/// Both reads run in one transaction so the per-team rows and the totals
/// describe the same snapshot.
pub async fn summary(pool: &SqlitePool) -> RepoResult<Summary> {
    let mut tx = pool.begin().await?;

    let totals = sqlx::query_as::<_, Totals>(
        r#"
        SELECT COUNT(*) AS total_present,
               COALESCE(SUM(e.epi_cert = 1), 0) AS epi_present,
               COALESCE(SUM(e.sst_cert = 1), 0) AS sst_present,
               COALESCE(SUM(e.role = 'visitor'), 0) AS visitors_present
        FROM presence p
        JOIN employees e ON e.id = p.employee_id
        WHERE p.is_present = 1 AND e.active = 1
        "#,
    )
    .fetch_one(&mut *tx)
    .await?;

    // every team appears, even with nobody in
    let per_team = sqlx::query_as::<_, TeamPresence>(
        r#"
        SELECT t.id AS team_id, t.name AS team_name, COUNT(p.employee_id) AS present_count
        FROM teams t
        LEFT JOIN employees e ON e.team_id = t.id AND e.active = 1
        LEFT JOIN presence p ON p.employee_id = e.id AND p.is_present = 1
        GROUP BY t.id, t.name
        ORDER BY t.name
        "#,
    )
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Summary {
        total_present: totals.total_present,
        per_team,
        epi_present: totals.epi_present,
        sst_present: totals.sst_present,
        visitors_present: totals.visitors_present,
    })
}
