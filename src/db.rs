use crate::model::role::Role;
use chrono::Utc;
use sqlx::{Executor, SqlitePool};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS teams (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    is_active INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    team_id INTEGER,
    epi_cert INTEGER NOT NULL DEFAULT 0,
    sst_cert INTEGER NOT NULL DEFAULT 0,
    active INTEGER NOT NULL DEFAULT 1,
    role TEXT NOT NULL DEFAULT 'employee' CHECK (role IN ('employee', 'visitor')),
    FOREIGN KEY (team_id) REFERENCES teams(id) ON DELETE SET NULL
);

CREATE TABLE IF NOT EXISTS presence (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id INTEGER NOT NULL UNIQUE,
    is_present INTEGER NOT NULL DEFAULT 0,
    updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_employees_team_id ON employees(team_id);
"#;

/// Opens the pool. Every connection runs with `foreign_keys = ON`, which the
/// SET NULL / CASCADE rules depend on.
pub async fn init_db(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    if let Some(dir) = database_dir(database_url) {
        std::fs::create_dir_all(dir).map_err(sqlx::Error::Io)?;
    }

    // An in-memory database lives only as long as its connection
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    info!(database_url, max_connections, "Database connection established");
    Ok(pool)
}

/// Directory holding the database file, if the URL points at one.
fn database_dir(database_url: &str) -> Option<&Path> {
    if database_url.contains(":memory:") {
        return None;
    }
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let path = path.split('?').next().unwrap_or(path);
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}

/// Creates the tables if they don't exist yet. Safe to run on every start.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    pool.execute(SCHEMA).await?;
    debug!("Schema ready");
    Ok(())
}

struct SeedEmployee {
    name: &'static str,
    team: Option<&'static str>,
    epi_cert: bool,
    sst_cert: bool,
    active: bool,
    role: Role,
}

const SEED_TEAMS: [&str; 3] = ["Sales", "Operations", "Support"];

const SEED_EMPLOYEES: [SeedEmployee; 6] = [
    SeedEmployee { name: "Alice Martin", team: Some("Sales"), epi_cert: true, sst_cert: false, active: true, role: Role::Employee },
    SeedEmployee { name: "Bruno Silva", team: Some("Operations"), epi_cert: false, sst_cert: true, active: true, role: Role::Employee },
    SeedEmployee { name: "Chloe Dupont", team: Some("Operations"), epi_cert: true, sst_cert: true, active: true, role: Role::Employee },
    SeedEmployee { name: "David Rossi", team: Some("Support"), epi_cert: false, sst_cert: false, active: true, role: Role::Employee },
    SeedEmployee { name: "Eva Kim", team: None, epi_cert: false, sst_cert: false, active: true, role: Role::Visitor },
    SeedEmployee { name: "Farid Lopez", team: Some("Sales"), epi_cert: false, sst_cert: true, active: false, role: Role::Employee },
];

/// Loads the sample teams and employees, but only into an empty store.
/// Employees at an even position in the list start out present.
///
/// Returns whether anything was inserted.
pub async fn seed_sample_data(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let team_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teams")
        .fetch_one(pool)
        .await?;
    if team_count > 0 {
        debug!(team_count, "Store already populated, skipping seed");
        return Ok(false);
    }

    let mut tx = pool.begin().await?;

    let mut team_ids = Vec::with_capacity(SEED_TEAMS.len());
    for name in SEED_TEAMS {
        let id = sqlx::query("INSERT INTO teams (name, is_active) VALUES (?, 1)")
            .bind(name)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        team_ids.push((name, id));
    }

    for (index, emp) in SEED_EMPLOYEES.iter().enumerate() {
        let team_id = emp
            .team
            .and_then(|team| team_ids.iter().find(|(name, _)| *name == team))
            .map(|(_, id)| *id);

        let employee_id = sqlx::query(
            r#"
            INSERT INTO employees (name, team_id, epi_cert, sst_cert, active, role)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(emp.name)
        .bind(team_id)
        .bind(emp.epi_cert)
        .bind(emp.sst_cert)
        .bind(emp.active)
        .bind(emp.role.as_ref())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        sqlx::query("INSERT INTO presence (employee_id, is_present, updated_at) VALUES (?, ?, ?)")
            .bind(employee_id)
            .bind(index % 2 == 0)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    info!(
        teams = SEED_TEAMS.len(),
        employees = SEED_EMPLOYEES.len(),
        "Seeded sample data"
    );
    Ok(true)
}

#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = init_db("sqlite::memory:", 1).await.unwrap();
    init_schema(&pool).await.unwrap();
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_database_directory() {
        assert_eq!(
            database_dir("sqlite://data/presence.sqlite"),
            Some(Path::new("data"))
        );
        assert_eq!(
            database_dir("sqlite:/var/lib/presence/db.sqlite?mode=rwc"),
            Some(Path::new("/var/lib/presence"))
        );
        assert_eq!(database_dir("sqlite://presence.sqlite"), None);
        assert_eq!(database_dir("sqlite::memory:"), None);
    }

    #[actix_web::test]
    async fn schema_is_idempotent() {
        let pool = test_pool().await;
        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('teams', 'employees', 'presence')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(tables, 3);
    }

    #[actix_web::test]
    async fn seeds_only_once() {
        let pool = test_pool().await;

        assert!(seed_sample_data(&pool).await.unwrap());
        assert!(!seed_sample_data(&pool).await.unwrap());

        let employees: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&pool)
            .await
            .unwrap();
        let presence: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM presence")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(employees, 6);
        assert_eq!(presence, 6);
    }

    #[actix_web::test]
    async fn skips_seed_when_teams_exist() {
        let pool = test_pool().await;
        sqlx::query("INSERT INTO teams (name) VALUES ('Night shift')")
            .execute(&pool)
            .await
            .unwrap();

        assert!(!seed_sample_data(&pool).await.unwrap());
        let employees: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(employees, 0);
    }

    #[actix_web::test]
    async fn foreign_keys_are_enforced() {
        let pool = test_pool().await;
        let result = sqlx::query("INSERT INTO presence (employee_id) VALUES (42)")
            .execute(&pool)
            .await;
        assert!(result.is_err());
    }
}
