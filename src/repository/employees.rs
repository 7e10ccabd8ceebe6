use super::{RepoResult, presence, required_name};
use crate::error::AppError;
use crate::model::employee::{Employee, EmployeeFields, EmployeeFilter};
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::{debug, info};

const SELECT_EMPLOYEE: &str = r#"
    SELECT e.id, e.name, e.team_id, e.epi_cert, e.sst_cert, e.active, e.role,
           t.name AS team_name
    FROM employees e
    LEFT JOIN teams t ON e.team_id = t.id
"#;

pub async fn list(pool: &SqlitePool, filter: EmployeeFilter) -> RepoResult<Vec<Employee>> {
    // ---------- build WHERE clause from the filters that are set ----------
    let mut conditions = Vec::new();
    if filter.team_id.is_some() {
        conditions.push("e.team_id = ?");
    }
    if filter.active.is_some() {
        conditions.push("e.active = ?");
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let sql = format!("{SELECT_EMPLOYEE} {where_clause} ORDER BY e.name");
    debug!(sql = %sql, ?filter, "Fetching employees");

    let mut query = sqlx::query_as::<_, Employee>(&sql);
    if let Some(team_id) = filter.team_id {
        query = query.bind(team_id);
    }
    if let Some(active) = filter.active {
        query = query.bind(active);
    }

    Ok(query.fetch_all(pool).await?)
}

async fn fetch<'e, E>(executor: E, id: i64) -> RepoResult<Option<Employee>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{SELECT_EMPLOYEE} WHERE e.id = ?");
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(employee)
}

pub async fn find(pool: &SqlitePool, id: i64) -> RepoResult<Employee> {
    fetch(pool, id)
        .await?
        .ok_or_else(AppError::employee_not_found)
}

/// Inserts the employee and its absent presence row in one transaction.
/// A `team_id` that names no team is rejected by the foreign key.
pub async fn create(pool: &SqlitePool, fields: EmployeeFields) -> RepoResult<Employee> {
    let name = required_name(&fields.name)?;

    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO employees (name, team_id, epi_cert, sst_cert, active, role)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&name)
    .bind(fields.team_id)
    .bind(fields.epi_cert)
    .bind(fields.sst_cert)
    .bind(fields.active)
    .bind(fields.role)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    presence::ensure_record(&mut *tx, id).await?;

    let employee = fetch(&mut *tx, id)
        .await?
        .ok_or_else(AppError::employee_not_found)?;

    tx.commit().await?;

    info!(employee_id = id, name = %employee.name, role = %employee.role, "Employee created");
    Ok(employee)
}

/// Full replace of every writable field.
pub async fn update(pool: &SqlitePool, id: i64, fields: EmployeeFields) -> RepoResult<Employee> {
    let name = required_name(&fields.name)?;

    let result = sqlx::query(
        r#"
        UPDATE employees
        SET name = ?, team_id = ?, epi_cert = ?, sst_cert = ?, active = ?, role = ?
        WHERE id = ?
        "#,
    )
    .bind(&name)
    .bind(fields.team_id)
    .bind(fields.epi_cert)
    .bind(fields.sst_cert)
    .bind(fields.active)
    .bind(fields.role)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::employee_not_found());
    }

    info!(employee_id = id, "Employee updated");
    find(pool, id).await
}

/// The presence row goes with it (ON DELETE CASCADE).
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::employee_not_found());
    }

    info!(employee_id = id, "Employee deleted");
    Ok(())
}

/// Only touches `active`. The presence flag is kept as is, it just stops
/// counting while the employee is inactive.
pub async fn set_active(pool: &SqlitePool, id: i64, active: bool) -> RepoResult<()> {
    let result = sqlx::query("UPDATE employees SET active = ? WHERE id = ?")
        .bind(active)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::employee_not_found());
    }

    info!(employee_id = id, active, "Employee activation changed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::model::role::Role;
    use crate::repository::teams;

    async fn presence_rows(pool: &SqlitePool, employee_id: i64) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM presence WHERE employee_id = ?")
            .bind(employee_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn create_applies_defaults_and_opens_presence() {
        let pool = test_pool().await;

        let emp = create(&pool, EmployeeFields::named("Bruno Silva")).await.unwrap();
        assert_eq!(emp.name, "Bruno Silva");
        assert_eq!(emp.team_id, None);
        assert!(!emp.epi_cert);
        assert!(!emp.sst_cert);
        assert!(emp.active);
        assert_eq!(emp.role, Role::Employee);

        let record = presence::find(&pool, emp.id).await.unwrap().unwrap();
        assert!(!record.is_present);
        assert_eq!(presence_rows(&pool, emp.id).await, 1);
    }

    #[actix_web::test]
    async fn create_requires_a_name() {
        let pool = test_pool().await;
        let err = create(&pool, EmployeeFields::named("  ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[actix_web::test]
    async fn create_rejects_unknown_team() {
        let pool = test_pool().await;
        let mut fields = EmployeeFields::named("Chloe Dupont");
        fields.team_id = Some(404);

        let err = create(&pool, fields).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[actix_web::test]
    async fn list_filters_and_joins_team_name() {
        let pool = test_pool().await;
        let ops = teams::create(&pool, "Operations", true).await.unwrap();

        let mut chloe = EmployeeFields::named("Chloe Dupont");
        chloe.team_id = Some(ops.id);
        create(&pool, chloe).await.unwrap();

        let mut bruno = EmployeeFields::named("Bruno Silva");
        bruno.team_id = Some(ops.id);
        bruno.active = false;
        create(&pool, bruno).await.unwrap();

        let mut eva = EmployeeFields::named("Eva Kim");
        eva.role = Role::Visitor;
        create(&pool, eva).await.unwrap();

        let all = list(&pool, EmployeeFilter::default()).await.unwrap();
        let names: Vec<_> = all.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Bruno Silva", "Chloe Dupont", "Eva Kim"]);
        assert_eq!(all[1].team_name.as_deref(), Some("Operations"));
        assert_eq!(all[2].team_name, None);

        let in_ops = list(
            &pool,
            EmployeeFilter { team_id: Some(ops.id), active: None },
        )
        .await
        .unwrap();
        assert_eq!(in_ops.len(), 2);

        let active_in_ops = list(
            &pool,
            EmployeeFilter { team_id: Some(ops.id), active: Some(true) },
        )
        .await
        .unwrap();
        assert_eq!(active_in_ops.len(), 1);
        assert_eq!(active_in_ops[0].name, "Chloe Dupont");

        let inactive = list(&pool, EmployeeFilter { team_id: None, active: Some(false) })
            .await
            .unwrap();
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].name, "Bruno Silva");
    }

    #[actix_web::test]
    async fn update_replaces_all_fields() {
        let pool = test_pool().await;
        let sales = teams::create(&pool, "Sales", true).await.unwrap();
        let mut fields = EmployeeFields::named("Alice Martin");
        fields.team_id = Some(sales.id);
        fields.epi_cert = true;
        let alice = create(&pool, fields).await.unwrap();

        let mut replacement = EmployeeFields::named("Alice Martin-Roy");
        replacement.sst_cert = true;
        replacement.role = Role::Visitor;
        let updated = update(&pool, alice.id, replacement).await.unwrap();

        assert_eq!(updated.name, "Alice Martin-Roy");
        assert_eq!(updated.team_id, None);
        assert!(!updated.epi_cert);
        assert!(updated.sst_cert);
        assert_eq!(updated.role, Role::Visitor);
    }

    #[actix_web::test]
    async fn missing_employee_is_not_found() {
        let pool = test_pool().await;
        assert!(matches!(find(&pool, 7).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            update(&pool, 7, EmployeeFields::named("Nobody")).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(delete(&pool, 7).await, Err(AppError::NotFound(_))));
        assert!(matches!(set_active(&pool, 7, false).await, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn delete_removes_presence_row() {
        let pool = test_pool().await;
        let emp = create(&pool, EmployeeFields::named("David Rossi")).await.unwrap();
        presence::set(&pool, emp.id, true).await.unwrap();

        delete(&pool, emp.id).await.unwrap();

        assert_eq!(presence_rows(&pool, emp.id).await, 0);
        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM presence")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[actix_web::test]
    async fn set_active_only_touches_the_flag() {
        let pool = test_pool().await;
        let mut fields = EmployeeFields::named("Farid Lopez");
        fields.sst_cert = true;
        let farid = create(&pool, fields).await.unwrap();
        presence::set(&pool, farid.id, true).await.unwrap();

        set_active(&pool, farid.id, false).await.unwrap();

        let stored = find(&pool, farid.id).await.unwrap();
        assert!(!stored.active);
        assert!(stored.sst_cert);
        let record = presence::find(&pool, farid.id).await.unwrap().unwrap();
        assert!(record.is_present);
    }
}
