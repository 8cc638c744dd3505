//! Dashboard aggregate queries

use super::RepoResult;
use shared::models::{AccountStatus, NamedCount, RoleName};
use sqlx::SqliteConnection;

/// Row counts per table the dashboards show
#[derive(Debug, Clone, Copy, Default, sqlx::FromRow)]
pub struct Totals {
    pub departments: i64,
    pub accounts: i64,
    pub projects: i64,
}

pub async fn totals(conn: &mut SqliteConnection) -> RepoResult<Totals> {
    let totals = sqlx::query_as::<_, Totals>(
        "SELECT (SELECT COUNT(*) FROM department) AS departments, \
                (SELECT COUNT(*) FROM account) AS accounts, \
                (SELECT COUNT(*) FROM project) AS projects",
    )
    .fetch_one(&mut *conn)
    .await?;
    Ok(totals)
}

/// Distinct accounts holding any of `roles` with the given status
pub async fn count_accounts_with_roles(
    conn: &mut SqliteConnection,
    roles: &[RoleName],
    status: AccountStatus,
) -> RepoResult<i64> {
    if roles.is_empty() {
        return Ok(0);
    }
    let placeholders = vec!["?"; roles.len()].join(", ");
    let sql = format!(
        "SELECT COUNT(DISTINCT a.id) FROM account a \
         JOIN account_role ar ON ar.account_id = a.id \
         JOIN role r ON r.id = ar.role_id \
         WHERE a.status = ? AND r.name IN ({placeholders})"
    );
    let mut query = sqlx::query_scalar::<_, i64>(&sql).bind(status);
    for role in roles {
        query = query.bind(*role);
    }
    Ok(query.fetch_one(&mut *conn).await?)
}

/// Employees per department; departments without members are omitted
pub async fn employees_by_department(conn: &mut SqliteConnection) -> RepoResult<Vec<NamedCount>> {
    let rows = sqlx::query_as::<_, NamedCount>(
        "SELECT d.name AS name, COUNT(e.id) AS count \
         FROM employee e JOIN department d ON d.id = e.department_id \
         GROUP BY d.id ORDER BY d.name",
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

pub async fn employees_by_gender(conn: &mut SqliteConnection) -> RepoResult<Vec<NamedCount>> {
    let rows = sqlx::query_as::<_, NamedCount>(
        "SELECT gender AS name, COUNT(*) AS count FROM employee GROUP BY gender ORDER BY gender",
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// Members of a department whose account has the given status
pub async fn count_members_with_status(
    conn: &mut SqliteConnection,
    department_id: i64,
    status: AccountStatus,
) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM employee e JOIN account a ON a.id = e.account_id \
         WHERE e.department_id = ? AND a.status = ?",
    )
    .bind(department_id)
    .bind(status)
    .fetch_one(&mut *conn)
    .await?;
    Ok(n)
}
