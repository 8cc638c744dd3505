//! Department Repository

use super::RepoResult;
use shared::models::{Department, DepartmentSortField, DepartmentSummary};
use sqlx::SqliteConnection;

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Department>> {
    let dept = sqlx::query_as::<_, Department>(
        "SELECT id, name, description FROM department WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(dept)
}

/// All departments with their member counts
///
/// The sort column comes from a closed set, so it is safe to splice in.
/// Name breaks ties, which keeps NULL descriptions in a stable order.
pub async fn list_with_counts(
    conn: &mut SqliteConnection,
    sort: DepartmentSortField,
    ascending: bool,
) -> RepoResult<Vec<DepartmentSummary>> {
    let dir = if ascending { "ASC" } else { "DESC" };
    let sql = format!(
        "SELECT d.id, d.name, d.description, COUNT(e.id) AS employee_count \
         FROM department d LEFT JOIN employee e ON e.department_id = d.id \
         GROUP BY d.id ORDER BY {} {dir}, d.name {dir}",
        sort.column()
    );
    let rows = sqlx::query_as::<_, DepartmentSummary>(&sql)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

pub async fn name_taken(
    conn: &mut SqliteConnection,
    name: &str,
    excluding_id: Option<i64>,
) -> RepoResult<bool> {
    let taken = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM department WHERE name = ? AND (? IS NULL OR id <> ?))",
    )
    .bind(name)
    .bind(excluding_id)
    .bind(excluding_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(taken)
}

pub async fn member_count(conn: &mut SqliteConnection, id: i64) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employee WHERE department_id = ?")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(n)
}

pub async fn insert(
    conn: &mut SqliteConnection,
    name: &str,
    description: Option<&str>,
) -> RepoResult<Department> {
    let dept = sqlx::query_as::<_, Department>(
        "INSERT INTO department (name, description) VALUES (?, ?) RETURNING id, name, description",
    )
    .bind(name)
    .bind(description)
    .fetch_one(&mut *conn)
    .await?;
    Ok(dept)
}

pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    name: &str,
    description: Option<&str>,
) -> RepoResult<Option<Department>> {
    let dept = sqlx::query_as::<_, Department>(
        "UPDATE department SET name = ?, description = ? WHERE id = ? RETURNING id, name, description",
    )
    .bind(name)
    .bind(description)
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(dept)
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM department WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}
