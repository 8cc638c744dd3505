//! Project Repository

use super::RepoResult;
use chrono::NaiveDate;
use shared::models::{Project, ProjectStatus};
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, name, start_date, end_date, status";

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Project>> {
    let sql = format!("SELECT {COLUMNS} FROM project WHERE id = ?");
    let project = sqlx::query_as::<_, Project>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(project)
}

pub async fn insert(
    conn: &mut SqliteConnection,
    name: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    status: ProjectStatus,
) -> RepoResult<Project> {
    let sql = format!(
        "INSERT INTO project (name, start_date, end_date, status) VALUES (?, ?, ?, ?) RETURNING {COLUMNS}"
    );
    let project = sqlx::query_as::<_, Project>(&sql)
        .bind(name)
        .bind(start_date)
        .bind(end_date)
        .bind(status)
        .fetch_one(&mut *conn)
        .await?;
    Ok(project)
}

pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    name: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    status: ProjectStatus,
) -> RepoResult<Option<Project>> {
    let sql = format!(
        "UPDATE project SET name = ?, start_date = ?, end_date = ?, status = ? WHERE id = ? RETURNING {COLUMNS}"
    );
    let project = sqlx::query_as::<_, Project>(&sql)
        .bind(name)
        .bind(start_date)
        .bind(end_date)
        .bind(status)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(project)
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM project WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_all(conn: &mut SqliteConnection) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM project")
        .fetch_one(&mut *conn)
        .await?;
    Ok(n)
}

pub async fn list_all(conn: &mut SqliteConnection, limit: i64, offset: i64) -> RepoResult<Vec<Project>> {
    let sql = format!("SELECT {COLUMNS} FROM project ORDER BY id LIMIT ? OFFSET ?");
    let projects = sqlx::query_as::<_, Project>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await?;
    Ok(projects)
}

pub async fn count_for_employee(conn: &mut SqliteConnection, employee_id: i64) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM project_assignment WHERE employee_id = ?",
    )
    .bind(employee_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(n)
}

/// Projects the employee is assigned to
pub async fn list_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Project>> {
    let projects = sqlx::query_as::<_, Project>(
        "SELECT p.id, p.name, p.start_date, p.end_date, p.status \
         FROM project p JOIN project_assignment pa ON pa.project_id = p.id \
         WHERE pa.employee_id = ? ORDER BY p.id LIMIT ? OFFSET ?",
    )
    .bind(employee_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(&mut *conn)
    .await?;
    Ok(projects)
}
