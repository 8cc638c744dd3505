//! Project Assignment Repository

use super::RepoResult;
use chrono::NaiveDate;
use shared::models::{AssignmentDetail, ProjectAssignment};
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, project_id, employee_id, role_in_project, join_date";

const DETAIL_SELECT: &str = "SELECT pa.id, pa.project_id, p.name AS project_name, p.status AS project_status, \
    p.start_date AS project_start_date, p.end_date AS project_end_date, \
    pa.employee_id, e.full_name AS employee_name, pa.role_in_project, pa.join_date \
    FROM project_assignment pa \
    JOIN project p ON p.id = pa.project_id \
    JOIN employee e ON e.id = pa.employee_id";

pub async fn find_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> RepoResult<Option<ProjectAssignment>> {
    let sql = format!("SELECT {COLUMNS} FROM project_assignment WHERE id = ?");
    let assignment = sqlx::query_as::<_, ProjectAssignment>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(assignment)
}

pub async fn exists(conn: &mut SqliteConnection, project_id: i64, employee_id: i64) -> RepoResult<bool> {
    let found = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM project_assignment WHERE project_id = ? AND employee_id = ?)",
    )
    .bind(project_id)
    .bind(employee_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(found)
}

pub async fn insert(
    conn: &mut SqliteConnection,
    project_id: i64,
    employee_id: i64,
    role_in_project: &str,
    join_date: Option<NaiveDate>,
) -> RepoResult<ProjectAssignment> {
    let sql = format!(
        "INSERT INTO project_assignment (project_id, employee_id, role_in_project, join_date) \
         VALUES (?, ?, ?, ?) RETURNING {COLUMNS}"
    );
    let assignment = sqlx::query_as::<_, ProjectAssignment>(&sql)
        .bind(project_id)
        .bind(employee_id)
        .bind(role_in_project)
        .bind(join_date)
        .fetch_one(&mut *conn)
        .await?;
    Ok(assignment)
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM project_assignment WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_for_project(conn: &mut SqliteConnection, project_id: i64) -> RepoResult<u64> {
    let result = sqlx::query("DELETE FROM project_assignment WHERE project_id = ?")
        .bind(project_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_for_employee(conn: &mut SqliteConnection, employee_id: i64) -> RepoResult<u64> {
    let result = sqlx::query("DELETE FROM project_assignment WHERE employee_id = ?")
        .bind(employee_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

pub async fn by_project(conn: &mut SqliteConnection, project_id: i64) -> RepoResult<Vec<AssignmentDetail>> {
    let sql = format!("{DETAIL_SELECT} WHERE pa.project_id = ? ORDER BY pa.id");
    let rows = sqlx::query_as::<_, AssignmentDetail>(&sql)
        .bind(project_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

pub async fn by_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> RepoResult<Vec<AssignmentDetail>> {
    let sql = format!("{DETAIL_SELECT} WHERE pa.employee_id = ? ORDER BY pa.id");
    let rows = sqlx::query_as::<_, AssignmentDetail>(&sql)
        .bind(employee_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}
