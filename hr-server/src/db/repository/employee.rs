//! Employee Repository

use super::RepoResult;
use chrono::NaiveDate;
use shared::models::{Employee, EmployeeDetail, Gender};
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, full_name, birth_date, gender, phone, address, department_id, account_id";

const DETAIL_SELECT: &str = "SELECT e.id, e.full_name, e.birth_date, e.gender, e.phone, e.address, \
    e.department_id, d.name AS department_name, e.account_id, a.username, a.email, a.status \
    FROM employee e \
    JOIN account a ON a.id = e.account_id \
    LEFT JOIN department d ON d.id = e.department_id";

/// Column values written on insert and update
#[derive(Debug, Clone)]
pub struct EmployeeRecord<'a> {
    pub full_name: &'a str,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub phone: &'a str,
    pub address: Option<&'a str>,
    pub department_id: Option<i64>,
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Employee>> {
    let sql = format!("SELECT {COLUMNS} FROM employee WHERE id = ?");
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(employee)
}

pub async fn find_by_account_id(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> RepoResult<Option<Employee>> {
    let sql = format!("SELECT {COLUMNS} FROM employee WHERE account_id = ?");
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(account_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(employee)
}

pub async fn find_detail(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<EmployeeDetail>> {
    let sql = format!("{DETAIL_SELECT} WHERE e.id = ?");
    let detail = sqlx::query_as::<_, EmployeeDetail>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(detail)
}

pub async fn find_detail_by_account_id(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> RepoResult<Option<EmployeeDetail>> {
    let sql = format!("{DETAIL_SELECT} WHERE e.account_id = ?");
    let detail = sqlx::query_as::<_, EmployeeDetail>(&sql)
        .bind(account_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(detail)
}

pub async fn phone_taken(
    conn: &mut SqliteConnection,
    phone: &str,
    excluding_id: Option<i64>,
) -> RepoResult<bool> {
    let taken = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM employee WHERE phone = ? AND (? IS NULL OR id <> ?))",
    )
    .bind(phone)
    .bind(excluding_id)
    .bind(excluding_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(taken)
}

pub async fn insert(
    conn: &mut SqliteConnection,
    record: &EmployeeRecord<'_>,
    account_id: i64,
) -> RepoResult<Employee> {
    let sql = format!(
        "INSERT INTO employee (full_name, birth_date, gender, phone, address, department_id, account_id) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    );
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(record.full_name)
        .bind(record.birth_date)
        .bind(record.gender)
        .bind(record.phone)
        .bind(record.address)
        .bind(record.department_id)
        .bind(account_id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(employee)
}

pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    record: &EmployeeRecord<'_>,
) -> RepoResult<Option<Employee>> {
    let sql = format!(
        "UPDATE employee SET full_name = ?, birth_date = ?, gender = ?, phone = ?, address = ?, department_id = ? \
         WHERE id = ? RETURNING {COLUMNS}"
    );
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(record.full_name)
        .bind(record.birth_date)
        .bind(record.gender)
        .bind(record.phone)
        .bind(record.address)
        .bind(record.department_id)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(employee)
}

pub async fn set_department(
    conn: &mut SqliteConnection,
    id: i64,
    department_id: Option<i64>,
) -> RepoResult<()> {
    sqlx::query("UPDATE employee SET department_id = ? WHERE id = ?")
        .bind(department_id)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

const SEARCH_FILTER: &str = "WHERE (?1 IS NULL OR LOWER(e.full_name) LIKE ?1 ESCAPE '\\') \
    AND (?2 IS NULL OR e.department_id = ?2)";

pub async fn count_matching(
    conn: &mut SqliteConnection,
    pattern: Option<&str>,
    department_id: Option<i64>,
) -> RepoResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM employee e {SEARCH_FILTER}");
    let total = sqlx::query_scalar::<_, i64>(&sql)
        .bind(pattern)
        .bind(department_id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(total)
}

pub async fn search(
    conn: &mut SqliteConnection,
    pattern: Option<&str>,
    department_id: Option<i64>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<EmployeeDetail>> {
    let sql = format!("{DETAIL_SELECT} {SEARCH_FILTER} ORDER BY e.id LIMIT ?3 OFFSET ?4");
    let rows = sqlx::query_as::<_, EmployeeDetail>(&sql)
        .bind(pattern)
        .bind(department_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

/// Employees in a department
pub async fn members(conn: &mut SqliteConnection, department_id: i64) -> RepoResult<Vec<EmployeeDetail>> {
    let sql = format!("{DETAIL_SELECT} WHERE e.department_id = ? ORDER BY e.full_name");
    let rows = sqlx::query_as::<_, EmployeeDetail>(&sql)
        .bind(department_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

/// Employees outside a department (including those with none)
pub async fn non_members(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> RepoResult<Vec<EmployeeDetail>> {
    let sql = format!(
        "{DETAIL_SELECT} WHERE e.department_id IS NULL OR e.department_id <> ? ORDER BY e.full_name"
    );
    let rows = sqlx::query_as::<_, EmployeeDetail>(&sql)
        .bind(department_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}
