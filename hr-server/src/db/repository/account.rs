//! Account Repository

use super::RepoResult;
use shared::models::{Account, AccountStatus};
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, username, email, password_hash, status";

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Account>> {
    let sql = format!("SELECT {COLUMNS} FROM account WHERE id = ?");
    let account = sqlx::query_as::<_, Account>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(account)
}

pub async fn find_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> RepoResult<Option<Account>> {
    let sql = format!("SELECT {COLUMNS} FROM account WHERE username = ?");
    let account = sqlx::query_as::<_, Account>(&sql)
        .bind(username)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(account)
}

/// Exact match, optionally ignoring one account
pub async fn username_taken(
    conn: &mut SqliteConnection,
    username: &str,
    excluding_id: Option<i64>,
) -> RepoResult<bool> {
    let taken = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM account WHERE username = ? AND (? IS NULL OR id <> ?))",
    )
    .bind(username)
    .bind(excluding_id)
    .bind(excluding_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(taken)
}

/// Trimmed, case-insensitive match, optionally ignoring one account
pub async fn email_taken(
    conn: &mut SqliteConnection,
    email: &str,
    excluding_id: Option<i64>,
) -> RepoResult<bool> {
    let taken = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM account WHERE email = ? COLLATE NOCASE AND (? IS NULL OR id <> ?))",
    )
    .bind(email.trim())
    .bind(excluding_id)
    .bind(excluding_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(taken)
}

pub async fn insert(
    conn: &mut SqliteConnection,
    username: &str,
    email: &str,
    password_hash: &str,
    status: AccountStatus,
) -> RepoResult<Account> {
    let sql = format!(
        "INSERT INTO account (username, email, password_hash, status) VALUES (?, ?, ?, ?) RETURNING {COLUMNS}"
    );
    let account = sqlx::query_as::<_, Account>(&sql)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(status)
        .fetch_one(&mut *conn)
        .await?;
    Ok(account)
}

/// Rewrite identity fields; the digest is left alone
pub async fn update_identity(
    conn: &mut SqliteConnection,
    id: i64,
    username: &str,
    email: &str,
) -> RepoResult<()> {
    sqlx::query("UPDATE account SET username = ?, email = ? WHERE id = ?")
        .bind(username)
        .bind(email)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn update_status(
    conn: &mut SqliteConnection,
    id: i64,
    status: AccountStatus,
) -> RepoResult<()> {
    sqlx::query("UPDATE account SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn update_password(
    conn: &mut SqliteConnection,
    id: i64,
    password_hash: &str,
) -> RepoResult<()> {
    sqlx::query("UPDATE account SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Delete the account and its role links
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    sqlx::query("DELETE FROM account_role WHERE account_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    let result = sqlx::query("DELETE FROM account WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Account filter; `None` disables a criterion
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Lower-cased `LIKE` pattern over username or email
    pub pattern: Option<String>,
    pub role_id: Option<i64>,
    pub status: Option<AccountStatus>,
}

const FILTER: &str = "FROM account a \
    WHERE (?1 IS NULL OR LOWER(a.username) LIKE ?1 ESCAPE '\\' OR LOWER(a.email) LIKE ?1 ESCAPE '\\') \
    AND (?2 IS NULL OR EXISTS(SELECT 1 FROM account_role ar WHERE ar.account_id = a.id AND ar.role_id = ?2)) \
    AND (?3 IS NULL OR a.status = ?3)";

pub async fn count_matching(conn: &mut SqliteConnection, filter: &AccountFilter) -> RepoResult<i64> {
    let sql = format!("SELECT COUNT(*) {FILTER}");
    let total = sqlx::query_scalar::<_, i64>(&sql)
        .bind(filter.pattern.as_deref())
        .bind(filter.role_id)
        .bind(filter.status)
        .fetch_one(&mut *conn)
        .await?;
    Ok(total)
}

pub async fn search(
    conn: &mut SqliteConnection,
    filter: &AccountFilter,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Account>> {
    let sql = format!(
        "SELECT a.id, a.username, a.email, a.password_hash, a.status {FILTER} ORDER BY a.id LIMIT ?4 OFFSET ?5"
    );
    let accounts = sqlx::query_as::<_, Account>(&sql)
        .bind(filter.pattern.as_deref())
        .bind(filter.role_id)
        .bind(filter.status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await?;
    Ok(accounts)
}
