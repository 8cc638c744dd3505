//! Role Repository

use super::RepoResult;
use shared::models::{Role, RoleName};
use sqlx::SqliteConnection;

pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<Role>> {
    let roles = sqlx::query_as::<_, Role>("SELECT id, name FROM role ORDER BY id")
        .fetch_all(&mut *conn)
        .await?;
    Ok(roles)
}

/// Resolve a set of ids, returning the first id with no role
pub async fn find_by_ids(
    conn: &mut SqliteConnection,
    ids: &[i64],
) -> RepoResult<Result<Vec<Role>, i64>> {
    let mut roles = Vec::with_capacity(ids.len());
    for &id in ids {
        let role = sqlx::query_as::<_, Role>("SELECT id, name FROM role WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        match role {
            Some(r) if !roles.contains(&r) => roles.push(r),
            Some(_) => {}
            None => return Ok(Err(id)),
        }
    }
    Ok(Ok(roles))
}

pub async fn find_by_name(conn: &mut SqliteConnection, name: RoleName) -> RepoResult<Option<Role>> {
    let role = sqlx::query_as::<_, Role>("SELECT id, name FROM role WHERE name = ? LIMIT 1")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(role)
}

pub async fn find_for_account(conn: &mut SqliteConnection, account_id: i64) -> RepoResult<Vec<Role>> {
    let roles = sqlx::query_as::<_, Role>(
        "SELECT r.id, r.name FROM role r JOIN account_role ar ON ar.role_id = r.id WHERE ar.account_id = ? ORDER BY r.id",
    )
    .bind(account_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(roles)
}

pub async fn count(conn: &mut SqliteConnection) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM role")
        .fetch_one(&mut *conn)
        .await?;
    Ok(n)
}

pub async fn create(conn: &mut SqliteConnection, name: RoleName) -> RepoResult<Role> {
    let id = sqlx::query_scalar::<_, i64>("INSERT INTO role (name) VALUES (?) RETURNING id")
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;
    Ok(Role { id, name })
}

/// Replace an account's role set wholesale
pub async fn set_for_account(
    conn: &mut SqliteConnection,
    account_id: i64,
    role_ids: &[i64],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM account_role WHERE account_id = ?")
        .bind(account_id)
        .execute(&mut *conn)
        .await?;
    for role_id in role_ids {
        sqlx::query("INSERT OR IGNORE INTO account_role (account_id, role_id) VALUES (?, ?)")
            .bind(account_id)
            .bind(role_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}
