//! Uniqueness and referential checks
//!
//! Each check runs against current persisted state on the caller's connection
//! (usually the open transaction) and reports the offending form field. The
//! unique indexes back these up at commit time with the same error.

use sqlx::SqliteConnection;

use crate::db::repository::{UniqueField, account, assignment, department, employee};
use crate::utils::{AppError, AppResult};

/// Username (exact) then email (trimmed, case-insensitive)
pub async fn ensure_account_identity_free(
    conn: &mut SqliteConnection,
    username: &str,
    email: &str,
    excluding_account: Option<i64>,
) -> AppResult<()> {
    if account::username_taken(conn, username, excluding_account).await? {
        return Err(AppError::duplicate(UniqueField::Username));
    }
    if account::email_taken(conn, email, excluding_account).await? {
        return Err(AppError::duplicate(UniqueField::Email));
    }
    Ok(())
}

pub async fn ensure_phone_free(
    conn: &mut SqliteConnection,
    phone: &str,
    excluding_employee: Option<i64>,
) -> AppResult<()> {
    if employee::phone_taken(conn, phone, excluding_employee).await? {
        return Err(AppError::duplicate(UniqueField::Phone));
    }
    Ok(())
}

pub async fn ensure_department_name_free(
    conn: &mut SqliteConnection,
    name: &str,
    excluding_department: Option<i64>,
) -> AppResult<()> {
    if department::name_taken(conn, name, excluding_department).await? {
        return Err(AppError::Duplicate {
            field: UniqueField::DepartmentName.name(),
            message: format!("Department with name '{name}' already exists"),
        });
    }
    Ok(())
}

pub async fn ensure_not_assigned(
    conn: &mut SqliteConnection,
    project_id: i64,
    employee_id: i64,
) -> AppResult<()> {
    if assignment::exists(conn, project_id, employee_id).await? {
        return Err(AppError::conflict(shared::ErrorCode::AssignmentExists));
    }
    Ok(())
}
