//! Account Service
//!
//! Login identities and their roles. ADMIN accounts are read-only apart from
//! their status: they cannot be deleted, renamed, re-roled or password-reset.

use std::sync::Arc;

use shared::models::{
    Account, AccountDetail, AccountForm, AccountSearch, AccountStatus, ChangePassword,
    PasswordReset, Role,
};
use shared::{ErrorCode, PaginatedResponse};
use sqlx::{SqliteConnection, SqlitePool};

use super::uniqueness::ensure_account_identity_free;
use crate::auth::{ForceLogout, PasswordHasher};
use crate::db::repository::{account, assignment, employee, role};
use crate::utils::validation::{
    like_pattern, normalize_email, optional_password, require_password, validate_input,
};
use crate::utils::{AppError, AppResult};

const ENTITY: &str = "Account";

/// Result of an account edit
#[derive(Debug)]
pub struct AccountUpdate {
    pub account: AccountDetail,
    /// Set when the edit blocked a previously active account or replaced its password
    pub signal: Option<ForceLogout>,
}

#[derive(Clone)]
pub struct AccountService {
    pool: SqlitePool,
    hasher: Arc<dyn PasswordHasher>,
    page_size: u32,
}

/// Load an account with its roles and linked employee
pub(crate) async fn load_detail(
    conn: &mut SqliteConnection,
    id: i64,
) -> AppResult<Option<AccountDetail>> {
    let Some(acc) = account::find_by_id(conn, id).await? else {
        return Ok(None);
    };
    Ok(Some(attach(conn, acc).await?))
}

async fn attach(conn: &mut SqliteConnection, acc: Account) -> AppResult<AccountDetail> {
    let roles = role::find_for_account(conn, acc.id).await?;
    let employee_id = employee::find_by_account_id(conn, acc.id).await?.map(|e| e.id);
    Ok(AccountDetail {
        account: acc,
        roles,
        employee_id,
    })
}

/// Resolve requested role ids, reporting the first unknown one
async fn resolve_roles(conn: &mut SqliteConnection, ids: &[i64]) -> AppResult<Vec<Role>> {
    role::find_by_ids(conn, ids)
        .await?
        .map_err(|id| AppError::field("role_ids", format!("Role not found with id: {id}")))
}

/// Shared password-change rules: mismatch, then reuse of the current password
pub(crate) fn check_new_password(
    hasher: &dyn PasswordHasher,
    current_digest: &str,
    new_password: &str,
    confirm_password: &str,
) -> AppResult<()> {
    if new_password != confirm_password {
        return Err(AppError::Validation {
            code: ErrorCode::PasswordMismatch,
            field: Some("confirm_password".into()),
            message: ErrorCode::PasswordMismatch.message().into(),
        });
    }
    if hasher.verify(new_password, current_digest) {
        return Err(AppError::Validation {
            code: ErrorCode::PasswordUnchanged,
            field: Some("new_password".into()),
            message: ErrorCode::PasswordUnchanged.message().into(),
        });
    }
    Ok(())
}

impl AccountService {
    pub fn new(pool: SqlitePool, hasher: Arc<dyn PasswordHasher>, page_size: u32) -> Self {
        Self {
            pool,
            hasher,
            page_size,
        }
    }

    pub async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let mut conn = self.pool.acquire().await?;
        Ok(role::find_all(&mut conn).await?)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<AccountDetail> {
        let mut conn = self.pool.acquire().await?;
        load_detail(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<AccountDetail>> {
        let mut conn = self.pool.acquire().await?;
        match account::find_by_username(&mut conn, username).await? {
            Some(acc) => Ok(Some(attach(&mut conn, acc).await?)),
            None => Ok(None),
        }
    }

    /// Keyword matches username or email, case-insensitively; filters AND together
    pub async fn search(&self, query: &AccountSearch) -> AppResult<PaginatedResponse<AccountDetail>> {
        let page = query.page_request();
        let limit = page.limit_or(self.page_size);
        let filter = account::AccountFilter {
            pattern: like_pattern(query.keyword.as_deref()),
            role_id: query.role_id,
            status: query.status,
        };

        let mut conn = self.pool.acquire().await?;
        let total = account::count_matching(&mut conn, &filter).await?;
        let rows = account::search(
            &mut conn,
            &filter,
            i64::from(limit),
            page.offset(self.page_size),
        )
        .await?;

        let mut data = Vec::with_capacity(rows.len());
        for acc in rows {
            data.push(attach(&mut conn, acc).await?);
        }
        Ok(PaginatedResponse::new(data, total as u64, page.page(), limit))
    }

    pub async fn create(&self, form: &AccountForm) -> AppResult<AccountDetail> {
        validate_input(form)?;
        let password = require_password(form.password.as_deref())?;
        let email = normalize_email(&form.email);

        let mut tx = self.pool.begin().await?;
        ensure_account_identity_free(&mut tx, &form.username, &email, None).await?;
        let roles = resolve_roles(&mut tx, &form.role_ids).await?;

        let digest = self.hasher.hash(password)?;
        let acc = account::insert(&mut tx, &form.username, &email, &digest, form.status).await?;
        let role_ids: Vec<i64> = roles.iter().map(|r| r.id).collect();
        role::set_for_account(&mut tx, acc.id, &role_ids).await?;
        let detail = attach(&mut tx, acc).await?;
        tx.commit().await?;

        tracing::info!(account_id = detail.account.id, username = %detail.account.username, "Account created");
        Ok(detail)
    }

    /// Full edit for regular accounts; ADMIN accounts only take the new status
    pub async fn update(&self, id: i64, form: &AccountForm) -> AppResult<AccountUpdate> {
        validate_input(form)?;
        let email = normalize_email(&form.email);

        let mut tx = self.pool.begin().await?;
        let current = load_detail(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))?;

        ensure_account_identity_free(&mut tx, &form.username, &email, Some(id)).await?;

        let mut password_changed = false;
        if current.is_admin() {
            account::update_status(&mut tx, id, form.status).await?;
        } else {
            let new_password = optional_password(form.password.as_deref())?;
            let roles = resolve_roles(&mut tx, &form.role_ids).await?;

            account::update_identity(&mut tx, id, &form.username, &email).await?;
            account::update_status(&mut tx, id, form.status).await?;
            if let Some(password) = new_password {
                let digest = self.hasher.hash(password)?;
                account::update_password(&mut tx, id, &digest).await?;
                password_changed = true;
            }
            let role_ids: Vec<i64> = roles.iter().map(|r| r.id).collect();
            role::set_for_account(&mut tx, id, &role_ids).await?;
        }

        let updated = load_detail(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))?;
        tx.commit().await?;

        let blocked = current.account.status == AccountStatus::Active
            && updated.account.status == AccountStatus::Blocked;
        tracing::info!(account_id = id, admin = current.is_admin(), blocked, password_changed, "Account updated");

        Ok(AccountUpdate {
            account: updated,
            signal: (blocked || password_changed).then_some(ForceLogout { account_id: id }),
        })
    }

    /// Delete a non-ADMIN account together with its employee record
    pub async fn delete(&self, id: i64) -> AppResult<ForceLogout> {
        let mut tx = self.pool.begin().await?;
        let current = load_detail(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))?;

        if current.is_admin() {
            return Err(AppError::conflict_with_message(
                ErrorCode::CannotDeleteAdmin,
                "Cannot delete admin accounts. Admin accounts can only be viewed.",
            ));
        }

        if let Some(employee_id) = current.employee_id {
            assignment::delete_for_employee(&mut tx, employee_id).await?;
            employee::delete(&mut tx, employee_id).await?;
        }
        account::delete(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(account_id = id, employee_id = ?current.employee_id, "Account deleted");
        Ok(ForceLogout { account_id: id })
    }

    /// Self-service change; verifies the current password first
    pub async fn change_own_password(
        &self,
        account_id: i64,
        dto: &ChangePassword,
    ) -> AppResult<ForceLogout> {
        let mut tx = self.pool.begin().await?;
        let acc = account::find_by_id(&mut tx, account_id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, account_id))?;

        if !self.hasher.verify(&dto.current_password, &acc.password_hash) {
            return Err(AppError::InvalidCredential(
                "Current password is incorrect".to_string(),
            ));
        }
        validate_input(dto)?;
        check_new_password(
            self.hasher.as_ref(),
            &acc.password_hash,
            &dto.new_password,
            &dto.confirm_password,
        )?;

        let digest = self.hasher.hash(&dto.new_password)?;
        account::update_password(&mut tx, account_id, &digest).await?;
        tx.commit().await?;

        tracing::info!(account_id, "Password changed");
        Ok(ForceLogout { account_id })
    }

    /// Administrator reset without the current password; refused for ADMIN targets
    pub async fn admin_reset_password(
        &self,
        account_id: i64,
        dto: &PasswordReset,
    ) -> AppResult<ForceLogout> {
        let mut tx = self.pool.begin().await?;
        let target = load_detail(&mut tx, account_id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, account_id))?;

        if target.is_admin() {
            return Err(AppError::conflict_with_message(
                ErrorCode::CannotModifyAdmin,
                "Cannot change password for admin accounts. Admin accounts can only be viewed.",
            ));
        }
        validate_input(dto)?;
        if dto.new_password != dto.confirm_password {
            return Err(AppError::Validation {
                code: ErrorCode::PasswordMismatch,
                field: Some("confirm_password".into()),
                message: ErrorCode::PasswordMismatch.message().into(),
            });
        }

        let digest = self.hasher.hash(&dto.new_password)?;
        account::update_password(&mut tx, account_id, &digest).await?;
        tx.commit().await?;

        tracing::info!(account_id, "Password reset by administrator");
        Ok(ForceLogout { account_id })
    }

    /// Login check. Blocked accounts are refused before the password is looked at.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<AccountDetail> {
        let Some(detail) = self.find_by_username(username.trim()).await? else {
            return Err(AppError::invalid_credentials());
        };
        if detail.account.status == AccountStatus::Blocked {
            return Err(AppError::AccountLocked);
        }
        if !self.hasher.verify(password, &detail.account.password_hash) {
            return Err(AppError::invalid_credentials());
        }
        Ok(detail)
    }
}
