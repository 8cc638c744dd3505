//! Employee Service
//!
//! An employee is always created together with its own EMPLOYEE account and
//! deleting it removes the account as well.

use std::sync::Arc;

use shared::models::{
    AccountStatus, ChangePassword, Employee, EmployeeDetail, EmployeeForm, EmployeeSearch,
    PasswordReset, ProfileForm, RoleName,
};
use shared::{ErrorCode, PaginatedResponse};
use sqlx::SqlitePool;

use super::account::{AccountService, load_detail};
use super::uniqueness::{ensure_account_identity_free, ensure_phone_free};
use crate::auth::{ForceLogout, PasswordHasher};
use crate::db::repository::employee::EmployeeRecord;
use crate::db::repository::{account, assignment, department, employee, role};
use crate::utils::validation::{
    like_pattern, normalize_email, optional_password, require_password, validate_input,
};
use crate::utils::{AppError, AppResult};

const ENTITY: &str = "Employee";

/// Result of an employee edit
#[derive(Debug)]
pub struct EmployeeUpdate {
    pub employee: EmployeeDetail,
    /// Set when the edit replaced the account password
    pub signal: Option<ForceLogout>,
}

/// Blank addresses are stored as NULL
fn address(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|a| !a.is_empty())
}

#[derive(Clone)]
pub struct EmployeeService {
    pool: SqlitePool,
    hasher: Arc<dyn PasswordHasher>,
    accounts: AccountService,
    page_size: u32,
}

impl EmployeeService {
    pub fn new(pool: SqlitePool, hasher: Arc<dyn PasswordHasher>, page_size: u32) -> Self {
        let accounts = AccountService::new(pool.clone(), hasher.clone(), page_size);
        Self {
            pool,
            hasher,
            accounts,
            page_size,
        }
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<EmployeeDetail> {
        let mut conn = self.pool.acquire().await?;
        employee::find_detail(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))
    }

    /// The employee record linked to an account, if any
    pub async fn find_by_account_id(&self, account_id: i64) -> AppResult<Option<EmployeeDetail>> {
        let mut conn = self.pool.acquire().await?;
        Ok(employee::find_detail_by_account_id(&mut conn, account_id).await?)
    }

    /// Case-insensitive substring match on full name, optionally within one department
    pub async fn search(&self, query: &EmployeeSearch) -> AppResult<PaginatedResponse<EmployeeDetail>> {
        let page = query.page_request();
        let limit = page.limit_or(self.page_size);
        let pattern = like_pattern(query.keyword.as_deref());

        let mut conn = self.pool.acquire().await?;
        let total = employee::count_matching(&mut conn, pattern.as_deref(), query.department_id).await?;
        let data = employee::search(
            &mut conn,
            pattern.as_deref(),
            query.department_id,
            i64::from(limit),
            page.offset(self.page_size),
        )
        .await?;
        Ok(PaginatedResponse::new(data, total as u64, page.page(), limit))
    }

    /// Register an employee with a fresh Active EMPLOYEE account
    pub async fn create(&self, form: &EmployeeForm) -> AppResult<EmployeeDetail> {
        validate_input(form)?;
        let password = require_password(form.password.as_deref())?;
        let email = normalize_email(&form.email);

        let mut tx = self.pool.begin().await?;
        ensure_account_identity_free(&mut tx, &form.username, &email, None).await?;
        ensure_phone_free(&mut tx, &form.phone, None).await?;

        let dept = department::find_by_id(&mut tx, form.department_id)
            .await?
            .ok_or_else(|| AppError::not_found("Department", form.department_id))?;
        let staff_role = role::find_by_name(&mut tx, RoleName::Employee)
            .await?
            .ok_or_else(|| AppError::internal("EMPLOYEE role not found in database"))?;

        let digest = self.hasher.hash(password)?;
        let acc = account::insert(&mut tx, &form.username, &email, &digest, AccountStatus::Active).await?;
        role::set_for_account(&mut tx, acc.id, &[staff_role.id]).await?;

        let record = EmployeeRecord {
            full_name: form.full_name.trim(),
            birth_date: form.birth_date,
            gender: form.gender,
            phone: &form.phone,
            address: address(&form.address),
            department_id: Some(dept.id),
        };
        let created = employee::insert(&mut tx, &record, acc.id).await?;
        let detail = employee::find_detail(&mut tx, created.id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, created.id))?;
        tx.commit().await?;

        tracing::info!(employee_id = created.id, account_id = acc.id, department_id = dept.id, "Employee created");
        Ok(detail)
    }

    /// Edit the employee and its account; a blank password keeps the current one.
    /// An ADMIN-backed record keeps its username, email and password.
    pub async fn update(&self, id: i64, form: &EmployeeForm) -> AppResult<EmployeeUpdate> {
        validate_input(form)?;
        let email = normalize_email(&form.email);
        let new_password = optional_password(form.password.as_deref())?;

        let mut tx = self.pool.begin().await?;
        let current = employee::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))?;
        let admin_backed = load_detail(&mut tx, current.account_id)
            .await?
            .is_some_and(|a| a.is_admin());

        if !admin_backed {
            ensure_account_identity_free(&mut tx, &form.username, &email, Some(current.account_id)).await?;
        }
        ensure_phone_free(&mut tx, &form.phone, Some(id)).await?;

        let dept = department::find_by_id(&mut tx, form.department_id)
            .await?
            .ok_or_else(|| AppError::not_found("Department", form.department_id))?;

        let mut password_changed = false;
        if !admin_backed {
            account::update_identity(&mut tx, current.account_id, &form.username, &email).await?;
            if let Some(password) = new_password {
                let digest = self.hasher.hash(password)?;
                account::update_password(&mut tx, current.account_id, &digest).await?;
                password_changed = true;
            }
        }

        let record = EmployeeRecord {
            full_name: form.full_name.trim(),
            birth_date: form.birth_date,
            gender: form.gender,
            phone: &form.phone,
            address: address(&form.address),
            department_id: Some(dept.id),
        };
        employee::update(&mut tx, id, &record).await?;
        let detail = employee::find_detail(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))?;
        tx.commit().await?;

        if current.department_id != Some(dept.id) {
            tracing::info!(employee_id = id, from = ?current.department_id, to = dept.id, "Employee moved department");
        }
        tracing::info!(employee_id = id, admin_backed, password_changed, "Employee updated");
        Ok(EmployeeUpdate {
            employee: detail,
            signal: password_changed.then_some(ForceLogout {
                account_id: current.account_id,
            }),
        })
    }

    /// Own profile edit: username, email and department stay as they are
    pub async fn update_own_profile(
        &self,
        account_id: i64,
        form: &ProfileForm,
    ) -> AppResult<EmployeeDetail> {
        validate_input(form)?;

        let mut tx = self.pool.begin().await?;
        let current = employee::find_by_account_id(&mut tx, account_id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, account_id))?;

        ensure_phone_free(&mut tx, &form.phone, Some(current.id)).await?;

        let record = EmployeeRecord {
            full_name: form.full_name.trim(),
            birth_date: form.birth_date,
            gender: form.gender,
            phone: &form.phone,
            address: address(&form.address),
            department_id: current.department_id,
        };
        employee::update(&mut tx, current.id, &record).await?;
        let detail = employee::find_detail(&mut tx, current.id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, current.id))?;
        tx.commit().await?;

        tracing::info!(employee_id = current.id, account_id, "Profile updated");
        Ok(detail)
    }

    /// Remove assignments, the employee, then its account
    pub async fn delete(&self, id: i64) -> AppResult<ForceLogout> {
        let mut tx = self.pool.begin().await?;
        let current: Employee = employee::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))?;

        let backing = load_detail(&mut tx, current.account_id).await?;
        if backing.as_ref().is_some_and(|a| a.is_admin()) {
            return Err(AppError::conflict_with_message(
                ErrorCode::CannotDeleteAdmin,
                "Cannot delete admin accounts. Admin accounts can only be viewed.",
            ));
        }

        let removed = assignment::delete_for_employee(&mut tx, id).await?;
        employee::delete(&mut tx, id).await?;
        account::delete(&mut tx, current.account_id).await?;
        tx.commit().await?;

        tracing::info!(employee_id = id, account_id = current.account_id, assignments = removed, "Employee deleted");
        Ok(ForceLogout {
            account_id: current.account_id,
        })
    }

    /// Self-service password change through the linked account
    pub async fn change_password(&self, employee_id: i64, dto: &ChangePassword) -> AppResult<ForceLogout> {
        let account_id = self.account_id_of(employee_id).await?;
        self.accounts.change_own_password(account_id, dto).await
    }

    /// Administrator password change; an ADMIN-backed employee stays protected
    pub async fn admin_change_password(
        &self,
        employee_id: i64,
        dto: &PasswordReset,
    ) -> AppResult<ForceLogout> {
        let account_id = self.account_id_of(employee_id).await?;
        self.accounts.admin_reset_password(account_id, dto).await
    }

    async fn account_id_of(&self, employee_id: i64) -> AppResult<i64> {
        let mut conn = self.pool.acquire().await?;
        employee::find_by_id(&mut conn, employee_id)
            .await?
            .map(|e| e.account_id)
            .ok_or_else(|| AppError::not_found(ENTITY, employee_id))
    }
}
