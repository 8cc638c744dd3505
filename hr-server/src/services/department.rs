//! Department Service

use shared::models::{
    Department, DepartmentForm, DepartmentListQuery, DepartmentSummary, EmployeeDetail,
};
use shared::ErrorCode;
use sqlx::SqlitePool;

use super::uniqueness::ensure_department_name_free;
use crate::db::repository::{department, employee};
use crate::utils::validation::validate_input;
use crate::utils::{AppError, AppResult};

const ENTITY: &str = "Department";

/// Blank descriptions are stored as NULL
fn description(form: &DepartmentForm) -> Option<&str> {
    form.description.as_deref().map(str::trim).filter(|d| !d.is_empty())
}

#[derive(Clone)]
pub struct DepartmentService {
    pool: SqlitePool,
}

impl DepartmentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All departments with member counts, ordered by name or description
    pub async fn list(&self, query: &DepartmentListQuery) -> AppResult<Vec<DepartmentSummary>> {
        let (sort, ascending) = query.order();
        let mut conn = self.pool.acquire().await?;
        Ok(department::list_with_counts(&mut conn, sort, ascending).await?)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Department> {
        let mut conn = self.pool.acquire().await?;
        department::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))
    }

    pub async fn members(&self, id: i64) -> AppResult<Vec<EmployeeDetail>> {
        let mut conn = self.pool.acquire().await?;
        if department::find_by_id(&mut conn, id).await?.is_none() {
            return Err(AppError::not_found(ENTITY, id));
        }
        Ok(employee::members(&mut conn, id).await?)
    }

    /// Employees that could be added to the department
    pub async fn non_members(&self, id: i64) -> AppResult<Vec<EmployeeDetail>> {
        let mut conn = self.pool.acquire().await?;
        if department::find_by_id(&mut conn, id).await?.is_none() {
            return Err(AppError::not_found(ENTITY, id));
        }
        Ok(employee::non_members(&mut conn, id).await?)
    }

    pub async fn create(&self, form: &DepartmentForm) -> AppResult<Department> {
        validate_input(form)?;
        let name = form.name.trim();

        let mut tx = self.pool.begin().await?;
        ensure_department_name_free(&mut tx, name, None).await?;
        let dept = department::insert(&mut tx, name, description(form)).await?;
        tx.commit().await?;

        tracing::info!(department_id = dept.id, name = %dept.name, "Department created");
        Ok(dept)
    }

    pub async fn update(&self, id: i64, form: &DepartmentForm) -> AppResult<Department> {
        validate_input(form)?;
        let name = form.name.trim();

        let mut tx = self.pool.begin().await?;
        if department::find_by_id(&mut tx, id).await?.is_none() {
            return Err(AppError::not_found(ENTITY, id));
        }
        ensure_department_name_free(&mut tx, name, Some(id)).await?;
        let dept = department::update(&mut tx, id, name, description(form))
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))?;
        tx.commit().await?;

        tracing::info!(department_id = id, "Department updated");
        Ok(dept)
    }

    /// Refused while the department still has members
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        if department::find_by_id(&mut tx, id).await?.is_none() {
            return Err(AppError::not_found(ENTITY, id));
        }
        let members = department::member_count(&mut tx, id).await?;
        if members > 0 {
            return Err(AppError::conflict(ErrorCode::DepartmentHasEmployees));
        }
        department::delete(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(department_id = id, "Department deleted");
        Ok(())
    }

    /// Move an employee into the department
    pub async fn add_employee(&self, department_id: i64, employee_id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        if department::find_by_id(&mut tx, department_id).await?.is_none() {
            return Err(AppError::not_found(ENTITY, department_id));
        }
        let emp = employee::find_by_id(&mut tx, employee_id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee", employee_id))?;

        if emp.department_id == Some(department_id) {
            return Err(AppError::rule(ErrorCode::AlreadyInDepartment));
        }
        employee::set_department(&mut tx, employee_id, Some(department_id)).await?;
        tx.commit().await?;

        tracing::info!(department_id, employee_id, from = ?emp.department_id, "Employee added to department");
        Ok(())
    }

    /// Detach an employee, leaving them without a department
    pub async fn remove_employee(&self, department_id: i64, employee_id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        if department::find_by_id(&mut tx, department_id).await?.is_none() {
            return Err(AppError::not_found(ENTITY, department_id));
        }
        let emp = employee::find_by_id(&mut tx, employee_id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee", employee_id))?;

        if emp.department_id != Some(department_id) {
            return Err(AppError::rule(ErrorCode::NotInDepartment));
        }
        employee::set_department(&mut tx, employee_id, None).await?;
        tx.commit().await?;

        tracing::info!(department_id, employee_id, "Employee removed from department");
        Ok(())
    }
}
