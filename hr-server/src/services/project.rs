//! Project Service
//!
//! Projects and their assignments. Deleting a project removes its
//! assignments in the same transaction.

use shared::models::{
    AssignmentDetail, AssignmentForm, Project, ProjectAssignment, ProjectForm, ProjectStatus,
};
use shared::{ErrorCode, PageRequest, PaginatedResponse};
use sqlx::SqlitePool;

use super::uniqueness::ensure_not_assigned;
use crate::db::repository::{assignment, employee, project};
use crate::utils::time::today;
use crate::utils::validation::{normalize_role_in_project, validate_input};
use crate::utils::{AppError, AppResult};

const ENTITY: &str = "Project";
const ASSIGNMENT: &str = "Project assignment";

fn check_dates(form: &ProjectForm) -> AppResult<()> {
    if !form.dates_in_order() {
        return Err(AppError::Validation {
            code: ErrorCode::InvalidProjectDates,
            field: Some("end_date".into()),
            message: ErrorCode::InvalidProjectDates.message().into(),
        });
    }
    Ok(())
}

#[derive(Clone)]
pub struct ProjectService {
    pool: SqlitePool,
    page_size: u32,
}

impl ProjectService {
    pub fn new(pool: SqlitePool, page_size: u32) -> Self {
        Self { pool, page_size }
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Project> {
        let mut conn = self.pool.acquire().await?;
        project::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))
    }

    pub async fn list_all(&self, page: PageRequest) -> AppResult<PaginatedResponse<Project>> {
        let limit = page.limit_or(self.page_size);
        let mut conn = self.pool.acquire().await?;
        let total = project::count_all(&mut conn).await?;
        let data = project::list_all(&mut conn, i64::from(limit), page.offset(self.page_size)).await?;
        Ok(PaginatedResponse::new(data, total as u64, page.page(), limit))
    }

    /// Projects the employee is assigned to
    pub async fn list_for_employee(
        &self,
        employee_id: i64,
        page: PageRequest,
    ) -> AppResult<PaginatedResponse<Project>> {
        let limit = page.limit_or(self.page_size);
        let mut conn = self.pool.acquire().await?;
        let total = project::count_for_employee(&mut conn, employee_id).await?;
        let data = project::list_for_employee(
            &mut conn,
            employee_id,
            i64::from(limit),
            page.offset(self.page_size),
        )
        .await?;
        Ok(PaginatedResponse::new(data, total as u64, page.page(), limit))
    }

    pub async fn create(&self, form: &ProjectForm) -> AppResult<Project> {
        validate_input(form)?;
        check_dates(form)?;

        let mut tx = self.pool.begin().await?;
        let created = project::insert(
            &mut tx,
            form.name.trim(),
            form.start_date,
            form.end_date,
            form.status.unwrap_or_default(),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(project_id = created.id, name = %created.name, "Project created");
        Ok(created)
    }

    /// A missing status leaves the current one in place
    pub async fn update(&self, id: i64, form: &ProjectForm) -> AppResult<Project> {
        validate_input(form)?;
        check_dates(form)?;

        let mut tx = self.pool.begin().await?;
        let current = project::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))?;
        let status: ProjectStatus = form.status.unwrap_or(current.status);
        let updated = project::update(&mut tx, id, form.name.trim(), form.start_date, form.end_date, status)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, id))?;
        tx.commit().await?;

        tracing::info!(project_id = id, status = ?updated.status, "Project updated");
        Ok(updated)
    }

    /// Remove the project's assignments, then the project
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        if project::find_by_id(&mut tx, id).await?.is_none() {
            return Err(AppError::not_found(ENTITY, id));
        }
        let removed = assignment::delete_for_project(&mut tx, id).await?;
        project::delete(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(project_id = id, assignments = removed, "Project deleted");
        Ok(())
    }

    pub async fn assignments(&self, project_id: i64) -> AppResult<Vec<AssignmentDetail>> {
        let mut conn = self.pool.acquire().await?;
        if project::find_by_id(&mut conn, project_id).await?.is_none() {
            return Err(AppError::not_found(ENTITY, project_id));
        }
        Ok(assignment::by_project(&mut conn, project_id).await?)
    }

    pub async fn assignments_for_employee(&self, employee_id: i64) -> AppResult<Vec<AssignmentDetail>> {
        let mut conn = self.pool.acquire().await?;
        Ok(assignment::by_employee(&mut conn, employee_id).await?)
    }

    pub async fn is_assigned(&self, project_id: i64, employee_id: i64) -> AppResult<bool> {
        let mut conn = self.pool.acquire().await?;
        Ok(assignment::exists(&mut conn, project_id, employee_id).await?)
    }

    /// Assign an employee; the join date defaults to today and must fall
    /// inside whichever project bounds exist
    pub async fn add_assignment(
        &self,
        project_id: i64,
        form: &AssignmentForm,
    ) -> AppResult<ProjectAssignment> {
        validate_input(form)?;

        let mut tx = self.pool.begin().await?;
        let proj = project::find_by_id(&mut tx, project_id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY, project_id))?;
        if employee::find_by_id(&mut tx, form.employee_id).await?.is_none() {
            return Err(AppError::not_found("Employee", form.employee_id));
        }
        ensure_not_assigned(&mut tx, project_id, form.employee_id).await?;

        let join_date = form.join_date.unwrap_or_else(today);
        if proj.start_date.is_some_and(|start| join_date < start) {
            return Err(AppError::rule_with_message(
                ErrorCode::JoinDateOutOfRange,
                "Cannot add member before project start date. Please select a join date on or after the project start date.",
            ));
        }
        if proj.end_date.is_some_and(|end| join_date > end) {
            return Err(AppError::rule_with_message(
                ErrorCode::JoinDateOutOfRange,
                "Cannot add member after project end date. Please select a join date on or before the project end date.",
            ));
        }

        let created = assignment::insert(
            &mut tx,
            project_id,
            form.employee_id,
            &normalize_role_in_project(&form.role_in_project),
            Some(join_date),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            assignment_id = created.id,
            project_id,
            employee_id = form.employee_id,
            role = %created.role_in_project,
            "Employee assigned to project"
        );
        Ok(created)
    }

    pub async fn remove_assignment(&self, assignment_id: i64) -> AppResult<ProjectAssignment> {
        let mut tx = self.pool.begin().await?;
        let existing = assignment::find_by_id(&mut tx, assignment_id)
            .await?
            .ok_or_else(|| AppError::not_found(ASSIGNMENT, assignment_id))?;
        assignment::delete(&mut tx, assignment_id).await?;
        tx.commit().await?;

        tracing::info!(assignment_id, project_id = existing.project_id, "Assignment removed");
        Ok(existing)
    }
}
