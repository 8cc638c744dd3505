//! Dashboard Aggregator
//!
//! The caller's highest role picks the view. A caller without a linked
//! employee record gets an empty personal section, never an error.

use chrono::NaiveDate;
use shared::models::{
    AccountStatus, AdminDashboard, AssignmentDetail, DashboardView, DepartmentStats,
    EmployeeDashboard, ManagerDashboard, ProfileCard, ProjectDuration, RoleName,
};
use sqlx::{SqliteConnection, SqlitePool};

use crate::db::repository::{assignment, dashboard, department, employee};
use crate::utils::AppResult;
use crate::utils::time::days_between;

/// Accounts counted as staff on the admin dashboard
const STAFF_ROLES: [RoleName; 2] = [RoleName::Employee, RoleName::Manager];

/// Days on a project: effective join date (own, else project start) until the
/// project end (else `today`). `None` when neither start is known.
pub fn project_days(a: &AssignmentDetail, today: NaiveDate) -> Option<i64> {
    let from = a.join_date.or(a.project_start_date)?;
    let to = a.project_end_date.unwrap_or(today);
    Some(days_between(from, to))
}

#[derive(Clone)]
pub struct DashboardService {
    pool: SqlitePool,
}

impl DashboardService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn view_for(
        &self,
        account_id: i64,
        roles: &[RoleName],
        today: NaiveDate,
    ) -> AppResult<DashboardView> {
        let mut conn = self.pool.acquire().await?;
        let view = match roles.iter().max() {
            Some(RoleName::Admin) => DashboardView::Admin(admin_view(&mut conn).await?),
            Some(RoleName::Manager) => {
                DashboardView::Manager(manager_view(&mut conn, account_id).await?)
            }
            Some(RoleName::Employee) | None => {
                DashboardView::Employee(employee_view(&mut conn, account_id, today).await?)
            }
        };
        Ok(view)
    }
}

async fn admin_view(conn: &mut SqliteConnection) -> AppResult<AdminDashboard> {
    let totals = dashboard::totals(conn).await?;
    Ok(AdminDashboard {
        total_departments: totals.departments,
        total_accounts: totals.accounts,
        total_projects: totals.projects,
        active_staff: dashboard::count_accounts_with_roles(conn, &STAFF_ROLES, AccountStatus::Active)
            .await?,
        blocked_staff: dashboard::count_accounts_with_roles(conn, &STAFF_ROLES, AccountStatus::Blocked)
            .await?,
        employees_by_department: dashboard::employees_by_department(conn).await?,
        employees_by_gender: dashboard::employees_by_gender(conn).await?,
    })
}

async fn manager_view(conn: &mut SqliteConnection, account_id: i64) -> AppResult<ManagerDashboard> {
    let totals = dashboard::totals(conn).await?;
    let active_employees =
        dashboard::count_accounts_with_roles(conn, &[RoleName::Employee], AccountStatus::Active).await?;

    let own_department = match employee::find_by_account_id(conn, account_id).await? {
        Some(emp) => match emp.department_id {
            Some(dept_id) => department::find_by_id(conn, dept_id).await?,
            None => None,
        },
        None => None,
    };

    let department = match own_department {
        Some(dept) => Some(DepartmentStats {
            department_id: dept.id,
            member_count: department::member_count(conn, dept.id).await?,
            active_members: dashboard::count_members_with_status(conn, dept.id, AccountStatus::Active)
                .await?,
            blocked_members: dashboard::count_members_with_status(conn, dept.id, AccountStatus::Blocked)
                .await?,
            department_name: dept.name,
        }),
        None => None,
    };

    Ok(ManagerDashboard {
        total_departments: totals.departments,
        active_employees,
        total_projects: totals.projects,
        department,
    })
}

async fn employee_view(
    conn: &mut SqliteConnection,
    account_id: i64,
    today: NaiveDate,
) -> AppResult<EmployeeDashboard> {
    let Some(me) = employee::find_detail_by_account_id(conn, account_id).await? else {
        return Ok(EmployeeDashboard::default());
    };

    let assignments = assignment::by_employee(conn, me.id).await?;
    let projects = assignments
        .iter()
        .filter_map(|a| {
            project_days(a, today).map(|days| ProjectDuration {
                project_id: a.project_id,
                project_name: a.project_name.clone(),
                role_in_project: a.role_in_project.clone(),
                days,
            })
        })
        .collect();

    Ok(EmployeeDashboard {
        assignment_count: assignments.len() as i64,
        projects,
        profile: Some(ProfileCard {
            full_name: me.full_name,
            email: me.email,
            phone: me.phone,
            department_name: me.department_name,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ProjectStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn detail(join: Option<NaiveDate>, start: Option<NaiveDate>, end: Option<NaiveDate>) -> AssignmentDetail {
        AssignmentDetail {
            id: 1,
            project_id: 1,
            project_name: "Portal".into(),
            project_status: ProjectStatus::Ongoing,
            project_start_date: start,
            project_end_date: end,
            employee_id: 1,
            employee_name: "John Doe".into(),
            role_in_project: "DEVELOPER".into(),
            join_date: join,
        }
    }

    #[test]
    fn test_days_from_join_date_to_end() {
        let a = detail(Some(date(2024, 1, 1)), Some(date(2023, 12, 1)), Some(date(2024, 12, 31)));
        assert_eq!(project_days(&a, date(2030, 1, 1)), Some(365));
    }

    #[test]
    fn test_days_fall_back_to_project_start_and_today() {
        let a = detail(None, Some(date(2024, 3, 1)), None);
        assert_eq!(project_days(&a, date(2024, 3, 11)), Some(10));
    }

    #[test]
    fn test_days_skipped_without_start() {
        let a = detail(None, None, Some(date(2024, 12, 31)));
        assert_eq!(project_days(&a, date(2024, 6, 1)), None);
    }
}
