//! Dashboard Models
//!
//! One view per role; the caller's highest role picks which one is built.

use serde::{Deserialize, Serialize};

/// Label + count pair for grouped statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct NamedCount {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub total_departments: i64,
    pub total_accounts: i64,
    pub total_projects: i64,
    /// Accounts holding EMPLOYEE or MANAGER, by status
    pub active_staff: i64,
    pub blocked_staff: i64,
    pub employees_by_department: Vec<NamedCount>,
    pub employees_by_gender: Vec<NamedCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentStats {
    pub department_id: i64,
    pub department_name: String,
    pub member_count: i64,
    pub active_members: i64,
    pub blocked_members: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManagerDashboard {
    pub total_departments: i64,
    /// EMPLOYEE-role accounts with status Active
    pub active_employees: i64,
    pub total_projects: i64,
    /// The manager's own department, when they have one
    pub department: Option<DepartmentStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDuration {
    pub project_id: i64,
    pub project_name: String,
    pub role_in_project: String,
    pub days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCard {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub department_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeDashboard {
    pub assignment_count: i64,
    pub projects: Vec<ProjectDuration>,
    pub profile: Option<ProfileCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DashboardView {
    Admin(AdminDashboard),
    Manager(ManagerDashboard),
    Employee(EmployeeDashboard),
}
