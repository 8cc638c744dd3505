//! Project Assignment Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::project::ProjectStatus;
use super::validate::validate_not_blank;

/// Assignment entity: one employee's role on one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProjectAssignment {
    pub id: i64,
    pub project_id: i64,
    pub employee_id: i64,
    /// Stored trimmed and upper-case
    pub role_in_project: String,
    pub join_date: Option<NaiveDate>,
}

/// Assignment joined with project and employee names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AssignmentDetail {
    pub id: i64,
    pub project_id: i64,
    pub project_name: String,
    pub project_status: ProjectStatus,
    pub project_start_date: Option<NaiveDate>,
    pub project_end_date: Option<NaiveDate>,
    pub employee_id: i64,
    pub employee_name: String,
    pub role_in_project: String,
    pub join_date: Option<NaiveDate>,
}

/// Add assignment payload (project id comes from the path)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignmentForm {
    pub employee_id: i64,
    #[validate(
        length(min = 2, max = 30, message = "Role in project must be between 2 and 30 characters"),
        custom(function = "validate_not_blank", message = "Role in project is required")
    )]
    pub role_in_project: String,
    /// Defaults to today
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
}
