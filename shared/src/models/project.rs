//! Project Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum ProjectStatus {
    #[default]
    Planning,
    Ongoing,
    Completed,
    Cancelled,
}

/// Project entity (项目)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: ProjectStatus,
}

/// Create / update project payload
///
/// A missing `status` means Planning on create and "unchanged" on update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProjectForm {
    #[validate(length(min = 2, max = 100, message = "Project name must be between 2 and 100 characters"))]
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
}

impl ProjectForm {
    /// End date must be strictly after start date when both are present
    pub fn dates_in_order(&self) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => end > start,
            _ => true,
        }
    }
}
