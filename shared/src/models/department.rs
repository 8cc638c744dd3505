//! Department Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Department entity (部门)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Department list row with its member count
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DepartmentSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub employee_count: i64,
}

/// Create / update department payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DepartmentForm {
    #[validate(length(min = 2, max = 50, message = "Department name must be between 2 and 50 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Sortable department list columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DepartmentSortField {
    #[default]
    Name,
    Description,
}

impl DepartmentSortField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name => "d.name",
            Self::Description => "d.description",
        }
    }
}

/// Department list query (`?sort_by=name|description&sort_dir=asc|desc`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartmentListQuery {
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_dir: Option<String>,
}

impl DepartmentListQuery {
    /// Resolved order; an unknown column falls back to name ascending
    pub fn order(&self) -> (DepartmentSortField, bool) {
        let ascending = !self
            .sort_dir
            .as_deref()
            .is_some_and(|d| d.trim().eq_ignore_ascii_case("desc"));
        match self.sort_by.as_deref().map(str::trim) {
            None | Some("") | Some("name") => (DepartmentSortField::Name, ascending),
            Some("description") => (DepartmentSortField::Description, ascending),
            Some(_) => (DepartmentSortField::Name, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(sort_by: Option<&str>, sort_dir: Option<&str>) -> DepartmentListQuery {
        DepartmentListQuery {
            sort_by: sort_by.map(Into::into),
            sort_dir: sort_dir.map(Into::into),
        }
    }

    #[test]
    fn test_default_order_is_name_ascending() {
        assert_eq!(query(None, None).order(), (DepartmentSortField::Name, true));
        assert_eq!(query(Some(" "), Some("asc")).order(), (DepartmentSortField::Name, true));
    }

    #[test]
    fn test_direction_is_case_insensitive() {
        assert_eq!(
            query(Some("description"), Some("DESC")).order(),
            (DepartmentSortField::Description, false)
        );
        assert_eq!(query(Some("name"), Some("sideways")).order(), (DepartmentSortField::Name, true));
    }

    #[test]
    fn test_unknown_column_resets_to_name_ascending() {
        assert_eq!(
            query(Some("id; DROP TABLE department"), Some("desc")).order(),
            (DepartmentSortField::Name, true)
        );
    }
}
