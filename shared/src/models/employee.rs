//! Employee Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::account::AccountStatus;
use super::validate::{validate_past_date, validate_phone};
use crate::pagination::PageRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Employee entity (员工档案)
///
/// Always backed by exactly one account (`account_id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub phone: String,
    pub address: Option<String>,
    pub department_id: Option<i64>,
    pub account_id: i64,
}

/// Employee joined with its department and account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmployeeDetail {
    pub id: i64,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub phone: String,
    pub address: Option<String>,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub account_id: i64,
    pub username: String,
    pub email: String,
    pub status: AccountStatus,
}

/// Employee registration / edit payload
///
/// Creates or updates the employee together with its backing account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeForm {
    #[validate(length(min = 2, max = 100, message = "Full name must be between 2 and 100 characters"))]
    pub full_name: String,
    #[validate(custom(function = "validate_past_date"))]
    pub birth_date: NaiveDate,
    pub gender: Gender,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    pub department_id: i64,
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// Own profile edit: personal fields only
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 2, max = 100, message = "Full name must be between 2 and 100 characters"))]
    pub full_name: String,
    #[validate(custom(function = "validate_past_date"))]
    pub birth_date: NaiveDate,
    pub gender: Gender,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Employee search filters (query string)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeSearch {
    pub keyword: Option<String>,
    pub department_id: Option<i64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl EmployeeSearch {
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> EmployeeForm {
        EmployeeForm {
            full_name: "John Doe".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 15).unwrap(),
            gender: Gender::Male,
            phone: "0912345678".into(),
            address: None,
            department_id: 1,
            username: "jdoe".into(),
            email: "jdoe@company.com".into(),
            password: Some("123456".into()),
        }
    }

    #[test]
    fn test_employee_form_valid() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_employee_form_bad_phone() {
        let mut f = form();
        f.phone = "12345".into();
        let errors = f.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }

    #[test]
    fn test_employee_form_future_birth_date() {
        let mut f = form();
        f.birth_date = NaiveDate::from_ymd_opt(2999, 1, 1).unwrap();
        let errors = f.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("birth_date"));
    }

    #[test]
    fn test_gender_serde() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"Female\"");
    }
}
