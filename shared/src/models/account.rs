//! Account Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::role::{Role, RoleName};
use crate::pagination::PageRequest;

/// Account status; blocked accounts cannot log in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum AccountStatus {
    #[default]
    Active,
    Blocked,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "Active",
            AccountStatus::Blocked => "Blocked",
        }
    }
}

/// Account entity (登录身份)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Never leaves the server
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub status: AccountStatus,
}

/// Account with its roles and linked employee id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDetail {
    #[serde(flatten)]
    pub account: Account,
    pub roles: Vec<Role>,
    pub employee_id: Option<i64>,
}

impl AccountDetail {
    pub fn has_role(&self, name: RoleName) -> bool {
        self.roles.iter().any(|r| r.name == name)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(RoleName::Admin)
    }

    pub fn role_names(&self) -> Vec<RoleName> {
        self.roles.iter().map(|r| r.name).collect()
    }
}

/// Create / update account payload
///
/// `password` is required on create and optional on update (blank keeps
/// the current digest).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AccountForm {
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub status: AccountStatus,
    #[validate(length(min = 1, message = "At least one role is required"))]
    pub role_ids: Vec<i64>,
}

/// Self-service password change
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePassword {
    pub current_password: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
    pub confirm_password: String,
}

/// Administrator-initiated password reset (no current password)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordReset {
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
    pub confirm_password: String,
}

/// Account search filters (query string)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountSearch {
    pub keyword: Option<String>,
    pub role_id: Option<i64>,
    pub status: Option<AccountStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl AccountSearch {
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            limit: self.limit,
        }
    }
}
