//! Login DTOs

use serde::{Deserialize, Serialize};

use super::role::RoleName;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: SessionUser,
}

/// Identity carried by a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub account_id: i64,
    pub username: String,
    pub roles: Vec<RoleName>,
}
