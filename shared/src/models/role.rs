//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role tag governing route-level authorization
///
/// Ordered by privilege: `Admin > Manager > Employee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
pub enum RoleName {
    Employee,
    Manager,
    Admin,
}

impl RoleName {
    pub const ALL: [RoleName; 3] = [RoleName::Admin, RoleName::Manager, RoleName::Employee];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "ADMIN",
            RoleName::Manager => "MANAGER",
            RoleName::Employee => "EMPLOYEE",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for RoleName {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(RoleName::Admin),
            "MANAGER" => Ok(RoleName::Manager),
            "EMPLOYEE" => Ok(RoleName::Employee),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Role entity (RBAC 角色)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Role {
    pub id: i64,
    pub name: RoleName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_parse() {
        assert_eq!("ADMIN".parse::<RoleName>(), Ok(RoleName::Admin));
        assert_eq!(" manager ".parse::<RoleName>(), Ok(RoleName::Manager));
        assert!("ROOT".parse::<RoleName>().is_err());
    }

    #[test]
    fn test_role_name_order() {
        assert!(RoleName::Admin > RoleName::Manager);
        assert!(RoleName::Manager > RoleName::Employee);
        assert_eq!(
            [RoleName::Employee, RoleName::Admin].iter().max(),
            Some(&RoleName::Admin)
        );
    }

    #[test]
    fn test_role_name_serde() {
        assert_eq!(serde_json::to_string(&RoleName::Employee).unwrap(), "\"EMPLOYEE\"");
        let name: RoleName = serde_json::from_str("\"MANAGER\"").unwrap();
        assert_eq!(name, RoleName::Manager);
    }
}
