//! Authorization policy
//!
//! One declarative table maps each [`Intent`] to the roles allowed to perform
//! it, and [`classify`] maps an HTTP request onto an intent. Both are pure so
//! they are tested without a server.
//!
//! | Intent | Roles |
//! |--------|-------|
//! | AccountManage | ADMIN |
//! | DepartmentView | ADMIN, MANAGER |
//! | DepartmentManage | ADMIN |
//! | ProjectView | ADMIN, MANAGER, EMPLOYEE (EMPLOYEE-only callers are scoped) |
//! | ProjectManage | ADMIN, MANAGER |
//! | EmployeeManage | ADMIN, MANAGER |
//! | EmployeePasswordReset | ADMIN |
//! | OwnProfile | any role |

use http::Method;
use shared::models::RoleName;

/// What a request is trying to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    AccountManage,
    DepartmentView,
    DepartmentManage,
    ProjectView,
    ProjectManage,
    EmployeeManage,
    EmployeePasswordReset,
    OwnProfile,
}

use RoleName::{Admin, Employee, Manager};

/// 权限表
pub const POLICY: &[(Intent, &[RoleName])] = &[
    (Intent::AccountManage, &[Admin]),
    (Intent::DepartmentView, &[Admin, Manager]),
    (Intent::DepartmentManage, &[Admin]),
    (Intent::ProjectView, &[Admin, Manager, Employee]),
    (Intent::ProjectManage, &[Admin, Manager]),
    (Intent::EmployeeManage, &[Admin, Manager]),
    (Intent::EmployeePasswordReset, &[Admin]),
    (Intent::OwnProfile, &[Admin, Manager, Employee]),
];

impl Intent {
    /// Roles allowed by the policy table
    pub fn allowed_roles(&self) -> &'static [RoleName] {
        POLICY
            .iter()
            .find(|(intent, _)| intent == self)
            .map(|(_, roles)| *roles)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
    Unauthenticated,
}

/// Decide whether a principal holding `roles` may perform `intent`
pub fn authorize(roles: Option<&[RoleName]>, intent: Intent) -> Decision {
    let Some(roles) = roles else {
        return Decision::Unauthenticated;
    };
    let allowed = intent.allowed_roles();
    if roles.iter().any(|r| allowed.contains(r)) {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

/// Which projects a caller may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectScope {
    All,
    /// EMPLOYEE-only callers see the projects they are assigned to
    AssignedOnly,
}

pub fn project_scope(roles: &[RoleName]) -> ProjectScope {
    if roles.iter().any(|r| matches!(r, Admin | Manager)) {
        ProjectScope::All
    } else {
        ProjectScope::AssignedOnly
    }
}

/// Route classification of an incoming request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Public,
    Protected(Intent),
    /// Unmapped path or method; answered with a bare 404
    NotFound,
}

fn is_id(segment: &str) -> bool {
    segment.parse::<i64>().is_ok()
}

/// Map a request onto the policy
pub fn classify(method: &Method, path: &str) -> Route {
    if method == Method::OPTIONS {
        return Route::Public;
    }

    let Some(rest) = path.strip_prefix("/api/") else {
        return Route::NotFound;
    };
    let segments: Vec<&str> = rest.trim_end_matches('/').split('/').collect();

    let get = method == Method::GET;
    let post = method == Method::POST;
    let put = method == Method::PUT;
    let delete = method == Method::DELETE;

    use Intent::*;
    let intent = match segments.as_slice() {
        ["health"] if get => return Route::Public,
        ["auth", "login"] if post => return Route::Public,
        ["auth", "logout"] if post => OwnProfile,

        ["roles"] if get => AccountManage,
        ["accounts"] if get || post => AccountManage,
        ["accounts", id] if is_id(id) && (get || put || delete) => AccountManage,
        ["accounts", id, "password"] if is_id(id) && put => AccountManage,

        ["departments"] if get => DepartmentView,
        ["departments"] if post => DepartmentManage,
        ["departments", id] if is_id(id) && get => DepartmentView,
        ["departments", id] if is_id(id) && (put || delete) => DepartmentManage,
        ["departments", id, "employees" | "candidates"] if is_id(id) && get => DepartmentView,
        ["departments", id, "employees", emp] if is_id(id) && is_id(emp) && (post || delete) => {
            DepartmentManage
        }

        ["projects"] if get => ProjectView,
        ["projects"] if post => ProjectManage,
        ["projects", "assignments", id] if is_id(id) && delete => ProjectManage,
        ["projects", id] if is_id(id) && get => ProjectView,
        ["projects", id] if is_id(id) && (put || delete) => ProjectManage,
        ["projects", id, "assignments"] if is_id(id) && get => ProjectView,
        ["projects", id, "assignments"] if is_id(id) && post => ProjectManage,

        ["employees"] if get || post => EmployeeManage,
        ["employees", id] if is_id(id) && (get || put || delete) => EmployeeManage,
        ["employees", id, "password"] if is_id(id) && put => EmployeePasswordReset,

        ["profile"] if get || put => OwnProfile,
        ["profile", "password"] if put => OwnProfile,
        ["profile", "projects"] if get => OwnProfile,
        ["dashboard"] if get => OwnProfile,

        _ => return Route::NotFound,
    };
    Route::Protected(intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(r: &[RoleName]) -> Option<&[RoleName]> {
        Some(r)
    }

    #[test]
    fn test_every_intent_has_policy_row() {
        use Intent::*;
        for intent in [
            AccountManage,
            DepartmentView,
            DepartmentManage,
            ProjectView,
            ProjectManage,
            EmployeeManage,
            EmployeePasswordReset,
            OwnProfile,
        ] {
            assert!(!intent.allowed_roles().is_empty(), "{intent:?}");
        }
    }

    #[test]
    fn test_account_management_admin_only() {
        assert_eq!(authorize(roles(&[Admin]), Intent::AccountManage), Decision::Allow);
        assert_eq!(authorize(roles(&[Manager, Employee]), Intent::AccountManage), Decision::Deny);
        assert_eq!(authorize(roles(&[Employee]), Intent::AccountManage), Decision::Deny);
    }

    #[test]
    fn test_department_view_vs_manage() {
        assert_eq!(authorize(roles(&[Manager]), Intent::DepartmentView), Decision::Allow);
        assert_eq!(authorize(roles(&[Manager]), Intent::DepartmentManage), Decision::Deny);
        assert_eq!(authorize(roles(&[Employee]), Intent::DepartmentView), Decision::Deny);
    }

    #[test]
    fn test_project_rules() {
        assert_eq!(authorize(roles(&[Manager]), Intent::ProjectManage), Decision::Allow);
        assert_eq!(authorize(roles(&[Employee]), Intent::ProjectManage), Decision::Deny);
        assert_eq!(authorize(roles(&[Employee]), Intent::ProjectView), Decision::Allow);
    }

    #[test]
    fn test_employee_password_reset_admin_only() {
        assert_eq!(authorize(roles(&[Manager]), Intent::EmployeeManage), Decision::Allow);
        assert_eq!(authorize(roles(&[Manager]), Intent::EmployeePasswordReset), Decision::Deny);
        assert_eq!(authorize(roles(&[Admin]), Intent::EmployeePasswordReset), Decision::Allow);
    }

    #[test]
    fn test_unauthenticated() {
        assert_eq!(authorize(None, Intent::OwnProfile), Decision::Unauthenticated);
        assert_eq!(authorize(None, Intent::AccountManage), Decision::Unauthenticated);
    }

    #[test]
    fn test_empty_role_set_denied() {
        assert_eq!(authorize(roles(&[]), Intent::OwnProfile), Decision::Deny);
    }

    #[test]
    fn test_project_scope() {
        assert_eq!(project_scope(&[Employee]), ProjectScope::AssignedOnly);
        assert_eq!(project_scope(&[Manager, Employee]), ProjectScope::All);
        assert_eq!(project_scope(&[Admin]), ProjectScope::All);
    }

    #[test]
    fn test_classify_public() {
        assert_eq!(classify(&Method::POST, "/api/auth/login"), Route::Public);
        assert_eq!(classify(&Method::GET, "/api/health"), Route::Public);
        assert_eq!(classify(&Method::OPTIONS, "/api/accounts"), Route::Public);
    }

    #[test]
    fn test_classify_protected() {
        use Intent::*;
        let cases = [
            (Method::GET, "/api/accounts", AccountManage),
            (Method::PUT, "/api/accounts/3/password", AccountManage),
            (Method::GET, "/api/roles", AccountManage),
            (Method::GET, "/api/departments/2/candidates", DepartmentView),
            (Method::DELETE, "/api/departments/2", DepartmentManage),
            (Method::POST, "/api/departments/2/employees/9", DepartmentManage),
            (Method::GET, "/api/projects/4", ProjectView),
            (Method::POST, "/api/projects/4/assignments", ProjectManage),
            (Method::DELETE, "/api/projects/assignments/11", ProjectManage),
            (Method::PUT, "/api/employees/5/password", EmployeePasswordReset),
            (Method::DELETE, "/api/employees/5", EmployeeManage),
            (Method::PUT, "/api/profile/password", OwnProfile),
            (Method::GET, "/api/dashboard", OwnProfile),
            (Method::POST, "/api/auth/logout", OwnProfile),
        ];
        for (method, path, intent) in cases {
            assert_eq!(classify(&method, path), Route::Protected(intent), "{method} {path}");
        }
    }

    #[test]
    fn test_classify_not_found() {
        assert_eq!(classify(&Method::GET, "/.well-known/appspecific/com.chrome.devtools.json"), Route::NotFound);
        assert_eq!(classify(&Method::GET, "/api/.well-known/security.txt"), Route::NotFound);
        assert_eq!(classify(&Method::GET, "/api/accounts/abc"), Route::NotFound);
        assert_eq!(classify(&Method::PATCH, "/api/accounts/1"), Route::NotFound);
        assert_eq!(classify(&Method::GET, "/api/unknown"), Route::NotFound);
        assert_eq!(classify(&Method::GET, "/index.html"), Route::NotFound);
    }
}
