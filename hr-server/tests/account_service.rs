//! Account service against a seeded in-memory database

mod common;

use common::*;
use hr_server::services::AccountService;
use hr_server::utils::AppError;
use shared::ErrorCode;
use shared::models::{AccountForm, AccountSearch, AccountStatus, ChangePassword, PasswordReset};

fn service(pool: sqlx::SqlitePool) -> AccountService {
    AccountService::new(pool, hasher(), 10)
}

fn form(username: &str, email: &str) -> AccountForm {
    AccountForm {
        username: username.into(),
        email: email.into(),
        password: Some("secret1".into()),
        status: AccountStatus::Active,
        role_ids: vec![ROLE_EMPLOYEE],
    }
}

#[tokio::test]
async fn test_create_account_with_roles() {
    let accounts = service(seeded_pool().await);

    let created = accounts
        .create(&AccountForm {
            role_ids: vec![ROLE_MANAGER, ROLE_EMPLOYEE],
            ..form("carol", "  Carol@Company.com ")
        })
        .await
        .unwrap();

    assert_eq!(created.account.username, "carol");
    assert_eq!(created.account.email, "Carol@Company.com");
    assert_eq!(created.roles.len(), 2);
    assert!(created.employee_id.is_none());

    let found = accounts.find_by_username("carol").await.unwrap().unwrap();
    assert_eq!(found.account.id, created.account.id);
}

#[tokio::test]
async fn test_create_rejects_taken_username() {
    let accounts = service(seeded_pool().await);

    let err = accounts.create(&form("emp1", "fresh@company.com")).await.unwrap_err();
    match err {
        AppError::Duplicate { field, message } => {
            assert_eq!(field, "username");
            assert_eq!(message, "Username already exists. Please choose a different username.");
        }
        other => panic!("expected duplicate username, got {other:?}"),
    }
}

#[tokio::test]
async fn test_email_uniqueness_ignores_case_and_whitespace() {
    let accounts = service(seeded_pool().await);

    let err = accounts
        .create(&form("fresh", " EMP1@company.COM "))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Duplicate { field: "email", .. }));
}

#[tokio::test]
async fn test_username_uniqueness_is_case_sensitive() {
    let accounts = service(seeded_pool().await);
    let created = accounts.create(&form("EMP1", "upper@company.com")).await;
    assert!(created.is_ok());
}

#[tokio::test]
async fn test_create_requires_password() {
    let accounts = service(seeded_pool().await);

    let mut blank = form("nopass", "nopass@company.com");
    blank.password = Some("   ".into());
    let err = accounts.create(&blank).await.unwrap_err();
    assert_eq!(err.field_name(), Some("password"));

    let mut short = form("shorty", "shorty@company.com");
    short.password = Some("12345".into());
    let err = accounts.create(&short).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::PasswordTooShort);
}

#[tokio::test]
async fn test_create_reports_unknown_role() {
    let accounts = service(seeded_pool().await);

    let mut bad = form("norole", "norole@company.com");
    bad.role_ids = vec![ROLE_EMPLOYEE, 99];
    let err = accounts.create(&bad).await.unwrap_err();
    assert_eq!(err.field_name(), Some("role_ids"));
    assert_eq!(err.to_string(), "Role not found with id: 99");
}

#[tokio::test]
async fn test_update_regular_account() {
    let accounts = service(seeded_pool().await);

    let mut edit = form("emp1-renamed", "renamed@company.com");
    edit.password = None;
    edit.role_ids = vec![ROLE_MANAGER];
    let result = accounts.update(EMP1_ACCOUNT, &edit).await.unwrap();

    assert_eq!(result.account.account.username, "emp1-renamed");
    assert_eq!(result.account.role_names(), vec![shared::models::RoleName::Manager]);
    assert!(result.signal.is_none());

    // blank password keeps the old one
    assert!(accounts.authenticate("emp1-renamed", DEMO_PASSWORD).await.is_ok());
}

#[tokio::test]
async fn test_update_with_new_password_signals_logout() {
    let accounts = service(seeded_pool().await);

    let edit = form("emp1", "emp1@company.com");
    let result = accounts.update(EMP1_ACCOUNT, &edit).await.unwrap();
    assert_eq!(result.signal.map(|s| s.account_id), Some(EMP1_ACCOUNT));
    assert!(accounts.authenticate("emp1", "secret1").await.is_ok());
}

#[tokio::test]
async fn test_update_may_keep_own_username_and_email() {
    let accounts = service(seeded_pool().await);

    let mut edit = form("emp1", "EMP1@company.com");
    edit.password = None;
    assert!(accounts.update(EMP1_ACCOUNT, &edit).await.is_ok());
}

#[tokio::test]
async fn test_update_admin_changes_status_only() {
    let accounts = service(seeded_pool().await);

    let edit = AccountForm {
        username: "hijacked".into(),
        email: "hijacked@company.com".into(),
        password: Some("newsecret".into()),
        status: AccountStatus::Blocked,
        role_ids: vec![ROLE_EMPLOYEE],
    };
    let result = accounts.update(ADMIN1, &edit).await.unwrap();

    let admin = result.account;
    assert_eq!(admin.account.username, "admin1");
    assert_eq!(admin.account.email, "admin1@company.com");
    assert_eq!(admin.account.status, AccountStatus::Blocked);
    assert!(admin.is_admin());
    assert_eq!(result.signal.map(|s| s.account_id), Some(ADMIN1));

    // password untouched
    assert!(matches!(
        accounts.authenticate("admin1", "newsecret").await,
        Err(AppError::AccountLocked)
    ));
}

#[tokio::test]
async fn test_delete_admin_is_refused() {
    let accounts = service(seeded_pool().await);

    let err = accounts.delete(ADMIN1).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::CannotDeleteAdmin);
    assert!(accounts.find_by_id(ADMIN1).await.is_ok());
}

#[tokio::test]
async fn test_delete_account_removes_linked_employee() {
    let pool = seeded_pool().await;
    let accounts = service(pool.clone());

    let signal = accounts.delete(EMP1_ACCOUNT).await.unwrap();
    assert_eq!(signal.account_id, EMP1_ACCOUNT);

    assert!(matches!(
        accounts.find_by_id(EMP1_ACCOUNT).await,
        Err(AppError::NotFound { entity: "Account", .. })
    ));
    let employees: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employee WHERE id = ?")
        .bind(JOHN)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(employees, 0);
    let assignments: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM project_assignment WHERE employee_id = ?")
            .bind(JOHN)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(assignments, 0);
}

#[tokio::test]
async fn test_change_own_password() {
    let accounts = service(seeded_pool().await);

    let signal = accounts
        .change_own_password(
            EMP1_ACCOUNT,
            &ChangePassword {
                current_password: DEMO_PASSWORD.into(),
                new_password: "brandnew".into(),
                confirm_password: "brandnew".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(signal.account_id, EMP1_ACCOUNT);

    assert!(accounts.authenticate("emp1", "brandnew").await.is_ok());
    assert!(accounts.authenticate("emp1", DEMO_PASSWORD).await.is_err());
}

#[tokio::test]
async fn test_change_own_password_rules() {
    let accounts = service(seeded_pool().await);

    let wrong_current = ChangePassword {
        current_password: "nope".into(),
        new_password: "brandnew".into(),
        confirm_password: "brandnew".into(),
    };
    let err = accounts.change_own_password(EMP1_ACCOUNT, &wrong_current).await.unwrap_err();
    assert_eq!(err.to_string(), "Current password is incorrect");

    let mismatch = ChangePassword {
        current_password: DEMO_PASSWORD.into(),
        new_password: "brandnew".into(),
        confirm_password: "different".into(),
    };
    let err = accounts.change_own_password(EMP1_ACCOUNT, &mismatch).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::PasswordMismatch);
    assert_eq!(err.field_name(), Some("confirm_password"));

    let unchanged = ChangePassword {
        current_password: DEMO_PASSWORD.into(),
        new_password: DEMO_PASSWORD.into(),
        confirm_password: DEMO_PASSWORD.into(),
    };
    let err = accounts.change_own_password(EMP1_ACCOUNT, &unchanged).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::PasswordUnchanged);
}

#[tokio::test]
async fn test_admin_reset_password() {
    let accounts = service(seeded_pool().await);
    let reset = PasswordReset {
        new_password: "resetpw".into(),
        confirm_password: "resetpw".into(),
    };

    let err = accounts.admin_reset_password(ADMIN1, &reset).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::CannotModifyAdmin);

    let _ = accounts.admin_reset_password(MANAGER1, &reset).await.unwrap();
    assert!(accounts.authenticate("manager1", "resetpw").await.is_ok());

    let short = PasswordReset {
        new_password: "abc".into(),
        confirm_password: "abc".into(),
    };
    assert!(accounts.admin_reset_password(MANAGER1, &short).await.is_err());
}

#[tokio::test]
async fn test_authenticate_failures() {
    let pool = seeded_pool().await;
    let accounts = service(pool.clone());

    let unknown = accounts.authenticate("ghost", DEMO_PASSWORD).await.unwrap_err();
    let wrong = accounts.authenticate("emp1", "wrong").await.unwrap_err();
    assert_eq!(unknown.code(), ErrorCode::InvalidCredentials);
    assert_eq!(unknown.to_string(), wrong.to_string());

    sqlx::query("UPDATE account SET status = 'Blocked' WHERE id = ?")
        .bind(EMP1_ACCOUNT)
        .execute(&pool)
        .await
        .unwrap();
    let blocked = accounts.authenticate("emp1", DEMO_PASSWORD).await.unwrap_err();
    assert!(matches!(blocked, AppError::AccountLocked));
}

#[tokio::test]
async fn test_search_filters_and_pages() {
    let accounts = service(seeded_pool().await);

    let all = accounts.search(&AccountSearch::default()).await.unwrap();
    assert_eq!(all.total, 8);
    assert_eq!(all.data.len(), 8);

    let admins = accounts
        .search(&AccountSearch {
            role_id: Some(ROLE_ADMIN),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(admins.total, 2);

    let by_keyword = accounts
        .search(&AccountSearch {
            keyword: Some("EMP".into()),
            role_id: Some(ROLE_EMPLOYEE),
            limit: Some(2),
            page: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_keyword.total, 5);
    assert_eq!(by_keyword.data.len(), 2);
    assert_eq!(by_keyword.page, 2);
    assert_eq!(by_keyword.total_pages, 3);

    let blocked = accounts
        .search(&AccountSearch {
            status: Some(AccountStatus::Blocked),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(blocked.total, 0);
}

#[tokio::test]
async fn test_list_roles() {
    let accounts = service(seeded_pool().await);
    let roles = accounts.list_roles().await.unwrap();
    assert_eq!(roles.len(), 3);
}
