//! Employee service: registration, edits, cascades and password flows

mod common;

use common::*;
use hr_server::services::{AccountService, EmployeeService};
use hr_server::utils::AppError;
use shared::ErrorCode;
use shared::models::{
    AccountForm, AccountStatus, ChangePassword, EmployeeSearch, Gender, PasswordReset, ProfileForm, RoleName,
};

fn services(pool: &sqlx::SqlitePool) -> (EmployeeService, AccountService) {
    (
        EmployeeService::new(pool.clone(), hasher(), 10),
        AccountService::new(pool.clone(), hasher(), 10),
    )
}

#[tokio::test]
async fn test_create_provisions_active_employee_account() {
    let pool = seeded_pool().await;
    let (employees, accounts) = services(&pool);

    let created = employees.create(&employee_form("newbie", "0987654321")).await.unwrap();
    assert_eq!(created.full_name, "Test Person");
    assert_eq!(created.department_id, Some(DEPT_HR));
    assert_eq!(created.department_name.as_deref(), Some("HR"));
    assert_eq!(created.status, AccountStatus::Active);
    // blank address is stored as NULL
    assert!(created.address.is_none());

    let account = accounts.find_by_id(created.account_id).await.unwrap();
    assert_eq!(account.role_names(), vec![RoleName::Employee]);
    assert_eq!(account.employee_id, Some(created.id));
    assert!(accounts.authenticate("newbie", "secret1").await.is_ok());
}

#[tokio::test]
async fn test_create_names_the_colliding_field() {
    let pool = seeded_pool().await;
    let (employees, _) = services(&pool);

    let taken_username = employees.create(&employee_form("emp2", "0987654321")).await.unwrap_err();
    assert_eq!(taken_username.field_name(), Some("username"));

    let mut taken_email = employee_form("fresh", "0987654321");
    taken_email.email = "Emp2@Company.com".into();
    let err = employees.create(&taken_email).await.unwrap_err();
    assert_eq!(err.field_name(), Some("email"));

    // Jane's phone
    let taken_phone = employees.create(&employee_form("fresh", "0923456789")).await.unwrap_err();
    assert_eq!(taken_phone.field_name(), Some("phone"));
    assert_eq!(taken_phone.code(), ErrorCode::AlreadyExists);

    // nothing half-written
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM account")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(total, 8);
}

#[tokio::test]
async fn test_create_rejects_short_password_and_unknown_department() {
    let pool = seeded_pool().await;
    let (employees, _) = services(&pool);

    let mut short = employee_form("shorty", "0987654321");
    short.password = Some("abc".into());
    assert_eq!(
        employees.create(&short).await.unwrap_err().code(),
        ErrorCode::PasswordTooShort
    );

    let mut nowhere = employee_form("nowhere", "0987654321");
    nowhere.department_id = 42;
    assert!(matches!(
        employees.create(&nowhere).await,
        Err(AppError::NotFound { entity: "Department", id: 42 })
    ));
}

#[tokio::test]
async fn test_create_validates_shape() {
    let pool = seeded_pool().await;
    let (employees, _) = services(&pool);

    let mut bad_phone = employee_form("badphone", "12ab");
    bad_phone.phone = "12ab".into();
    assert_eq!(
        employees.create(&bad_phone).await.unwrap_err().field_name(),
        Some("phone")
    );

    let mut future = employee_form("future", "0987654321");
    future.birth_date = date(2999, 1, 1);
    assert_eq!(
        employees.create(&future).await.unwrap_err().field_name(),
        Some("birth_date")
    );
}

#[tokio::test]
async fn test_update_moves_department_and_keeps_password() {
    let pool = seeded_pool().await;
    let (employees, accounts) = services(&pool);

    let mut edit = employee_form("emp1", "0912345678");
    edit.full_name = "Johnathan Doe".into();
    edit.email = "john@company.com".into();
    edit.department_id = DEPT_SALES;
    edit.password = None;

    let result = employees.update(JOHN, &edit).await.unwrap();
    let updated = result.employee;
    assert_eq!(updated.full_name, "Johnathan Doe");
    assert_eq!(updated.department_name.as_deref(), Some("Sales"));
    assert_eq!(updated.email, "john@company.com");
    assert!(result.signal.is_none());
    assert!(accounts.authenticate("emp1", DEMO_PASSWORD).await.is_ok());
}

#[tokio::test]
async fn test_update_with_password_signals_logout() {
    let pool = seeded_pool().await;
    let (employees, accounts) = services(&pool);

    let mut edit = employee_form("emp1", "0912345678");
    edit.full_name = "John Doe".into();
    edit.department_id = DEPT_IT;
    edit.password = Some("johnpass".into());

    let result = employees.update(JOHN, &edit).await.unwrap();
    assert_eq!(result.signal.map(|s| s.account_id), Some(EMP1_ACCOUNT));
    assert!(accounts.authenticate("emp1", "johnpass").await.is_ok());
}

#[tokio::test]
async fn test_update_keeps_admin_backed_identity() {
    let pool = seeded_pool().await;
    let (employees, accounts) = services(&pool);

    let created = employees.create(&employee_form("promoted", "0987654321")).await.unwrap();
    accounts
        .update(
            created.account_id,
            &AccountForm {
                username: "promoted".into(),
                email: "promoted@company.com".into(),
                password: None,
                status: AccountStatus::Active,
                role_ids: vec![ROLE_ADMIN],
            },
        )
        .await
        .unwrap();

    let mut edit = employee_form("hijacked", "0987654321");
    edit.full_name = "Promoted Person".into();
    edit.password = Some("attacker1".into());
    let result = employees.update(created.id, &edit).await.unwrap();

    assert!(result.signal.is_none());
    assert_eq!(result.employee.full_name, "Promoted Person");
    assert_eq!(result.employee.username, "promoted");
    assert_eq!(result.employee.email, "promoted@company.com");

    assert!(accounts.find_by_username("hijacked").await.unwrap().is_none());
    assert!(accounts.authenticate("promoted", "secret1").await.is_ok());
    assert!(accounts.authenticate("promoted", "attacker1").await.is_err());
}

#[tokio::test]
async fn test_update_rejects_another_employees_phone() {
    let pool = seeded_pool().await;
    let (employees, _) = services(&pool);

    // Bob's phone on John
    let edit = employee_form("emp1", "0934567890");
    let err = employees.update(JOHN, &edit).await.unwrap_err();
    assert_eq!(err.field_name(), Some("phone"));
}

#[tokio::test]
async fn test_delete_cascades_to_account_and_assignments() {
    let pool = seeded_pool().await;
    let (employees, accounts) = services(&pool);

    let signal = employees.delete(JOHN).await.unwrap();
    assert_eq!(signal.account_id, EMP1_ACCOUNT);

    assert!(matches!(
        employees.find_by_id(JOHN).await,
        Err(AppError::NotFound { entity: "Employee", .. })
    ));
    assert!(accounts.find_by_id(EMP1_ACCOUNT).await.is_err());

    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM account_role WHERE account_id = ?")
        .bind(EMP1_ACCOUNT)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(links, 0);
    let assignments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM project_assignment")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(assignments, 4);
}

#[tokio::test]
async fn test_delete_missing_employee() {
    let pool = seeded_pool().await;
    let (employees, _) = services(&pool);
    assert!(matches!(
        employees.delete(999).await,
        Err(AppError::NotFound { entity: "Employee", id: 999 })
    ));
}

#[tokio::test]
async fn test_change_password_through_employee() {
    let pool = seeded_pool().await;
    let (employees, accounts) = services(&pool);

    let signal = employees
        .change_password(
            JANE,
            &ChangePassword {
                current_password: DEMO_PASSWORD.into(),
                new_password: "janepass".into(),
                confirm_password: "janepass".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(signal.account_id, 5);
    assert!(accounts.authenticate("emp2", "janepass").await.is_ok());
}

#[tokio::test]
async fn test_admin_change_password_for_employee() {
    let pool = seeded_pool().await;
    let (employees, accounts) = services(&pool);

    let reset = PasswordReset {
        new_password: "bobnewpw".into(),
        confirm_password: "bobnewpw".into(),
    };
    let _ = employees.admin_change_password(BOB, &reset).await.unwrap();
    assert!(accounts.authenticate("emp3", "bobnewpw").await.is_ok());

    let mismatch = PasswordReset {
        new_password: "bobnewpw".into(),
        confirm_password: "other".into(),
    };
    assert_eq!(
        employees.admin_change_password(BOB, &mismatch).await.unwrap_err().code(),
        ErrorCode::PasswordMismatch
    );
}

#[tokio::test]
async fn test_own_profile_edit_pins_department() {
    let pool = seeded_pool().await;
    let (employees, _) = services(&pool);

    let profile = ProfileForm {
        full_name: "Alice W.".into(),
        birth_date: date(1995, 11, 25),
        gender: Gender::Female,
        phone: "0945678900".into(),
        address: Some("New address".into()),
    };
    // emp4 / Alice
    let updated = employees.update_own_profile(7, &profile).await.unwrap();
    assert_eq!(updated.id, ALICE);
    assert_eq!(updated.full_name, "Alice W.");
    assert_eq!(updated.department_id, Some(DEPT_SALES));
    assert_eq!(updated.address.as_deref(), Some("New address"));

    // account without an employee record
    assert!(employees.update_own_profile(ADMIN1, &profile).await.is_err());
}

#[tokio::test]
async fn test_search_by_name_and_department() {
    let pool = seeded_pool().await;
    let (employees, _) = services(&pool);

    let it = employees
        .search(&EmployeeSearch {
            department_id: Some(DEPT_IT),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(it.total, 3);

    let by_name = employees
        .search(&EmployeeSearch {
            keyword: Some("  jOHN ".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    // John Doe, Bob Johnson
    assert_eq!(by_name.total, 2);

    let none = employees
        .search(&EmployeeSearch {
            keyword: Some("%".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(none.total, 0);
}

#[tokio::test]
async fn test_find_by_account_id() {
    let pool = seeded_pool().await;
    let (employees, _) = services(&pool);

    let john = employees.find_by_account_id(EMP1_ACCOUNT).await.unwrap().unwrap();
    assert_eq!(john.id, JOHN);
    assert_eq!(john.username, "emp1");
    assert!(employees.find_by_account_id(MANAGER1).await.unwrap().is_none());
}
