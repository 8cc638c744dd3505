//! Shared fixtures for integration tests
//!
//! Every test gets its own in-memory database with migrations applied.
//! The pool holds exactly one connection so the database lives as long as
//! the pool does.

#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use hr_server::auth::{HashError, PasswordHasher};
use hr_server::db::seed::seed_if_empty;
use shared::models::{EmployeeForm, Gender};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Seeded ids (insertion order of the demo data)
pub const ROLE_ADMIN: i64 = 1;
pub const ROLE_MANAGER: i64 = 2;
pub const ROLE_EMPLOYEE: i64 = 3;

pub const DEPT_IT: i64 = 1;
pub const DEPT_HR: i64 = 2;
pub const DEPT_SALES: i64 = 3;

pub const ADMIN1: i64 = 1;
pub const MANAGER1: i64 = 3;
/// emp1 / John Doe
pub const EMP1_ACCOUNT: i64 = 4;
pub const JOHN: i64 = 1;
pub const JANE: i64 = 2;
pub const BOB: i64 = 3;
pub const ALICE: i64 = 4;

pub const ECOMMERCE: i64 = 1;
pub const CRM: i64 = 2;

pub const DEMO_PASSWORD: &str = "123456";

/// Reversible "digest" so tests stay fast
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, digest: &str) -> bool {
        digest.strip_prefix("plain:") == Some(password)
    }
}

pub fn hasher() -> Arc<dyn PasswordHasher> {
    Arc::new(PlainHasher)
}

/// Empty schema
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

/// Schema plus the demo data
pub async fn seeded_pool() -> SqlitePool {
    let pool = test_pool().await;
    assert!(seed_if_empty(&pool, &PlainHasher).await.unwrap());
    pool
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A valid registration that collides with nothing in the demo data
pub fn employee_form(username: &str, phone: &str) -> EmployeeForm {
    EmployeeForm {
        full_name: "Test Person".into(),
        birth_date: date(1993, 4, 2),
        gender: Gender::Other,
        phone: phone.into(),
        address: Some("  ".into()),
        department_id: DEPT_HR,
        username: username.into(),
        email: format!("{username}@company.com"),
        password: Some("secret1".into()),
    }
}
