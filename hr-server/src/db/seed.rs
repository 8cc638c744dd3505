//! First-run demo data
//!
//! Runs only when the `role` table is empty, inside a single transaction.

use chrono::NaiveDate;
use shared::models::{AccountStatus, Gender, ProjectStatus, RoleName};
use sqlx::SqlitePool;

use super::repository::{account, assignment, department, employee, project, role};
use crate::auth::PasswordHasher;
use crate::utils::validation::normalize_role_in_project;
use crate::utils::{AppError, AppResult};

const DEMO_PASSWORD: &str = "123456";

const DEPARTMENTS: [(&str, &str); 3] = [
    (
        "IT",
        "Information Technology Department - Handles all IT infrastructure and software development",
    ),
    (
        "HR",
        "Human Resources Department - Manages employee relations, recruitment, and benefits",
    ),
    (
        "Sales",
        "Sales Department - Responsible for business development and customer relations",
    ),
];

struct DemoEmployee {
    username: &'static str,
    full_name: &'static str,
    birth_date: (i32, u32, u32),
    gender: Gender,
    phone: &'static str,
    address: &'static str,
    /// Index into `DEPARTMENTS`
    department: usize,
}

const EMPLOYEES: [DemoEmployee; 5] = [
    DemoEmployee {
        username: "emp1",
        full_name: "John Doe",
        birth_date: (1990, 5, 15),
        gender: Gender::Male,
        phone: "0912345678",
        address: "123 Main Street, Ho Chi Minh City",
        department: 0,
    },
    DemoEmployee {
        username: "emp2",
        full_name: "Jane Smith",
        birth_date: (1992, 8, 20),
        gender: Gender::Female,
        phone: "0923456789",
        address: "456 Oak Avenue, Hanoi",
        department: 1,
    },
    DemoEmployee {
        username: "emp3",
        full_name: "Bob Johnson",
        birth_date: (1988, 3, 10),
        gender: Gender::Male,
        phone: "0934567890",
        address: "789 Pine Road, Da Nang",
        department: 0,
    },
    DemoEmployee {
        username: "emp4",
        full_name: "Alice Williams",
        birth_date: (1995, 11, 25),
        gender: Gender::Female,
        phone: "0945678901",
        address: "321 Elm Street, Can Tho",
        department: 2,
    },
    DemoEmployee {
        username: "emp5",
        full_name: "Charlie Brown",
        birth_date: (1991, 7, 30),
        gender: Gender::Male,
        phone: "0956789012",
        address: "654 Maple Drive, Hai Phong",
        department: 0,
    },
];

/// (project index, employee index, role, join date)
const ASSIGNMENTS: [(usize, usize, &str, (i32, u32, u32)); 6] = [
    (0, 0, "Developer", (2024, 1, 1)),
    (0, 2, "Senior Developer", (2024, 1, 5)),
    (0, 4, "Tester", (2024, 1, 10)),
    (1, 0, "PM", (2024, 3, 1)),
    (1, 1, "Business Analyst", (2024, 3, 5)),
    (1, 3, "Developer", (2024, 3, 10)),
];

fn ymd((y, m, d): (i32, u32, u32)) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| AppError::internal(format!("bad date {y}-{m}-{d}")))
}

/// Seed roles, departments, demo accounts, employees, projects and assignments.
///
/// Returns `false` without touching anything when roles already exist.
pub async fn seed_if_empty(pool: &SqlitePool, hasher: &dyn PasswordHasher) -> AppResult<bool> {
    let mut tx = pool.begin().await?;

    if role::count(&mut tx).await? > 0 {
        return Ok(false);
    }

    let admin = role::create(&mut tx, RoleName::Admin).await?;
    let manager = role::create(&mut tx, RoleName::Manager).await?;
    let staff = role::create(&mut tx, RoleName::Employee).await?;

    let mut departments = Vec::with_capacity(DEPARTMENTS.len());
    for (name, description) in DEPARTMENTS {
        departments.push(department::insert(&mut tx, name, Some(description)).await?);
    }

    // 所有演示账号共用一个初始密码
    let digest = hasher.hash(DEMO_PASSWORD)?;
    let accounts: [(&str, &[i64]); 3] = [
        ("admin1", &[admin.id]),
        ("admin2", &[admin.id]),
        ("manager1", &[manager.id, staff.id]),
    ];
    for (username, role_ids) in accounts {
        let email = format!("{username}@company.com");
        let acc = account::insert(&mut tx, username, &email, &digest, AccountStatus::Active).await?;
        role::set_for_account(&mut tx, acc.id, role_ids).await?;
    }

    let mut employees = Vec::with_capacity(EMPLOYEES.len());
    for demo in &EMPLOYEES {
        let email = format!("{}@company.com", demo.username);
        let acc = account::insert(&mut tx, demo.username, &email, &digest, AccountStatus::Active).await?;
        role::set_for_account(&mut tx, acc.id, &[staff.id]).await?;

        let record = employee::EmployeeRecord {
            full_name: demo.full_name,
            birth_date: ymd(demo.birth_date)?,
            gender: demo.gender,
            phone: demo.phone,
            address: Some(demo.address),
            department_id: departments.get(demo.department).map(|d| d.id),
        };
        employees.push(employee::insert(&mut tx, &record, acc.id).await?);
    }

    let projects = [
        project::insert(
            &mut tx,
            "E-Commerce Platform Development",
            Some(ymd((2024, 1, 1))?),
            Some(ymd((2024, 12, 31))?),
            ProjectStatus::Ongoing,
        )
        .await?,
        project::insert(
            &mut tx,
            "Customer Management System",
            Some(ymd((2024, 3, 1))?),
            Some(ymd((2024, 9, 30))?),
            ProjectStatus::Planning,
        )
        .await?,
    ];

    for (project_idx, employee_idx, role_in_project, join_date) in ASSIGNMENTS {
        let (Some(p), Some(e)) = (projects.get(project_idx), employees.get(employee_idx)) else {
            continue;
        };
        assignment::insert(
            &mut tx,
            p.id,
            e.id,
            &normalize_role_in_project(role_in_project),
            Some(ymd(join_date)?),
        )
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        departments = departments.len(),
        employees = employees.len(),
        projects = projects.len(),
        "Demo data seeded (accounts admin1/admin2/manager1/emp1..emp5)"
    );
    Ok(true)
}
