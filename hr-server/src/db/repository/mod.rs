//! Repository Module
//!
//! Free functions over a `&mut SqliteConnection`, so the same query runs on a
//! pooled connection (reads) or inside a transaction (writes).

pub mod account;
pub mod assignment;
pub mod dashboard;
pub mod department;
pub mod employee;
pub mod project;
pub mod role;

use thiserror::Error;

/// Columns guarded by a unique constraint that surface as field errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
    Phone,
    DepartmentName,
}

impl UniqueField {
    /// Form field name reported to the client
    pub fn name(&self) -> &'static str {
        match self {
            UniqueField::Username => "username",
            UniqueField::Email => "email",
            UniqueField::Phone => "phone",
            UniqueField::DepartmentName => "name",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            UniqueField::Username => "Username already exists. Please choose a different username.",
            UniqueField::Email => "Email already exists. Please use a different email address.",
            UniqueField::Phone => "Phone number already exists. Please use a different phone number.",
            UniqueField::DepartmentName => "Department with this name already exists",
        }
    }

    /// Map a SQLite "UNIQUE constraint failed: table.column" message
    fn from_constraint_message(message: &str) -> Option<Self> {
        let columns = message.strip_prefix("UNIQUE constraint failed: ")?;
        match columns {
            "account.username" => Some(UniqueField::Username),
            "account.email" => Some(UniqueField::Email),
            "employee.phone" => Some(UniqueField::Phone),
            "department.name" => Some(UniqueField::DepartmentName),
            _ => None,
        }
    }
}

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Duplicate: {}", .0.name())]
    Duplicate(UniqueField),

    #[error("Assignment already exists")]
    AssignmentExists,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            let message = db_err.message();
            if let Some(field) = UniqueField::from_constraint_message(message) {
                return RepoError::Duplicate(field);
            }
            if message.contains("project_assignment.project_id") {
                return RepoError::AssignmentExists;
            }
        }
        RepoError::Database(err.to_string())
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
