//! 业务服务层
//!
//! Services validate input against current persisted state and run every
//! mutation in a single transaction. Authorization happens before they are
//! called (see [`crate::auth::policy`]).

pub mod account;
pub mod dashboard;
pub mod department;
pub mod employee;
pub mod project;
pub mod uniqueness;

pub use account::{AccountService, AccountUpdate};
pub use dashboard::DashboardService;
pub use department::DepartmentService;
pub use employee::{EmployeeService, EmployeeUpdate};
pub use project::ProjectService;
