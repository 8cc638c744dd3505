//! Unified error codes and response envelope
//!
//! - [`ErrorCode`]: numeric codes shared by the server and its clients
//! - [`ErrorCategory`]: classification by code range
//! - [`ApiResponse`]: JSON envelope for every API response
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 8xxx: HR domain rule violations
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{ApiResponse, ErrorCode};
//!
//! let body = ApiResponse::<()>::error_with_message(ErrorCode::NotFound, "Department 7 not found")
//!     .with_detail("entity", "department");
//! assert_eq!(body.code, Some(3));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::ApiResponse;
