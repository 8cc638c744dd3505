//! Shared types for the Staffdesk workspace
//!
//! Domain models, DTOs, the unified error code table and the API response
//! envelope used by `hr-server` and by any client talking to it.

pub mod error;
pub mod models;
pub mod pagination;

// Re-exports
pub use error::{ApiResponse, ErrorCategory, ErrorCode};
pub use http;
pub use pagination::{PageRequest, PaginatedResponse};
pub use serde::{Deserialize, Serialize};
