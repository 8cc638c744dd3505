//! 工具模块 - 通用工具函数和类型
//!
//! - [`AppError`] - 应用错误类型
//! - [`AppResult`] - 统一 Result 类型
//! - 日志、校验、时间工具

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::AppError;
pub use error::{ok, ok_message, ok_with_message};
pub use result::AppResult;
pub use shared::{ApiResponse, ErrorCategory, ErrorCode};
