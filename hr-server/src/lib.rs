//! Staffdesk HR Server - 人事管理后台
//!
//! # 架构概述
//!
//! - **数据库** (`db`): SQLite (sqlx) + 迁移 + 首次启动演示数据
//! - **认证** (`auth`): JWT + Argon2, 角色权限表, 会话撤销
//! - **业务服务** (`services`): 账号、员工、部门、项目、仪表盘
//! - **HTTP API** (`api`): JSON 接口
//!
//! # 模块结构
//!
//! ```text
//! hr-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、权限策略、会话
//! ├── services/      # 业务规则
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误、日志、校验
//! └── db/            # 连接池、仓储、演示数据
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 登录、撤销、拒绝访问等安全事件
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: 加载 .env, 读取配置, 初始化日志
pub fn setup_environment() -> Result<Config, auth::JwtError> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    init_logger_with_file(config.log_level.as_deref(), config.log_dir.as_deref());
    Ok(config)
}
