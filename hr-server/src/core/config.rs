use crate::auth::{JwtConfig, JwtError};

/// Default page size for list endpoints
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_URL | sqlite://staffdesk.db | SQLite 数据库 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | JWT_SECRET | (开发环境自动生成) | 签名密钥, 生产环境必填, 至少 32 字符 |
/// | JWT_EXPIRATION_MINUTES | 480 | 令牌有效期 |
/// | PAGE_SIZE | 10 | 默认分页大小 |
/// | SEED_DEMO_DATA | true | 首次启动写入演示数据 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | - | 日志目录 (存在时按天滚动写文件) |
/// | DB_MAX_CONNECTIONS | 5 | 连接池大小 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=sqlite:///data/staffdesk.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 连接串
    pub database_url: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | production
    pub environment: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 默认分页大小
    pub page_size: u32,
    /// 是否写入演示数据 (仅在 role 表为空时执行)
    pub seed_demo_data: bool,
    pub log_level: Option<String>,
    pub log_dir: Option<String>,
    /// 连接池大小
    pub db_max_connections: u32,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// Fails only when the JWT secret is missing or too short in production.
    pub fn from_env() -> Result<Self, JwtError> {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let production = environment == "production";

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://staffdesk.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::from_env(production)?,
            environment,
            page_size: std::env::var("PAGE_SIZE")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            seed_demo_data: std::env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_level: std::env::var("LOG_LEVEL").ok(),
            log_dir: std::env::var("LOG_DIR").ok(),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5),
        })
    }

    /// 使用自定义值构造配置, 不读取环境变量
    ///
    /// 常用于测试场景: 临时 JWT 密钥, 不写入演示数据
    pub fn with_overrides(database_url: impl Into<String>, http_port: u16) -> Self {
        Self {
            database_url: database_url.into(),
            http_port,
            environment: "development".into(),
            jwt: JwtConfig::ephemeral(),
            page_size: DEFAULT_PAGE_SIZE,
            seed_demo_data: false,
            log_level: None,
            log_dir: None,
            db_max_connections: 1,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_skip_seeding() {
        let config = Config::with_overrides("sqlite::memory:", 0);
        assert!(config.is_development());
        assert!(!config.is_production());
        assert!(!config.seed_demo_data);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }
}
