use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{Argon2Hasher, JwtService, PasswordHasher, SessionRegistry};
use crate::core::Config;
use crate::db::{DbService, seed};
use crate::services::{
    AccountService, DashboardService, DepartmentService, EmployeeService, ProjectService,
};
use crate::utils::AppResult;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / 连接池句柄实现浅拷贝, 每个请求克隆一份的成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Arc<Config> | 配置项 (不可变) |
/// | pool | SqlitePool | 数据库连接池 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | sessions | SessionRegistry | 会话撤销表 |
/// | accounts ... dashboard | *Service | 业务服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Arc<Config>,
    /// 数据库连接池
    pub pool: SqlitePool,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    sessions: SessionRegistry,
    accounts: AccountService,
    employees: EmployeeService,
    departments: DepartmentService,
    projects: ProjectService,
    dashboard: DashboardService,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`initialize()`](Self::initialize) 代替; 测试中直接传入内存连接池
    pub fn new(config: Config, pool: SqlitePool, hasher: Arc<dyn PasswordHasher>) -> Self {
        let page_size = config.page_size;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self {
            accounts: AccountService::new(pool.clone(), hasher.clone(), page_size),
            employees: EmployeeService::new(pool.clone(), hasher, page_size),
            departments: DepartmentService::new(pool.clone()),
            projects: ProjectService::new(pool.clone(), page_size),
            dashboard: DashboardService::new(pool.clone()),
            sessions: SessionRegistry::new(),
            config: Arc::new(config),
            pool,
            jwt_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据库 (连接池 + 迁移)
    /// 2. 演示数据 (`SEED_DEMO_DATA`, 仅在首次启动时写入)
    /// 3. 各服务
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_url, config.db_max_connections).await?;
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher);

        if config.seed_demo_data {
            seed::seed_if_empty(&db.pool, hasher.as_ref()).await?;
        }

        Ok(Self::new(config.clone(), db.pool, hasher))
    }

    /// 获取 JWT 服务
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn accounts(&self) -> &AccountService {
        &self.accounts
    }

    pub fn employees(&self) -> &EmployeeService {
        &self.employees
    }

    pub fn departments(&self) -> &DepartmentService {
        &self.departments
    }

    pub fn projects(&self) -> &ProjectService {
        &self.projects
    }

    pub fn dashboard(&self) -> &DashboardService {
        &self.dashboard
    }
}
