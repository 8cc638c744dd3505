//! 认证授权模块
//!
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`policy`] - 角色权限表与路由分类
//! - [`SessionRegistry`] - 会话撤销 (force logout)
//! - [`PasswordHasher`] - 密码哈希
//! - [`authorize_request`] - 认证授权中间件

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod policy;
pub mod session;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::authorize_request;
pub use password::{Argon2Hasher, HashError, PasswordHasher};
pub use policy::{Decision, Intent, ProjectScope, Route, authorize, classify, project_scope};
pub use session::{ForceLogout, SessionRegistry};
