use anyhow::Context;
use hr_server::{Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 配置, 日志)
    let config = setup_environment().context("Invalid configuration")?;

    tracing::info!(
        environment = %config.environment,
        database = %config.database_url,
        "Staffdesk HR server starting..."
    );

    // 2. 初始化服务器状态 (数据库, 迁移, 演示数据)
    let state = ServerState::initialize(&config)
        .await
        .context("Failed to initialize server state")?;

    // 3. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
