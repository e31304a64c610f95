use gym_server::{Config, Server, setup_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env 只在存在时加载
    dotenv::dotenv().ok();

    // 2. 加载配置并初始化日志
    let config = Config::from_env();
    setup_logging(&config)?;

    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        database = %config.database_path().display(),
        timezone = %config.timezone,
        "Gym server starting..."
    );

    // 3. 启动 HTTP 服务器 (状态在 run 内初始化)
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
