use store_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载 .env (如果存在) 和日志
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    // 打印横幅
    print_banner();

    tracing::info!("📚 Bookstore order server starting...");

    // 2. 初始化服务器状态 (打开数据库、执行迁移)
    let state = ServerState::initialize(&config).await?;

    // 3. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        let e: Box<dyn std::error::Error> = e;
        return Err(e);
    }

    Ok(())
}
