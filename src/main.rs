use anyhow::Context;
use catalog::{
    config::load_config,
    infrastructure::{database::DatabaseManager, logger::Logger},
    router, AppState,
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("加载配置失败")?;
    let _log_guard = Logger::init(&config.logging)?;

    info!("启动商品目录服务...");

    let db = DatabaseManager::new(&config.database)
        .await
        .context("无法连接数据库")?;
    let state = AppState::new(db.get_pool().clone());
    let app = router(state, config.request_timeout());

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 商品目录服务运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /api/products      - 获取全部商品");
    info!("   POST   /api/products      - 创建商品");
    info!("   GET    /api/products/{{id}} - 获取单个商品");
    info!("   PUT    /api/products/{{id}} - 更新商品");
    info!("   DELETE /api/products/{{id}} - 删除商品");
    info!("   GET    /health            - 健康检查");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("收到退出信号，正在关闭...");
    }
}
