use chiller_compare::{api, chiller_registry, AppConfig, ComparisonService};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env();
    info!("Starting server with config: {:?}", config);

    // 字段注册表：启动时构建一次，之后只读共享
    let registry = Arc::new(chiller_registry()?);
    info!(
        "Field registry {} loaded: {} fields",
        registry.version(),
        registry.len()
    );

    let service = Arc::new(ComparisonService::new(registry, config.opex.defaults()));

    let app = api::router(service).layer(ServiceBuilder::new());

    // 启动服务器
    let addr = config.addr();
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET  /api/fields       - field registry");
    info!("  POST /api/extract      - single datasheet extraction");
    info!("  POST /api/compare      - A/B comparison report (JSON)");
    info!("  POST /api/compare/csv  - A/B comparison table (CSV)");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
