use anyhow::Context;
use clap::Parser;
use stock_fantasy_api::utils::{logger, validation::Validate};
use stock_fantasy_api::{router, AppState, CliConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 不存在也沒關係
    dotenvy::dotenv().ok();

    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_server_logger(cli.verbose);
    }

    tracing::info!("Starting stock-fantasy-api v{}", env!("CARGO_PKG_VERSION"));
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    cli.validate().context("invalid command line configuration")?;
    let config = cli
        .load_service_config()
        .context("failed to load service configuration")?;

    for var in config.missing_credentials() {
        tracing::warn!("⚠️ {} is not set; endpoints that need it will answer 503", var);
    }

    let state = AppState::from_config(&config).context("failed to build provider clients")?;
    let app = router(state);

    let addr = cli.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("❌ Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
