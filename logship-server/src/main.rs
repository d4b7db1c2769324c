use anyhow::Context;
use serde_json::json;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod logger;
mod shutdown;
#[cfg(test)]
mod test_support;

use config::Config;
use logger::AppLogger;
use logship_shipper::LogShipper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config.validate()?;

    let shipper = LogShipper::with_http(config.shipper.clone())
        .context("Failed to create log shipper")?;
    let logger = AppLogger::new(shipper.clone());

    // Build router with all API endpoints
    let app = api::create_router(api::AppState::new(logger.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    logger.info(
        "Server started",
        json!({
            "port": config.port,
            "environment": config.environment,
            "serviceName": config.shipper.resource.service_name,
        }),
    );

    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown::shutdown_signal(logger))
    .await
    .context("Server error");

    // Ship whatever is still buffered, including the shutdown record
    shipper.drain().await;

    served
}
