//! Shutdown signal handling

use serde_json::Value;
use tokio::signal;

use crate::logger::AppLogger;

/// Resolves on SIGINT (Ctrl+C) or SIGTERM
///
/// Used as the server's graceful shutdown future; the log shipper is drained
/// after the server has stopped accepting connections.
pub async fn shutdown_signal(logger: AppLogger) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    logger.info("Starting graceful shutdown", Value::Null);
}
