//! API Module
//!
//! HTTP API layer for the demo service.
//! Every request goes through the request logging middleware, which ships a
//! record per request.

pub mod demo;
pub mod error;
pub mod health;
pub mod request_log;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::logger::AppLogger;

/// Shared state for handlers and middleware
#[derive(Clone)]
pub struct AppState {
    pub logger: AppLogger,
}

impl AppState {
    pub fn new(logger: AppLogger) -> Self {
        Self { logger }
    }
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Demo endpoints
        .route("/", get(demo::home))
        .route("/api/data", post(demo::process_data))
        .route("/error", get(demo::fail))
        // Add state and middleware
        .layer(middleware::from_fn_with_state(
            state.clone(),
            request_log::log_requests,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::test_support::test_state;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    pub async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (state, _capture) = test_state();
        let app = create_router(state);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_unknown_route_is_logged() {
        let (state, capture) = test_state();
        let app = create_router(state.clone());

        let response = app
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        state.logger.shipper().flush().await;
        let records = capture.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attributes()["status"], 404);
    }
}
