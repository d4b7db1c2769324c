//! Request logging middleware

use axum::{
    extract::{ConnectInfo, Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::time::Instant;

use super::AppState;
use super::error::ApplicationError;

/// Ships one `Request processed` record per response
///
/// Responses marked with [`ApplicationError`] also produce an
/// `Application error` record, logged first.
pub async fn log_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let url = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let response = next.run(request).await;

    if let Some(ApplicationError(error)) = response.extensions().get::<ApplicationError>() {
        state.logger.error(
            "Application error",
            json!({ "error": error, "method": method, "url": url }),
        );
    }

    state.logger.info(
        "Request processed",
        json!({
            "method": method,
            "url": url,
            "status": response.status().as_u16(),
            "duration": start.elapsed().as_millis() as u64,
            "userAgent": user_agent.map_or(Value::Null, Value::String),
            "ip": ip.map_or(Value::Null, Value::String),
        }),
    );

    response
}
