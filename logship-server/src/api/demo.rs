//! Demo API Handlers
//!
//! Routes that exercise the logger: a plain info event, a validation failure
//! and an unhandled handler error.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};

use super::AppState;
use super::error::{ApiError, ApiResult};

/// GET /
pub async fn home(State(state): State<AppState>) -> Json<Value> {
    state
        .logger
        .info("Home route accessed", json!({ "customField": "test value" }));

    Json(json!({ "message": "Welcome to the logship demo!" }))
}

/// POST /api/data
/// Accepts any JSON body with a truthy `data` field
pub async fn process_data(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    // A missing or unparsable body is treated as an empty object
    let payload = payload
        .map(|Json(value)| value)
        .unwrap_or_else(|_| json!({}));

    if !has_data(&payload) {
        let message = "Data is required";
        state.logger.error(
            "Data processing failed",
            json!({ "error": message, "payload": payload }),
        );
        return Err(ApiError::BadRequest(message.to_string()));
    }

    state.logger.info(
        "Data processing successful",
        json!({
            "dataSize": payload.to_string().len(),
            "processedAt": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }),
    );

    Ok(Json(json!({ "success": true })))
}

/// GET /error
pub async fn fail() -> ApiResult<Json<Value>> {
    Err(ApiError::InternalError("Test error".to_string()))
}

fn has_data(payload: &Value) -> bool {
    match payload.get("data") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::create_router;
    use crate::api::tests::json_body;
    use crate::test_support::test_state;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use logship_core::Severity;
    use tower::ServiceExt;

    fn post_json(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/data")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_has_data_truthiness() {
        assert!(has_data(&json!({ "data": "x" })));
        assert!(has_data(&json!({ "data": 1 })));
        assert!(has_data(&json!({ "data": [] })));
        assert!(has_data(&json!({ "data": {} })));
        assert!(!has_data(&json!({})));
        assert!(!has_data(&json!({ "data": null })));
        assert!(!has_data(&json!({ "data": false })));
        assert!(!has_data(&json!({ "data": 0 })));
        assert!(!has_data(&json!({ "data": "" })));
    }

    #[tokio::test]
    async fn test_home_logs_and_responds() {
        let (state, capture) = test_state();
        let app = create_router(state.clone());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Welcome to the logship demo!");

        state.logger.shipper().flush().await;
        let records = capture.records();
        assert_eq!(capture.messages(), vec!["Home route accessed", "Request processed"]);
        assert_eq!(records[0].attributes()["customField"], "test value");
        assert_eq!(records[0].attributes()["service"], "logship-demo");
    }

    #[tokio::test]
    async fn test_process_data_success() {
        let (state, capture) = test_state();
        let app = create_router(state.clone());
        let payload = json!({ "data": "hello" });

        let response = app.oneshot(post_json(payload.clone())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "success": true }));

        state.logger.shipper().flush().await;
        let records = capture.records();
        assert_eq!(records[0].message(), "Data processing successful");
        assert_eq!(
            records[0].attributes()["dataSize"],
            payload.to_string().len()
        );
        assert!(records[0].attributes()["processedAt"].is_string());
    }

    #[tokio::test]
    async fn test_process_data_requires_data() {
        let (state, capture) = test_state();
        let app = create_router(state.clone());

        let response = app.oneshot(post_json(json!({ "data": 0 }))).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Data is required" })
        );

        state.logger.shipper().flush().await;
        let records = capture.records();
        assert_eq!(records[0].message(), "Data processing failed");
        assert_eq!(records[0].severity(), Severity::Error);
        assert_eq!(records[0].attributes()["payload"], json!({ "data": 0 }));
        assert_eq!(records[1].attributes()["status"], 400);
    }

    #[tokio::test]
    async fn test_process_data_without_body() {
        let (state, _capture) = test_state();
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/data")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_error_route() {
        let (state, capture) = test_state();
        let app = create_router(state.clone());

        let response = app
            .oneshot(Request::builder().uri("/error").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Internal Server Error" })
        );

        state.logger.shipper().flush().await;
        let records = capture.records();
        assert_eq!(capture.messages(), vec!["Application error", "Request processed"]);
        assert_eq!(records[0].severity(), Severity::Error);
        assert_eq!(records[0].attributes()["error"], "Test error");
        assert_eq!(records[0].attributes()["url"], "/error");
        assert_eq!(records[1].attributes()["status"], 500);
    }
}
