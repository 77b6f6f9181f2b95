//! Request failures and their HTTP mapping
//!
//! Every handler failure is an [`ApiError`]; its `IntoResponse` impl decides
//! the status code and renders an [`ErrorResponse`] body.

use crate::core::constants::message;
use crate::models::vapi::ErrorResponse;
use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::any::Any;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{msg}", msg = message::CALL_ID_REQUIRED)]
    MissingCallId,

    #[error(transparent)]
    InvalidQuery(#[from] QueryRejection),

    #[error("{msg}", msg = message::API_KEY_NOT_CONFIGURED)]
    ApiKeyNotConfigured,

    #[error("VAPI API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// A 200 call record carrying an `error` field, relayed as is
    #[error("VAPI API call record carries an error: {0}")]
    ErrorRecord(Value),

    #[error("Handler panicked: {0}")]
    Panic(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingCallId | ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::ApiKeyNotConfigured
            | ApiError::Upstream { .. }
            | ApiError::ErrorRecord(_)
            | ApiError::Panic(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            // {:#} joins the cause chain, {:?} adds it line by line plus any backtrace
            ApiError::Internal(err) => {
                ErrorResponse::with_traceback(format!("{:#}", err), format!("{:?}", err))
            }
            ApiError::Panic(msg) => ErrorResponse::with_traceback(
                self.to_string(),
                format!("thread panicked while handling the request: {}", msg),
            ),
            _ => ErrorResponse::new(self.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed ({}): {:?}", status.as_u16(), self);
        }
        match self {
            ApiError::ErrorRecord(record) => (status, Json(record)).into_response(),
            other => (status, Json(other.body())).into_response(),
        }
    }
}

/// Panic handler for `tower_http::catch_panic::CatchPanicLayer`
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let msg = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Panic(msg).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use serde_json::{Value, json};

    async fn body_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_missing_call_id_is_400() {
        let response = ApiError::MissingCallId.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "Call ID is required" }));
    }

    #[tokio::test]
    async fn test_upstream_error_embeds_status_and_body() {
        let response = ApiError::Upstream {
            status: 404,
            body: "not found".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "VAPI API returned 404: not found" })
        );
    }

    #[tokio::test]
    async fn test_error_record_is_relayed_unchanged() {
        let record = json!({ "error": "call not ready", "id": "c1" });
        let response = ApiError::ErrorRecord(record.clone()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, record);
    }

    #[tokio::test]
    async fn test_internal_error_carries_cause_chain() {
        let err = Err::<(), _>(std::io::Error::other("connection reset"))
            .context("Failed to fetch call details")
            .unwrap_err();

        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(
            body["error"],
            "Failed to fetch call details: connection reset"
        );
        assert!(body["traceback"].as_str().unwrap().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_panic_payloads_are_rendered() {
        let response = handle_panic(Box::new("static message"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Handler panicked: static message");
        assert!(body["traceback"].is_string());

        let response = handle_panic(Box::new(format!("owned {}", 7)));
        assert_eq!(body_json(response).await["error"], "Handler panicked: owned 7");
    }
}
