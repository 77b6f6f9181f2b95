//! API endpoint handlers
//!
//! This module implements the HTTP endpoints of the relay: the health check
//! and the call details lookup.

use crate::api::error::{ApiError, handle_panic};
use crate::core::client::VapiClient;
use crate::core::config::Config;
use crate::core::constants::{message, vapi};
use crate::core::provider::{CallLookup, CallProvider};
use crate::models::vapi::{CallDetailsQuery, CallDetailsResponse, HealthResponse};
use anyhow::{Context, anyhow};
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{Method, header},
    routing::get,
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when no Vapi API key is configured
    pub provider: Option<Arc<dyn CallProvider>>,
}

impl AppState {
    /// Build the state, creating a Vapi client when a key is configured
    pub fn from_config(config: Arc<Config>) -> anyhow::Result<Self> {
        let provider = match &config.vapi_api_key {
            Some(api_key) => {
                let client = VapiClient::new(
                    api_key.clone(),
                    config.vapi_base_url.clone(),
                    config.request_timeout,
                )?;
                Some(Arc::new(client) as Arc<dyn CallProvider>)
            }
            None => None,
        };

        Ok(Self { config, provider })
    }
}

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/call-details", get(call_details))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Any origin may call the relay
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}

/// GET / - Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: message::RUNNING.to_string(),
        vapi_api_key_configured: state.config.api_key_configured(),
    })
}

/// GET /call-details?call_id=... - Summary and analysis of one call
async fn call_details(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<CallDetailsResponse>, ApiError> {
    let Query(pairs) = query?;
    let query = CallDetailsQuery::from_pairs(pairs);

    let Some(call_id) = query.call_id.filter(|id| !id.is_empty()) else {
        warn!("Rejected call details request without call_id");
        return Err(ApiError::MissingCallId);
    };

    let request_id = Uuid::new_v4();
    info!(%request_id, "📥 Received request for call_id: {}", call_id);

    let provider = state
        .provider
        .as_ref()
        .ok_or(ApiError::ApiKeyNotConfigured)?;

    let lookup = provider
        .fetch_call_details(&call_id)
        .await
        .with_context(|| format!("Failed to fetch call details for {}", call_id))?;

    match lookup {
        CallLookup::Found(record) => {
            if !record.is_object() {
                let err = anyhow!("Vapi API returned a call record that is not an object: {}", record);
                return Err(err.into());
            }
            if record.get(vapi::ERROR_FIELD).is_some() {
                warn!(%request_id, "Vapi call record for {} carries an error", call_id);
                return Err(ApiError::ErrorRecord(record));
            }

            let details = CallDetailsResponse::from_call_record(&record);
            debug!(
                %request_id,
                "Summary: {:?}, Analysis: {:?}", details.summary, details.analysis
            );
            info!(%request_id, "📤 Call details served for call_id: {}", call_id);
            Ok(Json(details))
        }
        CallLookup::Rejected { status, body } => Err(ApiError::Upstream { status, body }),
    }
}
