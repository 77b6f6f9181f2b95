//! Relay response bodies
//!
//! This module defines the JSON documents served by the relay and the
//! reshaping of an upstream Vapi call record into [`CallDetailsResponse`].

use crate::core::constants::{query, vapi};
use serde::Serialize;
use serde_json::Value;

/// Query string of `GET /call-details`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallDetailsQuery {
    pub call_id: Option<String>,
}

impl CallDetailsQuery {
    /// Pick parameters out of decoded query pairs
    ///
    /// When a parameter repeats, its first occurrence wins.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let call_id = pairs
            .into_iter()
            .find(|(key, _)| key == query::CALL_ID)
            .map(|(_, value)| value);

        Self { call_id }
    }
}

/// Body of `GET /`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub vapi_api_key_configured: bool,
}

/// Body of a successful `GET /call-details`
///
/// Both fields are always serialized, as `null` when the call record lacks
/// them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallDetailsResponse {
    pub summary: Option<Value>,
    pub analysis: Option<Value>,
}

impl CallDetailsResponse {
    /// Keep only `summary` and `analysis` from a call record
    pub fn from_call_record(record: &Value) -> Self {
        let field = |name: &str| record.get(name).filter(|v| !v.is_null()).cloned();

        Self {
            summary: field(vapi::SUMMARY_FIELD),
            analysis: field(vapi::ANALYSIS_FIELD),
        }
    }
}

/// Body of every failed request
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traceback: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            traceback: None,
        }
    }

    pub fn with_traceback(error: impl Into<String>, traceback: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            traceback: Some(traceback.into()),
        }
    }
}
