//! Provider abstraction for call record lookups
//!
//! Handlers depend on the [`CallProvider`] trait rather than on the HTTP
//! client directly, so the lookup can be swapped out in tests.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Outcome of a call record lookup that reached the upstream API
#[derive(Debug, Clone, PartialEq)]
pub enum CallLookup {
    /// Upstream answered 200; the call record exactly as returned
    Found(Value),

    /// Upstream answered with any other status
    Rejected { status: u16, body: String },
}

/// Failures that prevented a lookup from producing a [`CallLookup`]
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode call record from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Source of call records
#[async_trait]
pub trait CallProvider: Send + Sync {
    /// Fetch the call record identified by `call_id`
    ///
    /// Non-200 responses are returned as [`CallLookup::Rejected`]; only
    /// transport and decoding failures are errors.
    async fn fetch_call_details(&self, call_id: &str) -> Result<CallLookup, ProviderError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}
