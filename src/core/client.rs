//! Vapi API client
//!
//! Looks up call records with `GET {base_url}/call/{call_id}` using the
//! configured bearer credential.

use crate::core::constants::vapi;
use crate::core::provider::{CallLookup, CallProvider, ProviderError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Vapi client
pub struct VapiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl VapiClient {
    /// Create a new Vapi client
    ///
    /// # Arguments
    ///
    /// * `api_key` - Vapi API key, sent as a bearer token
    /// * `base_url` - Vapi API base URL
    /// * `timeout` - Optional request timeout in seconds; `None` waits
    ///   indefinitely
    pub fn new(api_key: String, base_url: Url, timeout: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Build the call resource URL
    ///
    /// `call_id` becomes a single percent-encoded path segment.
    fn call_url(&self, call_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(vapi::CALL_RESOURCE)
                .push(call_id);
        }
        url
    }
}

#[async_trait]
impl CallProvider for VapiClient {
    async fn fetch_call_details(&self, call_id: &str) -> Result<CallLookup, ProviderError> {
        let url = self.call_url(call_id);

        info!("Fetching call details for ID: {}", call_id);
        debug!(
            "API URL: {}, API key loaded: {}, API key length: {}",
            url,
            !self.api_key.is_empty(),
            self.api_key.len()
        );

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        info!("Vapi API response status: {}", status.as_u16());

        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .map_err(|source| ProviderError::Transport {
                    url: url.to_string(),
                    source,
                })?;
            warn!("Vapi API rejected lookup ({}): {}", status.as_u16(), body);

            return Ok(CallLookup::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let record: Value = response
            .json()
            .await
            .map_err(|source| ProviderError::Decode {
                url: url.to_string(),
                source,
            })?;
        debug!("Vapi API response: {}", record);

        Ok(CallLookup::Found(record))
    }

    fn provider_name(&self) -> &str {
        "Vapi"
    }
}
