//! Constants for configuration keys, upstream paths and response messages
//!
//! This module defines the string constants shared by the configuration
//! loader, the Vapi client and the HTTP handlers.

/// Environment variable names
pub mod env {
    /// Upstream Vapi API key
    pub const VAPI_API_KEY: &str = "VAPI_API_KEY";

    /// Upstream base URL override
    pub const VAPI_BASE_URL: &str = "VAPI_BASE_URL";

    /// Upstream request timeout in seconds
    pub const REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";

    /// Listen address
    pub const HOST: &str = "HOST";

    /// Listen port
    pub const PORT: &str = "PORT";

    /// Logging level
    pub const LOG_LEVEL: &str = "LOG_LEVEL";

    /// Path of the optional TOML configuration file
    pub const CONFIG_PATH: &str = "CONFIG_PATH";
}

/// Upstream Vapi API
pub mod vapi {
    /// Default API base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.vapi.ai";

    /// Path segment of the call resource (`{base_url}/call/{call_id}`)
    pub const CALL_RESOURCE: &str = "call";

    /// Field of the call record holding the call summary
    pub const SUMMARY_FIELD: &str = "summary";

    /// Field of the call record holding the structured analysis
    pub const ANALYSIS_FIELD: &str = "analysis";

    /// Field whose presence marks a call record as a failed lookup
    pub const ERROR_FIELD: &str = "error";
}

/// Query string parameters
pub mod query {
    /// Call identifier of `GET /call-details`
    pub const CALL_ID: &str = "call_id";
}

/// Response messages
pub mod message {
    /// Health check status line
    pub const RUNNING: &str = "Backend is running";

    /// `call_id` query parameter missing or empty
    pub const CALL_ID_REQUIRED: &str = "Call ID is required";

    /// No upstream credential configured
    pub const API_KEY_NOT_CONFIGURED: &str = "VAPI API key not configured";
}
