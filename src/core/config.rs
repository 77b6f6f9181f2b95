//! Application configuration management
//!
//! Configuration is read once at startup from, in order of precedence, the
//! process environment (after `.env` has been loaded), an optional TOML file
//! and built-in defaults. The resulting [`Config`] is immutable and shared
//! with the handlers through `Arc`.

use crate::core::constants::{env, vapi};
use anyhow::{Context, Result, bail};
use reqwest::Url;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default server port
const DEFAULT_PORT: u16 = 5000;

/// Config file looked up in the working directory when `CONFIG_PATH` is unset
const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct VapiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Upstream request timeout in seconds, unset means no timeout
    #[serde(default)]
    pub request_timeout: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub vapi: VapiConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl TomlConfig {
    /// Read and parse a TOML configuration file
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

        toml::from_str(&content).context("Failed to parse TOML configuration")
    }
}

/// Relay configuration
///
/// Built once in `main` and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential for the Vapi API, `None` when not configured
    pub vapi_api_key: Option<String>,

    /// Vapi API base URL
    pub vapi_base_url: Url,

    /// Upstream request timeout in seconds
    pub request_timeout: Option<u64>,

    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Logging level
    pub log_level: String,
}

impl Config {
    /// Load configuration from the environment and the optional config file
    ///
    /// `CONFIG_PATH` names the file explicitly; otherwise `config.toml` in
    /// the working directory is used if it exists.
    pub fn from_env() -> Result<Self> {
        let file = match std::env::var(env::CONFIG_PATH) {
            Ok(path) => TomlConfig::read(path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                TomlConfig::read(DEFAULT_CONFIG_FILE)?
            }
            Err(_) => TomlConfig::default(),
        };

        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge file values with variables provided by `lookup`
    ///
    /// Variables that are set but blank are ignored, so `VAPI_API_KEY=` in
    /// the environment leaves the credential unconfigured.
    ///
    /// # Errors
    ///
    /// Returns error if the port, timeout or base URL is invalid.
    pub fn from_sources<F>(file: TomlConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let vapi_api_key = var(env::VAPI_API_KEY)
            .or(file.vapi.api_key)
            .filter(|key| !key.trim().is_empty());

        let base_url = var(env::VAPI_BASE_URL)
            .or(file.vapi.base_url)
            .unwrap_or_else(|| vapi::DEFAULT_BASE_URL.to_string());
        let vapi_base_url = parse_base_url(&base_url)?;

        let request_timeout = match var(env::REQUEST_TIMEOUT) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("Invalid {} value: {}", env::REQUEST_TIMEOUT, raw))?,
            ),
            None => file.vapi.request_timeout,
        };
        if request_timeout == Some(0) {
            bail!("{} must be greater than zero", env::REQUEST_TIMEOUT);
        }

        let port = match var(env::PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid {} value: {}", env::PORT, raw))?,
            None => file.server.port,
        };

        Ok(Config {
            vapi_api_key,
            vapi_base_url,
            request_timeout,
            host: var(env::HOST).unwrap_or(file.server.host),
            port,
            log_level: var(env::LOG_LEVEL).unwrap_or(file.server.log_level),
        })
    }

    /// Whether an upstream credential is available
    pub fn api_key_configured(&self) -> bool {
        self.vapi_api_key.is_some()
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid Vapi base URL: {}", raw))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        bail!("Vapi base URL must be an http(s) URL: {}", raw);
    }

    Ok(url)
}
