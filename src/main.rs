//! Vapi Call Details Relay
//!
//! This application exposes a small HTTP API that looks up a call in the
//! Vapi API and returns only its summary and analysis.

mod api;
mod core;
mod models;

use crate::api::endpoints::{AppState, create_router};
use crate::core::config::Config;
use crate::core::logging::init_logging;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Check for --help flag
    if std::env::args().any(|arg| arg == "--help") {
        print_help();
        return;
    }

    // Variables from .env never override ones already set
    let dotenv_loaded = dotenv::dotenv().is_ok();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            eprintln!("Configuration Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config.log_level);

    // Print startup banner
    print_startup_banner(&config, dotenv_loaded);

    if !config.api_key_configured() {
        warn!("VAPI_API_KEY is not set; /call-details will answer 500 until it is configured");
    }

    // Create application state
    let app_state = match AppState::from_config(config.clone()) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize Vapi client: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Some(provider) = &app_state.provider {
        info!("Using provider: {}", provider.provider_name());
    }

    // Create router
    let app = create_router(app_state);

    // Bind to address
    let addr = format!("{}:{}", config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Server listening on http://{}", addr);

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Print startup banner with configuration
fn print_startup_banner(config: &Config, dotenv_loaded: bool) {
    println!("🚀 Vapi Call Details Relay v{}", env!("CARGO_PKG_VERSION"));
    println!("✅ Configuration loaded successfully");
    println!("   .env file: {}", if dotenv_loaded { "loaded" } else { "not found" });
    println!("   Vapi Base URL: {}", config.vapi_base_url);
    println!(
        "   Vapi API Key: {}",
        if config.api_key_configured() {
            "Configured"
        } else {
            "Missing"
        }
    );
    match config.request_timeout {
        Some(secs) => println!("   Request Timeout: {}s", secs),
        None => println!("   Request Timeout: none"),
    }
    println!("   Server: {}:{}", config.host, config.port);
    println!();
}

/// Print help message
fn print_help() {
    println!("Vapi Call Details Relay v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: call-details-relay [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --help    Display this help message");
    println!();
    println!("Endpoints:");
    println!("  GET /                          Health check");
    println!("  GET /call-details?call_id=ID   Summary and analysis of a Vapi call");
    println!();
    println!("Environment variables (a .env file is read if present):");
    println!("  VAPI_API_KEY - Vapi API key (required for /call-details)");
    println!("  VAPI_BASE_URL - Vapi API base URL (default: https://api.vapi.ai)");
    println!("  REQUEST_TIMEOUT - Upstream timeout in seconds (default: none)");
    println!("  HOST - Server host (default: 0.0.0.0)");
    println!("  PORT - Server port (default: 5000)");
    println!("  LOG_LEVEL - Logging level (default: info)");
    println!("  CONFIG_PATH - TOML config file (default: config.toml if present)");
}
