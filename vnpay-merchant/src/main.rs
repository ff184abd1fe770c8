//! Production-ready VNPAY merchant callback server.
//!
//! # Usage
//!
//! ```bash
//! # Run with default config (config.toml in current directory)
//! cargo run -p vnpay-merchant --release
//!
//! # Run with custom config path
//! CONFIG=/path/to/config.toml cargo run -p vnpay-merchant
//!
//! # Configure logging level
//! RUST_LOG=info cargo run -p vnpay-merchant
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG` — Path to TOML configuration file (default: `config.toml`)
//! - `HOST` — Override bind address (default: `0.0.0.0`)
//! - `PORT` — Override port (default: `8080`)
//! - `RUST_LOG` — Log level filter (default: `info`)
//! - Secrets referenced by `$VAR` in the config file, e.g. `VNPAY_HASH_SECRET`

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::Method;
use axum::{Json, Router};
use tower_http::cors;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use vnpay_http::{AppState, MemoryStore, router};

use vnpay_merchant::config::MerchantConfig;
use vnpay_merchant::hook::AuditHook;

#[tokio::main]
async fn main() {
    // .env is optional; ignore a missing file.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("Merchant server failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = MerchantConfig::load()?;
    let gateway = config.gateway_config();

    // Credentials are fatal at startup, not on the first callback.
    gateway.validate()?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        tmn_code = %gateway.tmn_code,
        payment_url = %gateway.payment_url,
        ipn_url = gateway.ipn_url.as_ref().map(url::Url::as_str),
        "Loaded configuration"
    );

    let state = AppState::new(gateway, Arc::new(MemoryStore::new()), Arc::new(AuditHook));

    let app = Router::new()
        .merge(router(state))
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .layer(
            cors::CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(cors::Any),
        );

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Merchant server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Merchant server shut down gracefully");
    Ok(())
}

/// Health check endpoint.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Waits for Ctrl-C or SIGTERM (Unix) to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down..."),
            _ = sigterm.recv() => tracing::info!("Received SIGTERM, shutting down..."),
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.expect("failed to listen for Ctrl-C");
        tracing::info!("Received Ctrl-C, shutting down...");
    }
}
