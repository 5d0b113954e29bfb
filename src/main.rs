//! Stateless CORS Relay
//!
//! A stateless reverse proxy that exposes a fixed set of third-party APIs
//! (LLM and messaging providers) behind one origin, built with Tokio and
//! Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌────────────────────────────────────────────┐
//!                      │                 API RELAY                  │
//!                      │                                            │
//!     Client Request   │  ┌─────────┐   ┌──────────┐   ┌─────────┐ │
//!     ─────────────────┼─▶│  http   │──▶│ routing  │──▶│ forward │─┼──▶ Upstream API
//!                      │  │ server  │   │ classify │   │ (reqwest│ │
//!                      │  └─────────┘   └────┬─────┘   │  client)│ │
//!                      │                     │         └────┬────┘ │
//!                      │          static responses          │      │
//!     Client Response  │      (home, robots, preflight,     │      │
//!     ◀────────────────┼─────── 404) + CORS overlay ◀───────┘      │
//!                      │                                            │
//!                      │  ┌──────────────────────────────────────┐ │
//!                      │  │        Cross-Cutting Concerns        │ │
//!                      │  │  config  │ observability │ lifecycle │ │
//!                      │  └──────────────────────────────────────┘ │
//!                      └────────────────────────────────────────────┘
//! ```

use std::path::Path;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_relay::config::loader::load_or_default;
use api_relay::http::HttpServer;
use api_relay::lifecycle::{signals, Shutdown};
use api_relay::observability::metrics;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("api-relay v0.1.0 starting");

    let config = load_or_default(Path::new("config.toml"))?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        connect_timeout_secs = config.timeouts.connect_secs,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Translate OS signals into a shutdown broadcast
    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
