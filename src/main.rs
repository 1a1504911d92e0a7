// first-aid-relay - Injury descriptions and photos to structured first-aid guidance via Gemini
// Author: kelexine (https://github.com/kelexine)

use anyhow::{Context, Result};
use clap::Parser;
use first_aid_relay::backend::ModelBackend;
use first_aid_relay::cli::Args;
use first_aid_relay::config::AppConfig;
use first_aid_relay::gemini::GeminiClient;
use first_aid_relay::server::create_router;
use first_aid_relay::utils::logging;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env first so it can feed both CLI and config
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration (fails without an API key)
    let mut config = AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting first-aid-relay v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the Gemini client
    let gemini_client = GeminiClient::new(&config.gemini, config.api_key())?;
    info!(
        "Gemini models: text={}, vision={}",
        config.gemini.text_model, config.gemini.vision_model
    );

    // Phase 3.5: Handle --check flag (connectivity probe)
    if args.check {
        let latency = gemini_client
            .check_connectivity()
            .await
            .context("Gemini connectivity check failed")?;
        info!("Gemini API reachable in {:?}", latency);
        return Ok(());
    }

    // Phase 4: Build and start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, Arc::new(gemini_client));

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
