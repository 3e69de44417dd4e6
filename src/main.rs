// gemini-relay - HTTP relay for Gemini text and multimodal prompts
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use gemini_relay::cli::Args;
use gemini_relay::config::AppConfig;
use gemini_relay::gemini::GeminiClient;
use gemini_relay::server::create_router;
use gemini_relay::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load .env and configuration
    let dotenv = dotenvy::dotenv();
    let mut config = AppConfig::load()?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting gemini-relay v{}", env!("CARGO_PKG_VERSION"));
    if let Ok(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }

    // Phase 3: Build the shared Gemini client
    config.validate()?;
    let gemini_client = GeminiClient::new(&config.gemini)?;
    info!("Relaying to model {}", gemini_client.model());

    // Phase 4: Build and start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, gemini_client)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server ready on http://{}", addr);

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
