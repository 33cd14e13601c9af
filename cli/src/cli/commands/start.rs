use std::path::PathBuf;

use fpl_relay_core::config::load_config;
use fpl_relay_core::proxy::ProxyServer;

pub async fn run(config_path: Option<PathBuf>, port_override: Option<u16>) -> anyhow::Result<()> {
    // Load configuration
    let mut config = load_config(config_path)?;

    // Apply port override if provided
    if let Some(port) = port_override {
        config.server.port = port;
    }

    tracing::info!("Starting FPL Relay...");
    tracing::info!("  Port: {}", config.server.port);
    tracing::info!("  Host: {}", config.server.host);
    tracing::info!("  Upstream base: {}", config.upstream.base_url);
    tracing::info!("  Allowed origin: {}", config.cors.allowed_origin);

    // Create and start server
    let server = ProxyServer::new(&config)?;

    tracing::info!(
        "Relay server starting on http://{}:{}",
        config.server.host,
        config.server.port
    );
    tracing::info!("Press Ctrl+C to stop");

    // Run server (blocks until shutdown)
    server.run().await?;

    Ok(())
}
