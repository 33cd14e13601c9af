//! Relay Server - Axum HTTP server
//!
//! Route table mirrors the public surface: `/`, `/api/data`,
//! `/api/live/:gw`, everything else 404.

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::proxy::cors;
use crate::proxy::handlers::fpl;
use crate::proxy::upstream::UpstreamClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    pub allowed_origin: HeaderValue,
}

/// Relay server instance
pub struct ProxyServer {
    host: String,
    port: u16,
    state: AppState,
}

impl ProxyServer {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let allowed_origin = HeaderValue::from_str(&config.cors.allowed_origin)
            .map_err(|_| anyhow::anyhow!("Invalid allowed origin: {}", config.cors.allowed_origin))?;

        let upstream = Arc::new(UpstreamClient::new(
            &config.upstream.base_url,
            config.upstream.request_timeout,
        ));

        Ok(Self {
            host: config.server.host.clone(),
            port: config.server.port,
            state: AppState {
                upstream,
                allowed_origin,
            },
        })
    }

    /// Assemble the relay router around the given state.
    ///
    /// `OPTIONS` never reaches the route table: the CORS middleware answers
    /// preflights for every path. A non-GET on an API path falls through to
    /// the same 404 an unknown path gets.
    pub fn router(state: AppState) -> Router {
        let cors = middleware::from_fn_with_state(state.clone(), cors::apply_cors);

        Router::new()
            // Health check / root; answers any method
            .route("/", any(fpl::handle_root))
            // FPL bootstrap-static relay
            .route(
                "/api/data",
                get(fpl::handle_bootstrap).fallback(fpl::handle_not_found),
            )
            // FPL live gameweek relay; the bare trailing-slash form is a
            // missing parameter, not an unknown route
            .route(
                "/api/live/:gw",
                get(fpl::handle_live).fallback(fpl::handle_not_found),
            )
            .route(
                "/api/live/",
                get(fpl::handle_live_missing).fallback(fpl::handle_not_found),
            )
            .fallback(fpl::handle_not_found)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Consume the server and return its router, for driving it in-process.
    pub fn into_router(self) -> Router {
        Self::router(self.state)
    }

    /// Run the relay server (blocking)
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        let app = Self::router(self.state);

        let listener = tokio::net::TcpListener::bind(&addr).await?;

        tracing::info!("Relay server listening on {}", addr);

        // Handle graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Relay server stopped");
        Ok(())
    }
}

/// Shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
