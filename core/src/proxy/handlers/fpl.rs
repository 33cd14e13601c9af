//! FPL relay handlers
//! Handles /, /api/data, /api/live/:gw

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;

use crate::error::GatewayError;
use crate::proxy::server::AppState;

/// Handle / - plain-text health check for uptime probes and local testing
pub async fn handle_root() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// Handle GET /api/data - relay the bootstrap-static payload verbatim
pub async fn handle_bootstrap(
    State(state): State<AppState>,
) -> Result<Json<Value>, GatewayError> {
    let data = state.upstream.bootstrap().await?;
    Ok(Json(data))
}

/// Handle GET /api/live/:gw - relay live data for one gameweek
pub async fn handle_live(
    State(state): State<AppState>,
    Path(gw): Path<String>,
) -> Result<Json<Value>, GatewayError> {
    let gw = validate_gameweek(&gw)?;

    tracing::debug!("Live data request for gameweek {}", gw);

    let data = state.upstream.live(gw).await?;
    Ok(Json(data))
}

/// Handle GET /api/live/ - the gameweek segment is empty
pub async fn handle_live_missing() -> GatewayError {
    GatewayError::MissingParameter("gw")
}

/// Fallback for every request the route table does not know
pub async fn handle_not_found() -> GatewayError {
    GatewayError::NotFound
}

/// Gameweeks are small integers; reject anything else locally instead of
/// splicing it into the upstream URL.
fn validate_gameweek(gw: &str) -> Result<&str, GatewayError> {
    if gw.is_empty() {
        return Err(GatewayError::MissingParameter("gw"));
    }
    if !gw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GatewayError::InvalidParameter {
            name: "gw",
            value: gw.to_string(),
        });
    }
    Ok(gw)
}
