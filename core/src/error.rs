//! Gateway error taxonomy and the JSON error envelope
//!
//! Every failure the gateway can produce maps to one terminal HTTP
//! response; nothing is retried and nothing propagates past the
//! request handler.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

/// Uniform envelope for gateway-produced errors: `{ "error": ..., "details"?: ... }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Upstream answered, but with a non-2xx status
    #[error("upstream returned status {status}")]
    UpstreamStatus { status: StatusCode },

    /// The outbound call itself failed (connect, timeout, body decode)
    #[error("upstream request failed: {0}")]
    UpstreamNetwork(#[from] reqwest::Error),

    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid value for parameter {name}: {value:?}")]
    InvalidParameter {
        name: &'static str,
        value: String,
    },

    #[error("no route matched")]
    NotFound,
}

impl GatewayError {
    /// HTTP status the caller sees. Upstream statuses are never passed
    /// through; both upstream error kinds collapse to 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::UpstreamStatus { .. } | GatewayError::UpstreamNetwork(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::MissingParameter(_) | GatewayError::InvalidParameter { .. } => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn envelope(&self) -> ErrorBody {
        match self {
            GatewayError::UpstreamStatus { .. } => ErrorBody {
                error: "Failed to fetch data from FPL API".to_string(),
                details: None,
            },
            GatewayError::UpstreamNetwork(e) => ErrorBody {
                error: "Failed to fetch data".to_string(),
                details: Some(e.to_string()),
            },
            GatewayError::MissingParameter(name) => ErrorBody {
                error: format!("Gameweek ({}) parameter is required", name),
                details: None,
            },
            GatewayError::InvalidParameter { name, .. } => ErrorBody {
                error: format!("Gameweek ({}) parameter must be numeric", name),
                details: None,
            },
            GatewayError::NotFound => ErrorBody {
                error: "Not found".to_string(),
                details: None,
            },
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.envelope())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_omits_empty_details() {
        let body = serde_json::to_value(GatewayError::NotFound.envelope()).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Not found"}));
    }

    #[test]
    fn missing_parameter_message_names_the_parameter() {
        let err = GatewayError::MissingParameter("gw");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.envelope().error,
            "Gameweek (gw) parameter is required"
        );
    }

    #[test]
    fn upstream_status_is_masked_as_500() {
        let err = GatewayError::UpstreamStatus {
            status: StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.envelope().error, "Failed to fetch data from FPL API");
        assert!(err.envelope().details.is_none());
    }
}
