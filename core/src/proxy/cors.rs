//! CORS as a single middleware
//!
//! One configured origin, attached to every response the relay produces,
//! error responses included. Preflights are answered before routing, so
//! `OPTIONS` works on any path. A preflight without an `Origin` header is
//! answered with a bare 204 and no CORS headers at all.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::proxy::server::AppState;

/// Intercept preflights and stamp the allowed origin on everything else.
pub async fn apply_cors(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS {
        return preflight(&state.allowed_origin, request.headers());
    }

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, state.allowed_origin.clone());
    response
}

fn preflight(allowed_origin: &HeaderValue, request_headers: &HeaderMap) -> Response {
    // Non-CORS OPTIONS
    if !request_headers.contains_key(header::ORIGIN) {
        return StatusCode::NO_CONTENT.into_response();
    }

    let allow_headers = request_headers
        .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("Content-Type"));

    let mut response = StatusCode::NO_CONTENT.into_response();
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allowed_origin.clone());
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, allow_headers);
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static("86400"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> HeaderValue {
        HeaderValue::from_static("https://example.github.io")
    }

    #[test]
    fn preflight_without_origin_has_no_cors_headers() {
        let response = preflight(&origin(), &HeaderMap::new());
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[test]
    fn preflight_echoes_requested_headers() {
        let mut request_headers = HeaderMap::new();
        request_headers.insert(header::ORIGIN, origin());
        request_headers.insert(
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            HeaderValue::from_static("X-Requested-With"),
        );

        let response = preflight(&origin(), &request_headers);
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "X-Requested-With"
        );
        assert_eq!(response.headers()[header::ACCESS_CONTROL_MAX_AGE], "86400");
    }

    #[test]
    fn preflight_defaults_allow_headers_to_content_type() {
        let mut request_headers = HeaderMap::new();
        request_headers.insert(header::ORIGIN, origin());

        let response = preflight(&origin(), &request_headers);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, OPTIONS"
        );
    }
}
