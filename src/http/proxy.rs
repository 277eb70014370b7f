//! Pass-through forwarding to the origin.

use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::response::IntoResponse;

use crate::http::request::request_id_of;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Forward `request` to the origin unchanged.
///
/// Origin errors (including 4xx/5xx) are relayed as-is; only a failure to
/// reach the origin at all becomes 502.
pub async fn forward_to_origin(
    state: &AppState,
    request: Request<Body>,
    kind: &'static str,
    start: Instant,
) -> Response<Body> {
    let request_id = request_id_of(&request).to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        kind,
        "Forwarding to origin"
    );

    match state.origin.forward(request).await {
        Ok(response) => {
            metrics::record_request(kind, response.status().as_u16(), start);
            response
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                method = %method,
                path = %path,
                error = %e,
                "Origin unreachable"
            );
            metrics::record_request(kind, StatusCode::BAD_GATEWAY.as_u16(), start);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
