//! Homepage variant assignment and response.
//!
//! # Flow
//! ```text
//! GET / (matched)
//!     → forced variant from query, stored variant from cookie
//!     → assign (override > cookie > coin flip)
//!     → fetch the variant's document from the origin
//!     → 200 + document + Set-Cookie + X-AB-Variant
//!
//! Document fetch failed:
//!     → forward the original request to the origin (its default file)
//!     → no variant cookie, so the next visit is assigned again
//! ```

use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};

use crate::http::cookies::CookieJar;
use crate::http::proxy::forward_to_origin;
use crate::http::query::forced_variant;
use crate::http::request::{request_id_of, X_REQUEST_ID};
use crate::http::response::variant_response;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::variant::assign;

/// Serve a homepage request as variant A or B.
pub async fn serve_homepage(state: &AppState, request: Request<Body>) -> Response<Body> {
    let start = Instant::now();
    let request_id = request_id_of(&request).to_string();

    let forced = forced_variant(request.uri().query(), state.experiment.override_param());
    let stored = CookieJar::from_headers(request.headers()).variant();
    let assignment = assign(forced, stored, &mut rand::thread_rng());
    metrics::record_assignment(&assignment);

    let variant = assignment.variant;
    let document = state.experiment.document(variant);

    tracing::debug!(
        request_id = %request_id,
        variant = %variant,
        source = assignment.source.as_str(),
        document = %document,
        "Variant assigned"
    );

    let request_id_header = request.headers().get(X_REQUEST_ID).cloned();
    match state
        .origin
        .fetch_document(document, request_id_header.as_ref())
        .await
    {
        Ok(fetched) => {
            let response = variant_response(variant, fetched);
            metrics::record_request("homepage", response.status().as_u16(), start);
            response
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                variant = %variant,
                document = %document,
                error = %e,
                "Failed to fetch variant document, serving origin default"
            );
            metrics::record_fetch_failure(variant, e.reason());
            forward_to_origin(state, request, "fallback", start).await
        }
    }
}
