//! Variant content endpoint.
//!
//! Reports the visitor's current variant and its display copy. Read-only:
//! never assigns a variant and never sets a cookie.

use std::time::Instant;

use axum::extract::State;
use axum::http::header::{self, HeaderMap, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::config::VariantContent;
use crate::http::cookies::CookieJar;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::variant::Variant;

#[derive(Debug, Serialize)]
pub struct VariantInfo<'a> {
    pub variant: Option<Variant>,
    pub content: Option<&'a VariantContent>,
}

pub async fn current_variant(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start = Instant::now();
    let variant = CookieJar::from_headers(&headers).variant();
    let content = variant.and_then(|v| state.experiment.catalog().get(v));

    let mut response = Json(VariantInfo { variant, content }).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("private, no-store"),
    );
    metrics::record_request("api", StatusCode::OK.as_u16(), start);
    response
}
