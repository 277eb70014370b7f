//! Variant response construction.
//!
//! # Responsibilities
//! - Wrap a fetched document in a 200 response
//! - Persist the variant (`Set-Cookie`) and expose it (`X-AB-Variant`)
//! - Keep the origin's content type, defaulting to HTML
//!
//! Security headers are added by the router-level layer, not here.

use axum::body::Body;
use axum::http::header::{self, HeaderName, HeaderValue};
use axum::http::{Response, StatusCode};

use crate::http::cookies::variant_cookie;
use crate::origin::Document;
use crate::variant::Variant;

/// Header exposing the served variant.
pub const X_AB_VARIANT: HeaderName = HeaderName::from_static("x-ab-variant");

const DEFAULT_CONTENT_TYPE: HeaderValue = HeaderValue::from_static("text/html; charset=utf-8");

/// Build the response serving `document` as `variant`.
pub fn variant_response(variant: Variant, document: Document) -> Response<Body> {
    let content_type = document.content_type.unwrap_or(DEFAULT_CONTENT_TYPE);

    let mut response = Response::new(Body::from(document.body));
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, content_type);
    headers.insert(header::SET_COOKIE, variant_cookie(variant));
    headers.insert(X_AB_VARIANT, HeaderValue::from_static(variant.as_str()));
    response
}
