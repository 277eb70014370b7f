//! Security response headers.
//!
//! # Responsibilities
//! - Clickjacking protection (`X-Frame-Options`)
//! - MIME sniffing protection (`X-Content-Type-Options`)
//! - Referrer leakage control (`Referrer-Policy`)
//! - DNS prefetch control (`X-DNS-Prefetch-Control`)
//! - Transport downgrade protection (`Strict-Transport-Security`)

use axum::http::header::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

/// The fixed header set, as (name, value) pairs.
pub const SECURITY_HEADERS: [(&str, &str); 5] = [
    ("referrer-policy", "origin-when-cross-origin"),
    ("x-frame-options", "DENY"),
    ("x-content-type-options", "nosniff"),
    ("x-dns-prefetch-control", "on"),
    (
        "strict-transport-security",
        "max-age=31536000; includeSubDomains; preload",
    ),
];

/// Apply the security header set to every response of `router`.
pub fn apply(router: Router) -> Router {
    SECURITY_HEADERS
        .iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::overriding(
                HeaderName::from_static(*name),
                HeaderValue::from_static(*value),
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_headers_on_every_response() {
        let app = apply(Router::new().route("/", get(|| async { "home" })));

        for uri in ["/", "/missing"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            for (name, value) in SECURITY_HEADERS {
                assert_eq!(response.headers()[name], value, "{name} on {uri}");
            }
        }
    }

    #[tokio::test]
    async fn test_overrides_handler_values() {
        let app = apply(Router::new().route(
            "/",
            get(|| async { ([("x-frame-options", "SAMEORIGIN")], "framed") }),
        ));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-frame-options"], "DENY");
        assert_eq!(
            response.headers().get_all("x-frame-options").iter().count(),
            1
        );
    }
}
