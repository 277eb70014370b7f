//! Request size limits.
//!
//! Bodies are only read when a request is forwarded to the origin, so the cap
//! is enforced while streaming rather than up front.

use tower_http::limit::RequestBodyLimitLayer;

use crate::config::schema::SecurityConfig;

/// Layer capping inbound request bodies at `max_body_size` bytes.
pub fn body_limit_layer(config: &SecurityConfig) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(config.max_body_size)
}
