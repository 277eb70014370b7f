//! Request-time A/B testing for a marketing homepage.
//!
//! Sits in front of the static file host, assigns each visitor to variant A
//! or B, and serves the matching HTML document with the variant persisted in
//! a cookie.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod origin;
pub mod routing;
pub mod security;
pub mod variant;

pub use config::schema::AbConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use variant::Variant;
