//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request id)
//!     → [routing matcher decides: homepage or not]
//!     → homepage.rs (cookies.rs + query.rs → assignment → origin fetch)
//!       or proxy.rs (forward to origin)
//!     → response.rs (variant response)
//!     → Send to client
//! ```

pub mod api;
pub mod cookies;
pub mod homepage;
pub mod proxy;
pub mod query;
pub mod request;
pub mod response;
pub mod server;

pub use cookies::{CookieJar, VARIANT_COOKIE};
pub use request::X_REQUEST_ID;
pub use response::X_AB_VARIANT;
pub use server::{AppState, HttpServer};
