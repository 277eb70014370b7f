//! Origin (static file host) access.
//!
//! # Data Flow
//! ```text
//! Homepage request:
//!     → client.rs fetch_document(variant path)
//!     → buffered Document { body, content_type }
//!     → or FetchError (status / transport / timeout / body)
//!
//! Anything else (and homepage fallback):
//!     → client.rs forward(request)
//!     → streamed origin response
//! ```
//!
//! # Design Decisions
//! - One pooled hyper client shared by all requests
//! - Document fetches have their own deadline, shorter than the request timeout
//! - Forwarding streams bodies in both directions; documents are buffered

pub mod client;

pub use client::{Document, FetchError, Origin, OriginError};
