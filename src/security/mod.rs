//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → limits.rs (cap request body size)
//!     → handlers
//! Outgoing response:
//!     → headers.rs (fixed security header set)
//! ```
//!
//! # Design Decisions
//! - Headers apply to every response, including pass-through and errors
//! - Our values override whatever the origin sent

pub mod headers;
pub mod limits;
