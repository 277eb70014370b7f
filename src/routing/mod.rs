//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → matcher.rs (is this the homepage?)
//!     → yes: variant assignment + document fetch
//!     → no:  forward to origin untouched
//!
//! Matcher Compilation (at startup):
//!     MatcherConfig
//!     → ExactPathMatcher, or ExcludeMatcher in front of it (FilteredMatcher)
//!     → Freeze behind Arc<dyn Matcher>
//! ```
//!
//! # Design Decisions
//! - Matchers compiled at startup, immutable at runtime
//! - No regex in hot path (exact, prefix and suffix checks only)
//! - Deterministic: same path always gets the same answer

pub mod matcher;

pub use matcher::{build_matcher, ExactPathMatcher, ExcludeMatcher, FilteredMatcher, Matcher};
