//! Variant assignment subsystem.
//!
//! # Data Flow
//! ```text
//! Homepage request
//!     → forced variant (query parameter)    ┐
//!     → stored variant (ab_variant cookie)  ├→ assign.rs (priority order)
//!     → coin flip                           ┘
//!     → Assignment { variant, source }
//!     → experiment.rs (which origin document to serve)
//!     → content.rs (display copy, for the JSON endpoint)
//! ```
//!
//! # Design Decisions
//! - Assignment is a pure function of its inputs plus an injected RNG
//! - Only the exact ids "A" and "B" are valid; anything else reads as absent
//! - Nothing is stored server-side; the cookie is the only record

pub mod assign;
pub mod content;
pub mod experiment;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use assign::{assign, Assignment, AssignmentSource};
pub use content::ContentCatalog;
pub use experiment::Experiment;

/// One of the two homepage versions under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Variant {
    A,
    B,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::A, Variant::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::A => "A",
            Variant::B => "B",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned for any id other than exactly "A" or "B".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown variant {0:?}")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Variant::A),
            "B" => Ok(Variant::B),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}
