//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AbConfig (validated, immutable)
//!     → split into per-subsystem pieces at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AbConfig;
pub use schema::ExperimentConfig;
pub use schema::ListenerConfig;
pub use schema::MatchMode;
pub use schema::MatcherConfig;
pub use schema::OriginConfig;
pub use schema::VariantContent;
