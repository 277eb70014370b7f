//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check that every configured path is absolute
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AbConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{AbConfig, MatchMode};
use crate::variant::Variant;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("origin.base_url: {0}")]
    InvalidOrigin(String),

    #[error("{field}: path {value:?} must start with '/'")]
    RelativePath { field: &'static str, value: String },

    #[error("{0}: must not be empty")]
    Empty(&'static str),

    #[error("{0}: must be greater than zero")]
    Zero(&'static str),

    #[error("variants: unknown variant id {0:?} (expected \"A\" or \"B\")")]
    UnknownVariant(String),

    #[error("observability.log_level: invalid filter {0:?}")]
    InvalidLogLevel(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &AbConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if let Some(tls) = &config.listener.tls {
        if tls.cert_path.is_empty() {
            errors.push(ValidationError::Empty("listener.tls.cert_path"));
        }
        if tls.key_path.is_empty() {
            errors.push(ValidationError::Empty("listener.tls.key_path"));
        }
    }

    if let Err(reason) = check_origin_url(&config.origin.base_url) {
        errors.push(ValidationError::InvalidOrigin(reason));
    }
    if config.origin.timeout_secs == 0 {
        errors.push(ValidationError::Zero("origin.timeout_secs"));
    }
    if config.origin.max_document_bytes == 0 {
        errors.push(ValidationError::Zero("origin.max_document_bytes"));
    }

    if config.experiment.override_param.is_empty() {
        errors.push(ValidationError::Empty("experiment.override_param"));
    }
    check_path(&mut errors, "experiment.document_a", &config.experiment.document_a);
    check_path(&mut errors, "experiment.document_b", &config.experiment.document_b);

    if config.matcher.paths.is_empty() {
        errors.push(ValidationError::Empty("matcher.paths"));
    }
    for path in &config.matcher.paths {
        check_path(&mut errors, "matcher.paths", path);
    }
    if config.matcher.mode == MatchMode::Exclude {
        for prefix in &config.matcher.exclude_prefixes {
            check_path(&mut errors, "matcher.exclude_prefixes", prefix);
        }
    }

    for id in config.variants.keys() {
        if id.parse::<Variant>().is_err() {
            errors.push(ValidationError::UnknownVariant(id.clone()));
        }
    }

    if config.content.enabled {
        check_path(&mut errors, "content.endpoint", &config.content.endpoint);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    if tracing_subscriber::EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_path(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if !value.starts_with('/') {
        errors.push(ValidationError::RelativePath {
            field,
            value: value.to_string(),
        });
    }
}

/// The origin client speaks plain HTTP to a host root.
fn check_origin_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("{raw:?}: {e}"))?;
    if url.scheme() != "http" {
        return Err(format!("{raw:?}: scheme must be http"));
    }
    if url.host_str().is_none() {
        return Err(format!("{raw:?}: missing host"));
    }
    if url.path() != "/" || url.query().is_some() {
        return Err(format!("{raw:?}: must not carry a path or query"));
    }
    Ok(())
}
