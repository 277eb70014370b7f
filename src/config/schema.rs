//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the A/B homepage service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AbConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Static file host serving the variant documents.
    pub origin: OriginConfig,

    /// Experiment parameters (documents, override parameter).
    pub experiment: ExperimentConfig,

    /// Which request paths count as the homepage.
    pub matcher: MatcherConfig,

    /// Display copy keyed by variant id ("A" or "B").
    pub variants: BTreeMap<String, VariantContent>,

    /// Variant content endpoint.
    pub content: ContentEndpointConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Security hardening.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Origin (static file host) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OriginConfig {
    /// Base URL of the origin, e.g. "http://127.0.0.1:3000".
    pub base_url: String,

    /// Timeout for fetching a variant document, in seconds.
    pub timeout_secs: u64,

    /// Largest variant document that will be buffered, in bytes.
    pub max_document_bytes: usize,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            timeout_secs: 5,
            max_document_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Experiment parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Query parameter that forces a variant.
    pub override_param: String,

    /// Origin path of the variant A document.
    pub document_a: String,

    /// Origin path of the variant B document.
    pub document_b: String,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            override_param: "variant".to_string(),
            document_a: "/index.html".to_string(),
            document_b: "/index-variant-b.html".to_string(),
        }
    }
}

/// How the homepage matcher decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Path must equal one of `paths`.
    #[default]
    Exact,
    /// Excluded prefixes and extensions are filtered out first; the
    /// remaining path must still equal one of `paths`.
    Exclude,
}

/// Homepage matcher configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub mode: MatchMode,

    /// Homepage paths (used in both modes).
    pub paths: Vec<String>,

    /// Excluded path prefixes (used in `exclude` mode).
    pub exclude_prefixes: Vec<String>,

    /// Excluded file extensions without the dot (used in `exclude` mode).
    pub exclude_extensions: Vec<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            mode: MatchMode::Exact,
            paths: vec!["/".to_string(), "/index.html".to_string()],
            exclude_prefixes: vec![
                "/api".to_string(),
                "/_next/static".to_string(),
                "/_next/image".to_string(),
            ],
            exclude_extensions: ["svg", "png", "jpg", "jpeg", "gif", "webp", "ico"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

/// Display copy for one variant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VariantContent {
    pub headline: String,
    pub subheadline: String,
    pub cta_text: String,
    /// Hero video identifier, if the variant shows one.
    #[serde(default)]
    pub video_id: Option<String>,
}

/// Variant content endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentEndpointConfig {
    pub enabled: bool,
    pub endpoint: String,
}

impl Default for ContentEndpointConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "/api/variant".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Grace period for in-flight requests on shutdown, in seconds.
    pub shutdown_grace_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            shutdown_grace_secs: 10,
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security headers.
    pub enable_headers: bool,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
