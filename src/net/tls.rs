//! TLS configuration and certificate loading.

use std::path::{Path, PathBuf};

use axum_server::tls_rustls::RustlsConfig;
use thiserror::Error;

use crate::config::schema::TlsConfig;

#[derive(Debug, Error)]
pub enum TlsError {
    #[error("{kind} file not found: {path:?}")]
    MissingFile { kind: &'static str, path: PathBuf },

    #[error("failed to load certificate or key: {0}")]
    Load(#[from] std::io::Error),
}

/// Load the PEM certificate chain and private key named in `config`.
pub async fn load_tls_config(config: &TlsConfig) -> Result<RustlsConfig, TlsError> {
    let cert_path = Path::new(&config.cert_path);
    let key_path = Path::new(&config.key_path);

    for (kind, path) in [("Certificate", cert_path), ("Private key", key_path)] {
        if !path.exists() {
            return Err(TlsError::MissingFile {
                kind,
                path: path.to_path_buf(),
            });
        }
    }

    Ok(RustlsConfig::from_pem_file(cert_path, key_path).await?)
}
