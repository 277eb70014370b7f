//! HTTP client for the origin.

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::header::{self, HeaderValue};
use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::{Request, Response, StatusCode, Uri, Version};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;

use crate::config::OriginConfig;
use crate::http::request::X_REQUEST_ID;

/// Error building the origin client.
#[derive(Debug, Error)]
pub enum OriginError {
    #[error("invalid origin base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Why a document could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("origin returned {0}")]
    Status(StatusCode),

    #[error("origin request failed: {0}")]
    Transport(String),

    #[error("origin did not answer within {0:?}")]
    Timeout(Duration),

    #[error("failed to read origin body: {0}")]
    Body(String),
}

impl FetchError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            FetchError::Status(_) => "status",
            FetchError::Transport(_) => "transport",
            FetchError::Timeout(_) => "timeout",
            FetchError::Body(_) => "body",
        }
    }
}

/// A buffered HTML document from the origin.
#[derive(Debug, Clone)]
pub struct Document {
    pub body: Bytes,
    pub content_type: Option<HeaderValue>,
}

/// Client bound to a single origin.
#[derive(Clone)]
pub struct Origin {
    client: Client<HttpConnector, Body>,
    authority: Authority,
    timeout: Duration,
    max_document_bytes: usize,
}

impl std::fmt::Debug for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Origin")
            .field("authority", &self.authority)
            .field("timeout", &self.timeout)
            .field("max_document_bytes", &self.max_document_bytes)
            .finish()
    }
}

impl Origin {
    /// Create a client for the configured origin.
    pub fn new(config: &OriginConfig) -> Result<Self, OriginError> {
        let invalid = |reason: String| OriginError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason,
        };

        let uri: Uri = config
            .base_url
            .parse()
            .map_err(|e: axum::http::uri::InvalidUri| invalid(e.to_string()))?;
        if uri.scheme() != Some(&Scheme::HTTP) {
            return Err(invalid("scheme must be http".to_string()));
        }
        let authority = uri
            .authority()
            .cloned()
            .ok_or_else(|| invalid("missing host".to_string()))?;

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self {
            client,
            authority,
            timeout: Duration::from_secs(config.timeout_secs),
            max_document_bytes: config.max_document_bytes,
        })
    }

    fn uri_for(&self, path_and_query: PathAndQuery) -> Uri {
        let mut parts = axum::http::uri::Parts::default();
        parts.scheme = Some(Scheme::HTTP);
        parts.authority = Some(self.authority.clone());
        parts.path_and_query = Some(path_and_query);
        // scheme, authority and path are all present, so this cannot fail
        Uri::from_parts(parts).unwrap_or_default()
    }

    /// Fetch and buffer the document at `path`.
    ///
    /// Any non-success status is an error; the caller decides how to degrade.
    pub async fn fetch_document(
        &self,
        path: &str,
        request_id: Option<&HeaderValue>,
    ) -> Result<Document, FetchError> {
        let path_and_query = PathAndQuery::try_from(path)
            .map_err(|e| FetchError::Transport(format!("invalid document path {path:?}: {e}")))?;

        let mut builder = Request::builder()
            .method("GET")
            .uri(self.uri_for(path_and_query))
            .header(header::HOST, self.authority.as_str())
            .header(header::ACCEPT, "text/html");
        if let Some(id) = request_id {
            builder = builder.header(X_REQUEST_ID, id.clone());
        }
        let req = builder
            .body(Body::empty())
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let response = tokio::time::timeout(self.timeout, self.client.request(req))
            .await
            .map_err(|_| FetchError::Timeout(self.timeout))?
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = tokio::time::timeout(
            self.timeout,
            axum::body::to_bytes(Body::new(response.into_body()), self.max_document_bytes),
        )
        .await
        .map_err(|_| FetchError::Timeout(self.timeout))?
        .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(Document { body, content_type })
    }

    /// Forward a request to the origin unchanged and stream back its response.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response<Body>, FetchError> {
        let (mut parts, body) = request.into_parts();

        let path_and_query = parts
            .uri
            .path_and_query()
            .cloned()
            .unwrap_or_else(|| PathAndQuery::from_static("/"));
        parts.uri = self.uri_for(path_and_query);
        // The origin connection is HTTP/1.1 regardless of how the visitor connected.
        parts.version = Version::HTTP_11;

        let req = Request::from_parts(parts, body);
        let response: Response<Incoming> = self
            .client
            .request(req)
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let (parts, body) = response.into_parts();
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}
