//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request id, tracing, security headers, limits, timeout)
//! - Dispatch homepage requests to variant assignment, the rest to the origin
//! - Serve over plain TCP or TLS with graceful shutdown

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, Response, StatusCode},
    routing::get,
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AbConfig;
use crate::http::api::current_variant;
use crate::http::homepage::serve_homepage;
use crate::http::proxy::forward_to_origin;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::shutdown::wait as wait_for_shutdown;
use crate::origin::{Origin, OriginError};
use crate::routing::{build_matcher, Matcher};
use crate::security;
use crate::variant::Experiment;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub origin: Origin,
    pub matcher: Arc<dyn Matcher>,
    pub experiment: Arc<Experiment>,
}

impl AppState {
    pub fn from_config(config: &AbConfig) -> Result<Self, OriginError> {
        Ok(Self {
            origin: Origin::new(&config.origin)?,
            matcher: build_matcher(&config.matcher),
            experiment: Arc::new(Experiment::from_config(config)),
        })
    }
}

/// HTTP server for the A/B homepage service.
pub struct HttpServer {
    router: Router,
    config: AbConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AbConfig) -> Result<Self, OriginError> {
        let state = AppState::from_config(&config)?;
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(config: &AbConfig, state: AppState) -> Router {
        let mut router = Router::new();
        if config.content.enabled {
            router = router.route(&config.content.endpoint, get(current_variant));
        }

        let router = router
            .fallback(dispatch)
            .with_state(state)
            .layer(security::limits::body_limit_layer(&config.security))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ));

        let router = if config.security.enable_headers {
            security::headers::apply(router)
        } else {
            router
        };

        router
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Run the server on a plain TCP listener until `shutdown` fires.
    ///
    /// In-flight requests get `timeouts.shutdown_grace_secs` to finish; any
    /// still open after that are abandoned.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            origin = %self.config.origin.base_url,
            "HTTP server starting"
        );

        let grace = self.grace_period();
        let deadline = shutdown.resubscribe();
        let serve = axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .into_future();

        tokio::select! {
            result = serve => result?,
            _ = async {
                wait_for_shutdown(deadline).await;
                tokio::time::sleep(grace).await;
            } => {
                tracing::warn!(
                    grace_secs = grace.as_secs(),
                    "Shutdown grace period elapsed, abandoning open connections"
                );
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run the server with TLS termination until `shutdown` fires.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        tracing::info!(
            address = %addr,
            origin = %self.config.origin.base_url,
            "HTTPS server starting"
        );

        let handle = axum_server::Handle::new();
        let grace = self.grace_period();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            wait_for_shutdown(shutdown).await;
            shutdown_handle.graceful_shutdown(Some(grace));
        });

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }

    fn grace_period(&self) -> Duration {
        Duration::from_secs(self.config.timeouts.shutdown_grace_secs)
    }

    /// The assembled router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Entry point for everything not claimed by an explicit route.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response<Body> {
    let is_page_load = matches!(*request.method(), Method::GET | Method::HEAD);
    if is_page_load && state.matcher.matches(&request) {
        serve_homepage(&state, request).await
    } else {
        forward_to_origin(&state, request, "passthrough", Instant::now()).await
    }
}
