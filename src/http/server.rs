//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the package handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Resolve decoded request paths to packages and render their pages
//! - Map resolver errors to status codes (not found → 404, other → 500)

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::any,
    Router,
};
use percent_encoding::percent_decode_str;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::VanityConfig;
use crate::error::{Error, Result};
use crate::http::request::{MakeRequestUuid, RequestIdExt};
use crate::observability::metrics;
use crate::package::PackageTemplates;
use crate::resolver::Resolver;

const DEFAULT_CACHE_AGE: Duration = Duration::from_secs(24 * 60 * 60);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Options for the package server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
    /// Import host for packages. Uses the request Host header when `None`.
    pub host: Option<String>,
    /// Max age of the Cache-Control response header. Zero means the default (24h).
    pub cache_age: Duration,
    /// Total time allowed per request.
    pub request_timeout: Duration,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: None,
            cache_age: DEFAULT_CACHE_AGE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ServerOptions {
    pub fn from_config(config: &VanityConfig) -> Self {
        Self {
            host: config.host.clone(),
            cache_age: Duration::from_secs(config.cache_age_secs),
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
        }
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn Resolver>,
    pub templates: Arc<PackageTemplates>,
    pub host: Option<String>,
    pub cache_control: String,
}

/// HTTP server for vanity import paths.
pub struct HttpServer {
    router: Router,
    options: ServerOptions,
    resolver: Arc<dyn Resolver>,
}

impl HttpServer {
    /// Create a new server answering with packages from `resolver`.
    pub fn new(resolver: Arc<dyn Resolver>, mut options: ServerOptions) -> Result<Self> {
        if options.cache_age.is_zero() {
            options.cache_age = DEFAULT_CACHE_AGE;
        }

        let state = AppState {
            resolver: resolver.clone(),
            templates: Arc::new(PackageTemplates::new()?),
            host: options.host.clone(),
            cache_control: format!("public, max-age={}", options.cache_age.as_secs()),
        };

        let router = Self::build_router(&options, state);
        Ok(Self {
            router,
            options,
            resolver,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(options: &ServerOptions, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(package_handler))
            .route("/", any(package_handler))
            .with_state(state)
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                options.request_timeout,
            ))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Import host, if fixed by configuration.
    pub fn host(&self) -> Option<&str> {
        self.options.host.as_deref()
    }

    /// Max age used for the Cache-Control response header.
    pub fn cache_age(&self) -> Duration {
        self.options.cache_age
    }

    pub fn resolver(&self) -> &Arc<dyn Resolver> {
        &self.resolver
    }

    /// The router, for serving or driving with `tower::ServiceExt`.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Closing server");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolves the request path and renders the owning package's page.
async fn package_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id();
    let path = percent_decode_str(request.uri().path()).decode_utf8_lossy();
    let path: &str = &path;

    let response = match state.resolver.resolve_package(path) {
        Ok(pkg) => {
            let host = state
                .host
                .as_deref()
                .or_else(|| request_host(&request))
                .unwrap_or_default();
            let subpath = pkg.subpath(path);

            tracing::debug!(
                request_id = %request_id,
                path = %path,
                package = %pkg.path,
                subpath = %subpath,
                "Package resolved"
            );

            match state.templates.render_document(&pkg, host, subpath) {
                Ok(body) => (
                    StatusCode::OK,
                    [(header::CACHE_CONTROL, state.cache_control.clone())],
                    Html(body),
                )
                    .into_response(),
                Err(e) => internal_error(request_id, path, &e),
            }
        }
        Err(Error::PackageNotFound) => {
            tracing::debug!(request_id = %request_id, path = %path, "Package not found");
            (StatusCode::NOT_FOUND, "Package not found").into_response()
        }
        Err(e) => internal_error(request_id, path, &e),
    };

    metrics::record_request(response.status().as_u16(), start_time);
    response
}

fn internal_error(request_id: &str, path: &str, err: &Error) -> Response {
    tracing::error!(request_id = %request_id, path = %path, error = %err, "Failed to serve package");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

fn request_host<B>(request: &Request<B>) -> Option<&str> {
    request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| request.uri().authority().map(|a| a.as_str()))
}
