//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the resolver from configured packages
//! - Start the metrics exporter when enabled
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when the resolver is ready)

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::VanityConfig;
use crate::http::{HttpServer, ServerOptions};
use crate::observability::metrics;
use crate::resolver::StaticResolver;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to create resolver: {0}")]
    Resolver(#[source] crate::Error),

    #[error("failed to create server: {0}")]
    Server(#[source] crate::Error),

    #[error("invalid address {0:?}")]
    Address(String),

    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server failure: {0}")]
    Serve(#[source] std::io::Error),
}

/// Normalize the configured packages into a resolver.
pub fn build_resolver(config: &VanityConfig) -> Result<StaticResolver, crate::Error> {
    for (id, pkg) in config.packages.iter().enumerate() {
        tracing::info!(
            id,
            path = %pkg.path,
            display = %pkg.display,
            vcs = pkg.vcs.map(|v| v.as_str()).unwrap_or("unspecified"),
            repository_url = %pkg.repository_url,
            "Configuring package"
        );
    }

    tracing::info!(packages_total = config.packages.len(), "Creating resolver");
    StaticResolver::new(config.packages.iter().cloned())
}

/// Build the HTTP server for a configuration.
pub fn build_server(config: &VanityConfig) -> Result<HttpServer, StartupError> {
    let resolver = build_resolver(config).map_err(StartupError::Resolver)?;
    HttpServer::new(Arc::new(resolver), ServerOptions::from_config(config)).map_err(StartupError::Server)
}

/// Start every subsystem and serve until `shutdown` fires.
pub async fn run(config: VanityConfig, shutdown: broadcast::Receiver<()>) -> Result<(), StartupError> {
    let server = build_server(&config)?;

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::Address(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    server.run(listener, shutdown).await.map_err(StartupError::Serve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PackageConfig;
    use crate::resolver::Resolver;

    fn package(path: &str, repository_url: &str) -> PackageConfig {
        PackageConfig {
            path: path.into(),
            repository_url: repository_url.into(),
            ..PackageConfig::default()
        }
    }

    #[test]
    fn test_build_resolver() {
        let mut config = VanityConfig::default();
        config.packages.push(package("/bar", "https://github.com/foo/bar"));

        let resolver = build_resolver(&config).unwrap();
        assert_eq!(resolver.resolve_package("/bar/baz").unwrap().path, "/bar");
    }

    #[test]
    fn test_build_server_rejects_invalid_package() {
        let mut config = VanityConfig::default();
        config.packages.push(package("/bar", "https://git.example.com/bar"));

        let err = build_server(&config).err().unwrap();
        assert!(matches!(err, StartupError::Resolver(crate::Error::InvalidPackage(_))));
    }

    #[tokio::test]
    async fn test_run_fails_on_bind() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut config = VanityConfig::default();
        config.listener.bind_address = taken.local_addr().unwrap().to_string();

        let (_tx, rx) = broadcast::channel(1);
        let err = run(config, rx).await.unwrap_err();
        assert!(matches!(err, StartupError::Bind { .. }));
    }
}
