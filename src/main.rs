//! vanityurl server
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request            ┌──────────────────────────────────────────────┐
//!     ──────────────────────────┼─▶ http server ──▶ resolver ──▶ templates     │
//!                               │   (request id,    (sorted       (go-import,  │
//!     Client Response           │    timeout,        packages)     go-source)  │
//!     ◀─────────────────────────┼── trace)                                     │
//!                               │                                              │
//!                               │   config ─ lifecycle ─ observability         │
//!                               └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use vanityurl::config::load_config;
use vanityurl::lifecycle::{signals, startup, Shutdown};
use vanityurl::observability::logging;

#[derive(Parser)]
#[command(name = "vanityurl")]
#[command(version, about = "Serve Go vanity import paths", long_about = None)]
struct Cli {
    /// Config file location
    #[arg(short, long, env = "VANITYURL_CONFIG", default_value = "vanityurl.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logging settings live in the config, so load it before reporting errors.
    let loaded = load_config(&cli.config);
    let observability = loaded
        .as_ref()
        .map(|config| config.observability.clone())
        .unwrap_or_default();
    logging::init(&observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting server");

    let config = loaded.inspect_err(|e| {
        tracing::error!(path = ?cli.config, error = %e, "Failed to parse config");
    })?;

    tracing::info!(
        host = config.host.as_deref().unwrap_or("<request>"),
        bind_address = %config.listener.bind_address,
        cache_age_secs = config.cache_age_secs,
        packages_total = config.packages.len(),
        "Loaded config"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    startup::run(config, shutdown.subscribe())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Server failed"))?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_config_flag() {
        let cli = Cli::try_parse_from(["vanityurl", "--config", "bar.toml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("bar.toml"));

        assert!(Cli::try_parse_from(["vanityurl", "--config-file", "bar.toml"]).is_err());
    }
}
