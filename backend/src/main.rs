//! OWM Proxy - Backend Server
//!
//! Single-endpoint relay in front of the OpenWeatherMap One Call API.

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use owm_proxy::{cli, create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cmd = cli::Cli::parse();

    if cmd.version {
        print!("{}", cli::BUILD_INFO);
        return Ok(ExitCode::FAILURE);
    }

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()
        .context("could not load configuration")?
        .with_port(cmd.port);

    // Initialize tracing
    init_tracing(cmd.debug, config.logging.json);

    tracing::info!("Starting OWM proxy {}", cli::BUILD_INFO.version);
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Upstream: {}", config.upstream.base_url);
    tracing::info!("On failure: {:?}", config.server.on_failure);

    let host = config.server.host.clone();
    let port = config.server.port;

    // Build application
    let app = create_app(AppState::new(config));

    // Start server
    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("could not bind {}:{}", host, port))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .context("could not start router")?;

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(debug: bool, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_log_filter(debug).into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Filter used when `RUST_LOG` is unset
fn default_log_filter(debug: bool) -> &'static str {
    if debug {
        "owm_proxy=debug,tower_http=debug"
    } else {
        "owm_proxy=info,tower_http=warn"
    }
}
