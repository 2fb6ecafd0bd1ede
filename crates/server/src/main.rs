use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use tryon_server::api::{AppState, HttpOptions};
use tryon_server::config::TryOnConfig;

/// Virtual try-on HTTP server.
#[derive(Parser, Debug)]
#[command(name = "tryon-server", about = "HTTP server for the virtual try-on service")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "tryon.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tryon_server::telemetry::init();

    // Load configuration from TOML file, or use defaults if the file does not exist.
    let mut config = TryOnConfig::load(&cli.config)?;
    if !std::path::Path::new(&cli.config).exists() {
        info!(path = %cli.config, "config file not found, using defaults");
    }
    config.apply_env();

    let store = tryon_server::store_factory::create_store(&config.store)?;
    let pipeline = tryon_server::pipeline_factory::create_pipeline(&config, store)?;

    let options = HttpOptions::from_config(&config.server, &config.cors);
    let app = tryon_server::api::router_with(
        AppState {
            pipeline: pipeline.clone(),
        },
        &options,
    );

    // Resolve the bind address (CLI overrides take precedence).
    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "tryon-server listening");

    // Serve with graceful shutdown on SIGINT / SIGTERM.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Drain pending notifications (with configurable timeout).
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);
    info!(
        timeout_secs = config.server.shutdown_timeout_seconds,
        "waiting for pending notifications..."
    );
    if tokio::time::timeout(shutdown_timeout, pipeline.shutdown())
        .await
        .is_err()
    {
        warn!(
            timeout_secs = config.server.shutdown_timeout_seconds,
            "shutdown timeout exceeded, some notifications may be lost"
        );
    }

    info!("tryon-server shut down");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM, then return to trigger graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
