//! Course Catalog - A course records service with a self-refreshing dataset

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_catalog::api::create_router;
use course_catalog::tasks::{join_tasks, shutdown_channel};
use course_catalog::{
    spawn_ttl_sweeper, AppState, Config, DatasetLoader, EmptinessMonitor, HttpFetcher,
};

/// Main entry point for the course catalog service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the course store and dataset fetcher
/// 4. Load the dataset once (a failure is retried by the monitor)
/// 5. Start the TTL sweeper and the emptiness monitor
/// 6. Serve HTTP on the configured port
/// 7. On SIGINT/SIGTERM, stop the background tasks and drain requests
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "course_catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting course catalog");

    let config = Config::from_env();
    info!(
        "Configuration loaded: dataset_url={}, staging_path={}, ttl={}s, poll_interval={}s, sweep_interval={}s, port={}",
        config.dataset_url,
        config.staging_path.display(),
        config.record_ttl,
        config.poll_interval,
        config.sweep_interval,
        config.server_port
    );

    let state = AppState::from_config(&config);
    let fetcher = HttpFetcher::from_config(&config).context("building dataset fetcher")?;
    let loader = DatasetLoader::new(Arc::new(fetcher), state.store.clone(), config.ttl());

    match loader.load().await {
        Ok(report) => info!(
            "Initial dataset loaded: {} courses at {}",
            report.loaded, report.loaded_at
        ),
        Err(e) => error!("Initial dataset load failed, monitor will retry: {}", e),
    }

    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let sweeper = spawn_ttl_sweeper(
        state.store.clone(),
        config.sweep_every(),
        shutdown_rx.clone(),
    );
    let monitor = EmptinessMonitor::new(loader).spawn(config.poll_every(), shutdown_rx);
    info!("Background tasks started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await
        .context("serving http")?;

    let failed = join_tasks(vec![
        ("ttl sweeper", sweeper),
        ("emptiness monitor", monitor),
    ])
    .await;
    if failed > 0 {
        error!("{} background task(s) did not stop cleanly", failed);
    }
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, tells the background tasks to stop.
async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    let _ = shutdown_tx.send(true);
}
