//! API server entry point.

use std::future::IntoFuture;
use std::sync::Arc;

use api::config::{Config, LogFormat};
use tokio::signal;
use tokio::sync::Notify;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env();
    init_tracing(&config);
    tracing::info!("starting hotel booking service");

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");
    api::routes::metrics::describe();

    // 3. Load start-up inventory and build application state
    let inventory = match &config.availability_seed {
        Some(path) => {
            let records = api::seed::load(path).expect("failed to load availability seed");
            tracing::info!(path = %path.display(), records = records.len(), "loaded availability seed");
            records
        }
        None => Vec::new(),
    };
    let state = api::create_default_state(inventory);

    // 4. Build the application
    let app = api::create_app(state, metrics_handle);

    // 5. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    let stop = Arc::new(Notify::new());
    let server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown({
                let stop = Arc::clone(&stop);
                async move { stop.notified().await }
            })
            .into_future(),
    );

    // 6. Drain in-flight requests, bounded by the shutdown timeout
    shutdown_signal().await;
    stop.notify_one();
    match tokio::time::timeout(config.shutdown_timeout, server).await {
        Ok(Ok(Ok(()))) => tracing::info!("server shut down gracefully"),
        Ok(Ok(Err(err))) => tracing::error!(error = %err, "server error"),
        Ok(Err(err)) => tracing::error!(error = %err, "server task failed"),
        Err(_) => tracing::warn!(
            timeout_secs = config.shutdown_timeout.as_secs(),
            "graceful shutdown timed out, dropping remaining connections"
        ),
    }
}
