use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use vitrina_client::{RotatingFetcher, SelectorExtract};
use vitrina_core::{TracingWorkerReporter, WorkerConfig, WorkerService};
use vitrina_db::{Database, DatabaseConfig};
use vitrina_server::routes;
use vitrina_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("vitrina_core=info".parse()?)
                .add_directive("vitrina_server=info".parse()?),
        )
        .with_target(false)
        .init();

    let port = std::env::var("VITRINA_PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("0.0.0.0:{port}");
    let poll_interval = std::env::var("VITRINA_POLL_INTERVAL_SECS")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(3u64);

    // Schema init failure here is fatal; everything downstream needs it.
    let db = Database::connect(&DatabaseConfig::from_env()?).await?;
    db.init_schema().await?;

    // The single polling worker runs alongside the API and owns all
    // terminal job transitions.
    let worker = WorkerService::new(
        db.job_repo(),
        RotatingFetcher::new()?,
        SelectorExtract::new(),
        WorkerConfig::default().with_poll_interval(Duration::from_secs(poll_interval)),
    );
    let cancel_token = CancellationToken::new();
    let worker_token = cancel_token.clone();
    let worker_handle = tokio::spawn(async move {
        worker.run(worker_token, &TracingWorkerReporter).await;
    });

    let state = Arc::new(AppState { db });
    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cancel_token.cancel();
    worker_handle.await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    tracing::info!("Shutdown signal received");
}
