#![forbid(unsafe_code)]

use fleetboard_engine::CoveragePolicy;
use fleetboard_model::DashboardSchema;
use fleetboard_server::{
    build_router, spawn_refresh_task, validate_startup_config, AppState, BackendSpec, ServerConfig,
};
use fleetboard_store::{HttpBackend, LocalFsBackend, SnapshotBackend};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn make_backend(config: &ServerConfig) -> Result<Arc<dyn SnapshotBackend>, String> {
    match &config.backend {
        BackendSpec::Local { root } => Ok(Arc::new(LocalFsBackend::new(root.clone()))),
        BackendSpec::Http { base_url } => Ok(Arc::new(
            HttpBackend::new(base_url.clone(), config.fetch_timeout, config.retry_policy())
                .map_err(|e| format!("http backend init failed: {e}"))?,
        )),
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = ServerConfig::from_env()?;
    init_tracing(config.log_json);
    validate_startup_config(&config)?;

    let backend = make_backend(&config)?;
    let state = AppState::new(
        DashboardSchema::standard(),
        CoveragePolicy {
            healthy_min: config.coverage_healthy_min,
        },
    );
    // First tick runs immediately; readiness flips once it completes.
    spawn_refresh_task(state.clone(), backend.clone(), config.refresh_interval);

    let app = build_router(state);
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| format!("bind {} failed: {e}", config.bind_addr))?;
    info!(
        bind = %config.bind_addr,
        backend = %backend.describe(),
        "fleetboard-server listening"
    );
    let drain = config.shutdown_drain;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            tokio::time::sleep(drain).await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
