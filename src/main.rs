//! Tenant Cache Server
//!
//! Serves the operational cache endpoints and runs the background
//! sweeper, with snapshot-based graceful-restart migration.

mod api;
mod cache;
mod config;
mod error;
mod models;
mod tasks;

use std::net::SocketAddr;
use std::path::Path;

use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use cache::Snapshot;
use config::Config;
use tasks::spawn_sweeper;

/// Main entry point for the cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the TTL policy and cache store
/// 4. Import a snapshot from a previous run, if configured
/// 5. Start the background sweeper
/// 6. Create Axum router and start the HTTP server
/// 7. On SIGINT/SIGTERM, stop the sweeper and export a snapshot
#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tenant_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tenant cache server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, sweep_interval={}ms, fallback_ttl={}ms, categories={}",
        config.server_port,
        config.sweep_interval_ms,
        config.fallback_ttl_ms,
        config.categories.len()
    );

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(err) => {
            error!("Invalid cache configuration: {}", err);
            std::process::exit(1);
        }
    };
    info!("Cache store initialized");

    if let Some(path) = &config.snapshot_path {
        import_snapshot(&state, path).await;
    }

    let sweeper_handle = spawn_sweeper(state.cache.clone(), config.sweep_interval_ms);
    info!("Background sweeper started");

    let app = create_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind {}: {}", addr, err);
            std::process::exit(1);
        }
    };
    info!("Server listening on http://{}", addr);

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweeper_handle))
        .await
    {
        error!("Server error: {}", err);
    }

    if let Some(path) = &config.snapshot_path {
        export_snapshot(&state, path).await;
    }

    info!("Server shutdown complete");
}

/// Loads a snapshot file left by a previous run, if one exists.
///
/// A missing file is normal (first start); an unreadable or corrupt one
/// is logged and the server starts with an empty cache.
async fn import_snapshot(state: &AppState, path: &Path) {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return,
        Err(err) => {
            warn!("Could not read snapshot {}: {}", path.display(), err);
            return;
        }
    };

    let snapshot: Snapshot = match serde_json::from_str(&raw) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!("Corrupt snapshot {}: {}", path.display(), err);
            return;
        }
    };

    let count = snapshot.entries.len();
    match state.cache.write().await.import(snapshot.entries) {
        Ok(()) => info!("Imported {} entries from {}", count, path.display()),
        Err(err) => warn!("Snapshot import failed: {}", err),
    }
}

/// Writes the current cache contents to the snapshot file.
async fn export_snapshot(state: &AppState, path: &Path) {
    let snapshot = state.cache.read().await.export();
    let count = snapshot.entries.len();

    let encoded = match serde_json::to_string(&snapshot) {
        Ok(encoded) => encoded,
        Err(err) => {
            error!("Snapshot serialization failed: {}", err);
            return;
        }
    };

    match std::fs::write(path, encoded) {
        Ok(()) => info!("Exported {} entries to {}", count, path.display()),
        Err(err) => error!("Could not write snapshot {}: {}", path.display(), err),
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweeper and allows graceful shutdown.
async fn shutdown_signal(sweeper_handle: tokio::task::JoinHandle<()>) {
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

    sweeper_handle.abort();
    warn!("Sweeper task aborted");
}
