//! Application builder: wires router + middleware + state into an Axum app.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::PgPool;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use luciole_core::config::AppConfig;
use luciole_core::error::AppError;
use luciole_database::repositories::subscription::SubscriptionRepository;
use luciole_push::{DispatchCoordinator, VapidHttpTransport};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the Luciole server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting Luciole server...");

    let store = Arc::new(SubscriptionRepository::new(db_pool));

    // Fails fast on absent or malformed VAPID credentials.
    let transport = Arc::new(VapidHttpTransport::from_config(&config.push)?);

    let dispatcher = Arc::new(DispatchCoordinator::from_config(
        store.clone(),
        transport,
        config.push.clone(),
    ));

    let config = Arc::new(config);
    let state = AppState::new(Arc::clone(&config), store, dispatcher);

    let app = build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Luciole server listening on {addr}");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, draining connections");
        let _ = shutdown_tx.send(true);
    });

    let mut drain_rx = shutdown_rx.clone();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let mut rx = shutdown_rx;
        let _ = rx.changed().await;
    });

    let mut server_task = tokio::spawn(server.into_future());
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    tokio::select! {
        result = &mut server_task => join_result(result)?,
        _ = drain_rx.changed() => {
            match tokio::time::timeout(grace, &mut server_task).await {
                Ok(result) => join_result(result)?,
                Err(_) => {
                    tracing::warn!(
                        grace_seconds = config.server.shutdown_grace_seconds,
                        "Drain window elapsed, aborting in-flight connections"
                    );
                    server_task.abort();
                }
            }
        }
    }

    Ok(())
}

fn join_result(
    result: Result<Result<(), std::io::Error>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    result
        .map_err(|e| AppError::internal(format!("Server task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
