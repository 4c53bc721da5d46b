// ABOUTME: HTTP server assembly and lifecycle for the subscription service
// ABOUTME: Builds the axum router with middleware, binds the listener, and shuts down on signal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::endpoints;
use crate::errors::{AppError, AppResult};
use crate::middleware::{http_trace_layer, request_id_middleware};
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, SubscriptionRoutes};
use axum::{middleware, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::timeout::TimeoutLayer;
use tracing::{info, warn};

/// Build the complete application router
///
/// Layers run outermost first: request id, then tracing, then the
/// per-request timeout.
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let timeout = resources.config.http.request_timeout();

    Router::new()
        .nest(
            endpoints::API_V1,
            SubscriptionRoutes::routes(Arc::clone(&resources)),
        )
        .merge(HealthRoutes::routes(resources))
        .fallback(handle_not_found)
        .layer(TimeoutLayer::new(timeout))
        .layer(http_trace_layer())
        .layer(middleware::from_fn(request_id_middleware))
}

async fn handle_not_found() -> AppError {
    AppError::not_found("Route")
}

/// Bind the configured address and serve until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> AppResult<()> {
    let addr = resources.config.http.socket_addr();
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        AppError::internal(format!("Failed to bind HTTP listener on {addr}")).with_source(e)
    })?;
    info!("HTTP server listening on http://{addr}");

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal("HTTP server terminated with error").with_source(e))?;

    info!("HTTP server stopped");
    Ok(())
}

/// Resolve once Ctrl-C or (on unix) SIGTERM is received
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C signal"),
        () = terminate => info!("Received terminate signal"),
    }
    info!("Graceful shutdown initiated");
}
