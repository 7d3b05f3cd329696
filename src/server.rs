// ABOUTME: HTTP server assembly: merges all route groups, applies tracing and CORS layers
// ABOUTME: Serves on the configured address and drains connections on Ctrl-C or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use crate::routes::{
    AuthRoutes, ContentRoutes, CustomRequestRoutes, HealthRoutes, OrderRoutes, ProductRoutes,
    UploadRoutes,
};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Portfolio & marketplace HTTP server
pub struct PortfolioServer {
    resources: Arc<ServerResources>,
}

impl PortfolioServer {
    /// Create a server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the complete application router
    pub fn router(&self) -> Router {
        build_router(&self.resources)
    }

    /// Bind the configured address and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the upload directory cannot be created, the
    /// address cannot be bound, or the server fails
    pub async fn run(&self) -> AppResult<()> {
        self.resources.uploads.ensure_root().await?;

        let bind_address = self.resources.config.bind_address();
        let listener = tokio::net::TcpListener::bind(&bind_address)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {bind_address}: {e}")))?;

        info!("HTTP server listening on http://{bind_address}");
        info!("Health endpoint: http://{bind_address}/api/health");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("HTTP server error: {e}")))?;

        info!("Server shut down gracefully");
        Ok(())
    }
}

/// Merge every route group and apply the cross-cutting layers
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(ProductRoutes::routes(resources.clone()))
        .merge(OrderRoutes::routes(resources.clone()))
        .merge(CustomRequestRoutes::routes(resources.clone()))
        .merge(ContentRoutes::routes(resources.clone()))
        .merge(UploadRoutes::routes(resources.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(setup_cors(&resources.config.cors))
}

/// Resolves on Ctrl-C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
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
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
