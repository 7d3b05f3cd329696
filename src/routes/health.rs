// ABOUTME: Health check route handler for service monitoring
// ABOUTME: GET /api/health reports liveness with a fixed status message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check route
    pub fn routes() -> axum::Router {
        use crate::constants::service_names::API_TITLE;
        use axum::{routing::get, Json, Router};

        async fn health_handler() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "healthy",
                "message": format!("{API_TITLE} is running")
            }))
        }

        Router::new().route("/api/health", get(health_handler))
    }
}
