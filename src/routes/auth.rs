// ABOUTME: Administrator login and identity route handlers
// ABOUTME: POST /api/auth/login issues a session token; GET /api/auth/me echoes the authenticated admin
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Authentication routes
//!
//! Login verifies the password on the blocking pool, then signs a session
//! token with the configured lifetime.

use super::authenticate_admin;
use crate::{
    admin::{authenticate, AdminResponse, LoginRequest, TokenResponse},
    errors::AppError,
    models::is_valid_email,
    resources::ServerResources,
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tracing::info;

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/me", get(Self::handle_me))
            .with_state(resources)
    }

    /// Handle POST /api/auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        if !is_valid_email(&request.email) {
            return Err(AppError::invalid_input("Invalid email address"));
        }

        let admin = authenticate(
            resources.admin_repository.as_ref(),
            &request.email,
            &request.password,
        )
        .await?;

        let token = resources.token_manager.issue(&admin.email, None)?;
        info!(admin_id = admin.id, "Administrator logged in");

        Ok((StatusCode::OK, Json(TokenResponse::bearer(token))).into_response())
    }

    /// Handle GET /api/auth/me
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let admin = authenticate_admin(&headers, &resources).await?;
        Ok((StatusCode::OK, Json(AdminResponse::from(admin))).into_response())
    }
}
