// ABOUTME: Route handlers for custom project requests
// ABOUTME: Public submission form; the administrator lists and moves requests through review
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{authenticate_admin, PageQuery};
use crate::{
    errors::AppError,
    models::{is_valid_email, CreateCustomRequest, UpdateCustomRequest},
    resources::ServerResources,
};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;

/// Custom request routes handler
pub struct CustomRequestRoutes;

impl CustomRequestRoutes {
    /// Create all custom request routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/custom-requests", get(Self::handle_list))
            .route("/api/custom-requests", post(Self::handle_create))
            .route("/api/custom-requests/:id", put(Self::handle_update))
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        authenticate_admin(&headers, &resources).await?;

        let requests = resources
            .database
            .custom_requests()
            .list(query.page())
            .await?;
        Ok((StatusCode::OK, Json(requests)).into_response())
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<CreateCustomRequest>,
    ) -> Result<Response, AppError> {
        if !is_valid_email(&body.customer_email) {
            return Err(AppError::invalid_input("Invalid customer email address"));
        }
        if body.project_title.trim().is_empty() || body.project_scope.trim().is_empty() {
            return Err(AppError::invalid_input(
                "Project title and scope must not be empty",
            ));
        }

        let request = resources.database.custom_requests().create(&body).await?;
        Ok((StatusCode::OK, Json(request)).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(body): Json<UpdateCustomRequest>,
    ) -> Result<Response, AppError> {
        authenticate_admin(&headers, &resources).await?;

        let request = resources
            .database
            .custom_requests()
            .update(id, &body)
            .await?
            .ok_or_else(|| AppError::not_found("Custom request"))?;

        Ok((StatusCode::OK, Json(request)).into_response())
    }
}
