// ABOUTME: Route handlers for editable page content blocks
// ABOUTME: Public reads by key; the administrator creates and replaces content
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::authenticate_admin;
use crate::{
    constants::error_messages,
    database::DatabaseError,
    errors::AppError,
    models::{CreatePageContentRequest, UpdatePageContentRequest},
    resources::ServerResources,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;

/// Page content routes handler
pub struct ContentRoutes;

impl ContentRoutes {
    /// Create all page content routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/content", get(Self::handle_list))
            .route("/api/content", post(Self::handle_create))
            .route("/api/content/:page_key", get(Self::handle_get))
            .route("/api/content/:page_key", put(Self::handle_update))
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let contents = resources.database.page_contents().list().await?;
        Ok((StatusCode::OK, Json(contents)).into_response())
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(page_key): Path<String>,
    ) -> Result<Response, AppError> {
        let content = resources
            .database
            .page_contents()
            .get(&page_key)
            .await?
            .ok_or_else(|| AppError::not_found("Page content"))?;

        Ok((StatusCode::OK, Json(content)).into_response())
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreatePageContentRequest>,
    ) -> Result<Response, AppError> {
        authenticate_admin(&headers, &resources).await?;

        if body.page_key.trim().is_empty() {
            return Err(AppError::invalid_input("page_key must not be empty"));
        }

        let content = match resources.database.page_contents().create(&body).await {
            Ok(content) => content,
            Err(DatabaseError::Conflict { .. }) => {
                return Err(AppError::already_exists(error_messages::PAGE_CONTENT_EXISTS));
            }
            Err(e) => return Err(e.into()),
        };

        Ok((StatusCode::OK, Json(content)).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(page_key): Path<String>,
        Json(body): Json<UpdatePageContentRequest>,
    ) -> Result<Response, AppError> {
        authenticate_admin(&headers, &resources).await?;

        let content = resources
            .database
            .page_contents()
            .update(&page_key, &body.content)
            .await?
            .ok_or_else(|| AppError::not_found("Page content"))?;

        Ok((StatusCode::OK, Json(content)).into_response())
    }
}
