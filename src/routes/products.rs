// ABOUTME: Route handlers for the product catalog REST API
// ABOUTME: Public listing and lookup; create, update and delete require the administrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::authenticate_admin;
use crate::{
    errors::AppError,
    models::{CreateProductRequest, Page, ProductFilter, UpdateProductRequest},
    resources::ServerResources,
};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Query parameters for listing products
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub featured: Option<bool>,
}

/// Product routes handler
pub struct ProductRoutes;

impl ProductRoutes {
    /// Create all product routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/products", get(Self::handle_list))
            .route("/api/products", post(Self::handle_create))
            .route("/api/products/:id", get(Self::handle_get))
            .route("/api/products/:id", put(Self::handle_update))
            .route("/api/products/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle GET /api/products
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ListProductsQuery>,
    ) -> Result<Response, AppError> {
        let filter = ProductFilter {
            category: query.category,
            featured: query.featured,
        };
        let page = Page::new(query.skip, query.limit);

        let products = resources.database.products().list(&filter, page).await?;
        Ok((StatusCode::OK, Json(products)).into_response())
    }

    /// Handle GET /api/products/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let product = resources
            .database
            .products()
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product"))?;

        Ok((StatusCode::OK, Json(product)).into_response())
    }

    /// Handle POST /api/products
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateProductRequest>,
    ) -> Result<Response, AppError> {
        authenticate_admin(&headers, &resources).await?;

        if body.title.trim().is_empty() {
            return Err(AppError::invalid_input("Product title must not be empty"));
        }

        let product = resources.database.products().create(&body).await?;
        Ok((StatusCode::OK, Json(product)).into_response())
    }

    /// Handle PUT /api/products/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(body): Json<UpdateProductRequest>,
    ) -> Result<Response, AppError> {
        authenticate_admin(&headers, &resources).await?;

        let product = resources
            .database
            .products()
            .update(id, &body)
            .await?
            .ok_or_else(|| AppError::not_found("Product"))?;

        Ok((StatusCode::OK, Json(product)).into_response())
    }

    /// Handle DELETE /api/products/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        authenticate_admin(&headers, &resources).await?;

        if !resources.database.products().delete(id).await? {
            return Err(AppError::not_found("Product"));
        }

        Ok((
            StatusCode::OK,
            Json(json!({ "message": "Product deleted successfully" })),
        )
            .into_response())
    }
}
