// ABOUTME: Route handlers for customer orders
// ABOUTME: Anyone may place an order; listing, lookup and status changes are admin-only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{authenticate_admin, PageQuery};
use crate::{
    errors::AppError,
    models::{is_valid_email, CreateOrderRequest, UpdateOrderRequest},
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
use tracing::info;

/// Order routes handler
pub struct OrderRoutes;

impl OrderRoutes {
    /// Create all order routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/orders", get(Self::handle_list))
            .route("/api/orders", post(Self::handle_create))
            .route("/api/orders/:id", get(Self::handle_get))
            .route("/api/orders/:id", put(Self::handle_update))
            .with_state(resources)
    }

    /// Handle GET /api/orders
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        authenticate_admin(&headers, &resources).await?;

        let orders = resources.database.orders().list(query.page()).await?;
        Ok((StatusCode::OK, Json(orders)).into_response())
    }

    /// Handle GET /api/orders/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        authenticate_admin(&headers, &resources).await?;

        let order = resources
            .database
            .orders()
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Order"))?;

        Ok((StatusCode::OK, Json(order)).into_response())
    }

    /// Handle POST /api/orders
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<CreateOrderRequest>,
    ) -> Result<Response, AppError> {
        if body.customer_name.trim().is_empty() {
            return Err(AppError::invalid_input("Customer name must not be empty"));
        }
        if !is_valid_email(&body.customer_email) {
            return Err(AppError::invalid_input("Invalid customer email address"));
        }
        if let Some(product_id) = body.product_id {
            if !resources.database.products().exists(product_id).await? {
                return Err(AppError::invalid_input(format!(
                    "Product {product_id} does not exist"
                )));
            }
        }

        let order = resources.database.orders().create(&body).await?;
        info!(order_id = order.id, order_type = order.order_type.as_str(), "Order placed");

        Ok((StatusCode::OK, Json(order)).into_response())
    }

    /// Handle PUT /api/orders/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(body): Json<UpdateOrderRequest>,
    ) -> Result<Response, AppError> {
        authenticate_admin(&headers, &resources).await?;

        let order = resources
            .database
            .orders()
            .update(id, &body)
            .await?
            .ok_or_else(|| AppError::not_found("Order"))?;

        Ok((StatusCode::OK, Json(order)).into_response())
    }
}
