// ABOUTME: Route module organization for the Portfolio API HTTP endpoints
// ABOUTME: One routes struct per resource plus the shared admin authentication helper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Portfolio API
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the database managers, the upload store and the admin core.

/// Administrator login and identity routes
pub mod auth;
/// Page content routes
pub mod content;
/// Custom project request routes
pub mod custom_requests;
/// Health check route
pub mod health;
/// Order routes
pub mod orders;
/// Product catalog routes
pub mod products;
/// File upload routes
pub mod uploads;

pub use auth::AuthRoutes;
pub use content::ContentRoutes;
pub use custom_requests::CustomRequestRoutes;
pub use health::HealthRoutes;
pub use orders::OrderRoutes;
pub use products::ProductRoutes;
pub use uploads::UploadRoutes;

use crate::errors::AppResult;
use crate::models::{Administrator, Page};
use crate::resources::ServerResources;
use axum::http::{header, HeaderMap};
use serde::Deserialize;
use std::sync::Arc;

/// `skip`/`limit` query parameters shared by list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    /// Clamp into a [`Page`]
    #[must_use]
    pub fn page(&self) -> Page {
        Page::new(self.skip, self.limit)
    }
}

/// Resolve the administrator from the `Authorization` header
pub(crate) async fn authenticate_admin(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> AppResult<Administrator> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    resources
        .auth_middleware
        .authenticate_request(auth_header)
        .await
}
