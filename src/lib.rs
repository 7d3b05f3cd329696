// ABOUTME: Main library entry point for the Portfolio & Marketplace API
// ABOUTME: Product catalog, orders, custom requests, page content and uploads behind single-admin auth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Portfolio API
//!
//! A small REST backend for a portfolio and marketplace site. Visitors browse
//! the catalog, place orders and submit custom project requests; a single
//! administrator manages everything else.
//!
//! ## Architecture
//!
//! - **Admin**: bcrypt credentials, idempotent bootstrap and HMAC session tokens
//! - **Database**: `SQLite` through `sqlx`, one manager per resource
//! - **Routes**: axum handlers grouped by resource
//! - **Uploads**: filesystem store served under `/uploads`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use portfolio_api::config::ServerConfig;
//! use portfolio_api::database::Database;
//! use portfolio_api::errors::AppResult;
//! use portfolio_api::resources::ServerResources;
//! use portfolio_api::server::PortfolioServer;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::new(&config.database.url).await?;
//!     let resources = Arc::new(ServerResources::new(config, database));
//!     PortfolioServer::new(resources).run().await
//! }
//! ```

/// Administrator authentication: passwords, bootstrap and session tokens
pub mod admin;

/// Environment-driven configuration
pub mod config;

/// Application constants and configuration defaults
pub mod constants;

/// `SQLite` persistence
pub mod database;

/// Unified error handling with HTTP mapping
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware for authentication and CORS
pub mod middleware;

/// Domain models and request payloads
pub mod models;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// HTTP server assembly
pub mod server;

/// Upload file storage
pub mod uploads;
