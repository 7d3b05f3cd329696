// ABOUTME: HTTP middleware for bearer authentication and cross-origin policy
// ABOUTME: Re-exports the admin auth middleware and the CORS layer builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Bearer token authentication
pub mod auth;
/// CORS layer configuration
pub mod cors;

pub use auth::AdminAuthMiddleware;
pub use cors::setup_cors;
