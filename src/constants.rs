// ABOUTME: System-wide constants and configuration defaults for the Portfolio API
// ABOUTME: Groups service names, environment variable keys, defaults and limits by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Application constants and the defaults used when an environment variable
//! is not set.

/// Service identity used in logs and health responses
pub mod service_names {
    /// Name of the HTTP server binary
    pub const PORTFOLIO_API_SERVER: &str = "portfolio-api-server";

    /// Human-readable API title
    pub const API_TITLE: &str = "Portfolio & Marketplace API";
}

/// Environment variable names read by [`crate::config::environment::ServerConfig`]
pub mod env_keys {
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const HTTP_HOST: &str = "HTTP_HOST";
    pub const HTTP_PORT: &str = "HTTP_PORT";
    pub const ADMIN_EMAIL: &str = "ADMIN_EMAIL";
    pub const ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";
    pub const JWT_SECRET: &str = "JWT_SECRET";
    pub const JWT_ALGORITHM: &str = "JWT_ALGORITHM";
    pub const ACCESS_TOKEN_EXPIRE_MINUTES: &str = "ACCESS_TOKEN_EXPIRE_MINUTES";
    pub const BCRYPT_COST: &str = "BCRYPT_COST";
    pub const UPLOAD_DIR: &str = "UPLOAD_DIR";
    pub const MAX_UPLOAD_SIZE: &str = "MAX_UPLOAD_SIZE";
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Default configuration values
pub mod defaults {
    pub const DATABASE_URL: &str = "sqlite:./portfolio.db";
    pub const HTTP_HOST: &str = "0.0.0.0";
    pub const HTTP_PORT: u16 = 8000;
    pub const ADMIN_EMAIL: &str = "admin@example.com";
    pub const ADMIN_PASSWORD: &str = "admin123";

    /// Placeholder secret; refused in production
    pub const JWT_SECRET: &str = "your-secret-key-change-in-production";
    pub const JWT_ALGORITHM: &str = "HS256";

    /// 24 hours
    pub const ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 1440;
    pub const UPLOAD_DIR: &str = "uploads";

    /// 10 MiB
    pub const MAX_UPLOAD_SIZE: u64 = 10_485_760;
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
}

/// Pagination and request limits
pub mod limits {
    /// Default `skip` for list endpoints
    pub const DEFAULT_SKIP: i64 = 0;

    /// Default `limit` for list endpoints
    pub const DEFAULT_LIMIT: i64 = 100;

    /// Upper bound applied to any requested `limit`
    pub const MAX_LIMIT: i64 = 1000;

    /// Extra body allowance on top of the upload limit for multipart framing
    pub const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

    /// Longest accepted session token lifetime (one year)
    pub const MAX_TOKEN_TTL_MINUTES: i64 = 525_600;
}

/// URL prefixes
pub mod paths {
    /// Public prefix under which stored uploads are served
    pub const UPLOADS_PREFIX: &str = "/uploads";
}

/// Token-related constants
pub mod tokens {
    /// `token_type` value returned by the login endpoint
    pub const TOKEN_TYPE_BEARER: &str = "bearer";

    /// Authorization scheme expected on protected requests (matched case-insensitively)
    pub const BEARER_SCHEME: &str = "Bearer";
}

/// User-facing error messages
pub mod error_messages {
    pub const INVALID_CREDENTIALS: &str = "Incorrect email or password";
    pub const COULD_NOT_VALIDATE: &str = "Could not validate credentials";
    pub const MISSING_AUTH_HEADER: &str = "Not authenticated";
    pub const FILE_TOO_LARGE: &str = "File too large";
    pub const PAGE_CONTENT_EXISTS: &str = "Page content already exists";
}
