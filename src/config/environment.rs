// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into an immutable, validated ServerConfig at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management
//!
//! Configuration is read once at startup into a [`ServerConfig`] value and
//! then passed by reference to every component that needs it. Nothing reads
//! the environment after that point.

use crate::constants::{defaults, env_keys, limits};
use crate::errors::{AppError, AppResult};
use chrono::Duration;
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
}

/// Database settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `sqlx` connection URL (`sqlite:./portfolio.db`, `sqlite::memory:`)
    pub url: String,
}

/// Administrator bootstrap and session token settings
#[derive(Clone)]
pub struct AuthConfig {
    /// Email of the administrator created at startup
    pub admin_email: String,
    /// Password of the administrator created at startup
    pub admin_password: String,
    /// HMAC secret used to sign session tokens
    pub jwt_secret: String,
    /// Signing algorithm, restricted to the HMAC family
    pub jwt_algorithm: Algorithm,
    /// Default session token lifetime
    pub token_ttl: Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("token_ttl_minutes", &self.token_ttl.num_minutes())
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// File upload settings
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory that receives uploaded files
    pub directory: PathBuf,
    /// Maximum accepted file size in bytes
    pub max_size_bytes: u64,
}

/// CORS settings
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma-separated origin list, or `*`
    pub allowed_origins: String,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// HTTP listener
    pub http: HttpConfig,
    /// Database connection
    pub database: DatabaseConfig,
    /// Authentication
    pub auth: AuthConfig,
    /// File uploads
    pub uploads: UploadConfig,
    /// Cross-origin policy
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables, reading `.env` first if present
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a variable holds an invalid value
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a value is present but invalid
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let environment =
            Environment::from_str_or_default(&var_or(env_keys::ENVIRONMENT, "development"));

        let jwt_secret = var_or(env_keys::JWT_SECRET, defaults::JWT_SECRET);
        if jwt_secret.is_empty() {
            return Err(AppError::config(format!(
                "{} must not be empty",
                env_keys::JWT_SECRET
            )));
        }
        if jwt_secret == defaults::JWT_SECRET {
            if environment.is_production() {
                return Err(AppError::config(format!(
                    "{} must be set to a private value in production",
                    env_keys::JWT_SECRET
                )));
            }
            warn!("Using the built-in development JWT secret; set JWT_SECRET before deploying");
        }

        let token_ttl_minutes: i64 = parse_var(
            env_keys::ACCESS_TOKEN_EXPIRE_MINUTES,
            &var_or(
                env_keys::ACCESS_TOKEN_EXPIRE_MINUTES,
                &defaults::ACCESS_TOKEN_EXPIRE_MINUTES.to_string(),
            ),
        )?;
        let token_ttl = token_ttl_from_minutes(token_ttl_minutes).ok_or_else(|| {
            AppError::config(format!(
                "{} must be between 1 and {}",
                env_keys::ACCESS_TOKEN_EXPIRE_MINUTES,
                limits::MAX_TOKEN_TTL_MINUTES
            ))
        })?;

        let bcrypt_cost: u32 = parse_var(
            env_keys::BCRYPT_COST,
            &var_or(env_keys::BCRYPT_COST, &bcrypt::DEFAULT_COST.to_string()),
        )?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(AppError::config(format!(
                "{} must be between 4 and 31",
                env_keys::BCRYPT_COST
            )));
        }

        Ok(Self {
            environment,
            http: HttpConfig {
                host: var_or(env_keys::HTTP_HOST, defaults::HTTP_HOST),
                port: parse_var(
                    env_keys::HTTP_PORT,
                    &var_or(env_keys::HTTP_PORT, &defaults::HTTP_PORT.to_string()),
                )?,
            },
            database: DatabaseConfig {
                url: var_or(env_keys::DATABASE_URL, defaults::DATABASE_URL),
            },
            auth: AuthConfig {
                admin_email: var_or(env_keys::ADMIN_EMAIL, defaults::ADMIN_EMAIL),
                admin_password: var_or(env_keys::ADMIN_PASSWORD, defaults::ADMIN_PASSWORD),
                jwt_secret,
                jwt_algorithm: parse_hmac_algorithm(&var_or(
                    env_keys::JWT_ALGORITHM,
                    defaults::JWT_ALGORITHM,
                ))?,
                token_ttl,
                bcrypt_cost,
            },
            uploads: UploadConfig {
                directory: PathBuf::from(var_or(env_keys::UPLOAD_DIR, defaults::UPLOAD_DIR)),
                max_size_bytes: parse_var(
                    env_keys::MAX_UPLOAD_SIZE,
                    &var_or(
                        env_keys::MAX_UPLOAD_SIZE,
                        &defaults::MAX_UPLOAD_SIZE.to_string(),
                    ),
                )?,
            },
            cors: CorsConfig {
                allowed_origins: var_or(
                    env_keys::CORS_ALLOWED_ORIGINS,
                    defaults::CORS_ALLOWED_ORIGINS,
                ),
            },
        })
    }

    /// Socket address string for the HTTP listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http.host, self.http.port)
    }

    /// One-line configuration summary that is safe to log
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={} bind={} database={} admin={} jwt_algorithm={:?} token_ttl={}m upload_dir={} max_upload={}B cors={}",
            self.environment,
            self.bind_address(),
            self.database.url,
            self.auth.admin_email,
            self.auth.jwt_algorithm,
            self.auth.token_ttl.num_minutes(),
            self.uploads.directory.display(),
            self.uploads.max_size_bytes,
            self.cors.allowed_origins,
        )
    }
}

/// Token lifetime for a minute count, `None` unless it lies in `1..=MAX_TOKEN_TTL_MINUTES`
#[must_use]
pub fn token_ttl_from_minutes(minutes: i64) -> Option<Duration> {
    if (1..=limits::MAX_TOKEN_TTL_MINUTES).contains(&minutes) {
        Duration::try_minutes(minutes)
    } else {
        None
    }
}

/// Parse a configuration value, naming the variable in the error
fn parse_var<T>(key: &str, raw: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}")))
}

/// Only shared-secret algorithms make sense for a single signing secret
fn parse_hmac_algorithm(name: &str) -> AppResult<Algorithm> {
    let algorithm = Algorithm::from_str(name.trim()).map_err(|e| {
        AppError::config(format!("Invalid {} '{name}': {e}", env_keys::JWT_ALGORITHM))
    })?;

    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        other => Err(AppError::config(format!(
            "Unsupported {} {other:?}: only HS256, HS384 and HS512 are accepted",
            env_keys::JWT_ALGORITHM
        ))),
    }
}
