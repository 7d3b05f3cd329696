// ABOUTME: Administrator credential checks and idempotent bootstrap from configuration
// ABOUTME: bcrypt work runs on the blocking pool so request tasks are never stalled
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::models::{AuthError, AuthFailure};
use super::password::{hash_password, verify_password};
use crate::config::AuthConfig;
use crate::database::{AdminRepository, DatabaseError};
use crate::errors::{AppError, AppResult};
use crate::models::Administrator;
use tracing::{debug, info};

/// Check an email/password pair against the administrator store
///
/// Unknown email and wrong password produce the same
/// [`AuthFailure::InvalidCredentials`].
///
/// # Errors
///
/// Returns [`AuthError::Rejected`] on bad credentials, [`AuthError::Store`]
/// if the lookup fails
pub async fn authenticate(
    repository: &dyn AdminRepository,
    email: &str,
    password: &str,
) -> Result<Administrator, AuthError> {
    let Some(admin) = repository.find_admin_by_email(email).await? else {
        debug!("Login attempt for unknown email");
        return Err(AuthFailure::InvalidCredentials.into());
    };

    let password = password.to_owned();
    let hash = admin.password_hash.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {e}")))?;

    if matches {
        Ok(admin)
    } else {
        Err(AuthFailure::InvalidCredentials.into())
    }
}

/// Ensure the configured administrator exists, creating it if absent
///
/// Safe to call any number of times; a concurrent creation that loses the
/// unique-email race re-reads the winning row.
///
/// # Errors
///
/// Returns an error if hashing fails or the store is unavailable
pub async fn bootstrap_administrator(
    repository: &dyn AdminRepository,
    config: &AuthConfig,
) -> AppResult<Administrator> {
    if let Some(existing) = repository.find_admin_by_email(&config.admin_email).await? {
        debug!(email = %existing.email, "Administrator already present");
        return Ok(existing);
    }

    let password = config.admin_password.clone();
    let cost = config.bcrypt_cost;
    let hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))??;

    match repository.create_admin(&config.admin_email, &hash).await {
        Ok(admin) => {
            info!(email = %admin.email, "Created administrator account");
            Ok(admin)
        }
        Err(DatabaseError::Conflict { .. }) => repository
            .find_admin_by_email(&config.admin_email)
            .await?
            .ok_or_else(|| AppError::internal("Administrator vanished after creation conflict")),
        Err(e) => Err(e.into()),
    }
}
