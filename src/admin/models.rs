// ABOUTME: Admin authentication data types: login payloads, token responses and failure kinds
// ABOUTME: AuthFailure carries the internal reason; clients only ever see a generic 401
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{error_messages, tokens};
use crate::database::DatabaseError;
use crate::errors::AppError;
use crate::models::Administrator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Login request body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Administrator email
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// Successful login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed session token
    pub access_token: String,
    /// Always `bearer`
    pub token_type: String,
}

impl TokenResponse {
    /// Wrap a freshly issued token
    #[must_use]
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: tokens::TOKEN_TYPE_BEARER.to_owned(),
        }
    }
}

/// Public view of the administrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminResponse {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Administrator> for AdminResponse {
    fn from(admin: Administrator) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            created_at: admin.created_at,
        }
    }
}

/// Why an authentication attempt was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    /// Unknown email or wrong password; the two are never distinguished
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Token was tampered with, signed with another key or another algorithm
    #[error("invalid token signature")]
    InvalidSignature,
    /// Token `exp` is not in the future
    #[error("token expired")]
    Expired,
    /// Payload is not a claim set or has no subject
    #[error("malformed token claims")]
    MalformedClaims,
    /// Subject names no administrator
    #[error("unknown token subject")]
    UnknownSubject,
}

/// Outcome of a failed credential or token check
#[derive(Debug, Error)]
pub enum AuthError {
    /// The caller is not authenticated
    #[error("authentication rejected: {0}")]
    Rejected(AuthFailure),
    /// The administrator store failed
    #[error("administrator store failed: {0}")]
    Store(#[from] DatabaseError),
    /// Hashing work could not be completed
    #[error("authentication internal error: {0}")]
    Internal(String),
}

impl From<AuthFailure> for AuthError {
    fn from(failure: AuthFailure) -> Self {
        Self::Rejected(failure)
    }
}

impl AuthError {
    /// The rejection kind, if this is a rejection
    #[must_use]
    pub const fn failure(&self) -> Option<AuthFailure> {
        match self {
            Self::Rejected(failure) => Some(*failure),
            Self::Store(_) | Self::Internal(_) => None,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Rejected(AuthFailure::InvalidCredentials) => {
                warn!(reason = %AuthFailure::InvalidCredentials, "Login rejected");
                Self::auth_invalid(error_messages::INVALID_CREDENTIALS)
            }
            AuthError::Rejected(failure) => {
                warn!(reason = %failure, "Bearer token rejected");
                Self::auth_invalid(error_messages::COULD_NOT_VALIDATE)
            }
            AuthError::Store(db_error) => Self::database(db_error.to_string()),
            AuthError::Internal(message) => Self::internal(message),
        }
    }
}
