// ABOUTME: Session token issuance and validation for the administrator
// ABOUTME: HMAC-signed JWTs carrying {sub: email, exp}; expiry checked without leeway
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Session Tokens
//!
//! Tokens are self-contained: nothing is stored server side and there is no
//! revocation list. A token is accepted when its signature verifies with the
//! process-wide secret and algorithm, its `exp` is strictly in the future,
//! and its subject still names an administrator.

use super::models::{AuthError, AuthFailure};
use crate::config::AuthConfig;
use crate::database::AdminRepository;
use crate::errors::{AppError, AppResult};
use crate::models::Administrator;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionClaims {
    #[serde(default)]
    sub: Option<String>,
    exp: i64,
}

/// Issues and validates administrator session tokens
#[derive(Clone)]
pub struct SessionTokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl SessionTokenManager {
    /// Build a manager from the signing secret, algorithm and default lifetime
    #[must_use]
    pub fn new(secret: &str, algorithm: Algorithm, default_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            default_ttl,
        }
    }

    /// Build a manager from the authentication settings
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.jwt_algorithm, config.token_ttl)
    }

    /// Default token lifetime
    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Mint a token for `subject` valid for `ttl` (or the default lifetime)
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn issue(&self, subject: &str, ttl: Option<Duration>) -> AppResult<String> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Mint a token as if the current time were `now`
    ///
    /// # Errors
    ///
    /// Returns an error if the expiry is not representable or JWT encoding fails
    pub fn issue_at(
        &self,
        subject: &str,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> AppResult<String> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            AppError::internal(format!(
                "Session token lifetime of {} minutes overflows the expiry timestamp",
                ttl.num_minutes()
            ))
        })?;
        let claims = SessionClaims {
            sub: Some(subject.to_owned()),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign session token: {e}")))
    }

    /// Check signature, expiry and claim shape, returning the subject email
    ///
    /// # Errors
    ///
    /// Returns the [`AuthFailure`] describing why the token was refused
    pub fn decode_subject_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, AuthFailure> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| Self::classify_jwt_error(&e))?;
        let claims = data.claims;

        if claims.exp <= now.timestamp() {
            return Err(AuthFailure::Expired);
        }

        match claims.sub {
            Some(sub) if !sub.is_empty() => Ok(sub),
            _ => Err(AuthFailure::MalformedClaims),
        }
    }

    /// Validate a token and resolve its administrator
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] for invalid tokens, or [`AuthError::Store`]
    /// if the administrator lookup fails
    pub async fn validate(
        &self,
        repository: &dyn AdminRepository,
        token: &str,
    ) -> Result<Administrator, AuthError> {
        self.validate_at(repository, token, Utc::now()).await
    }

    /// Validate a token as if the current time were `now`
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] for invalid tokens, or [`AuthError::Store`]
    /// if the administrator lookup fails
    pub async fn validate_at(
        &self,
        repository: &dyn AdminRepository,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Administrator, AuthError> {
        let subject = self.decode_subject_at(token, now)?;

        repository
            .find_admin_by_email(&subject)
            .await?
            .ok_or(AuthError::Rejected(AuthFailure::UnknownSubject))
    }

    fn classify_jwt_error(e: &jsonwebtoken::errors::Error) -> AuthFailure {
        use jsonwebtoken::errors::ErrorKind;
        debug!("Session token decode failed: {:?}", e.kind());

        match e.kind() {
            ErrorKind::InvalidToken
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_)
            | ErrorKind::MissingRequiredClaim(_) => AuthFailure::MalformedClaims,
            _ => AuthFailure::InvalidSignature,
        }
    }
}
