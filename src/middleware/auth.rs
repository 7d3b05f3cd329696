// ABOUTME: Bearer token authentication for protected admin routes
// ABOUTME: Extracts the Authorization header token and resolves it to the administrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::admin::SessionTokenManager;
use crate::constants::tokens;
use crate::database::AdminRepository;
use crate::errors::{AppError, AppResult};
use crate::models::Administrator;
use std::sync::Arc;

/// Authenticates requests against the administrator session tokens
#[derive(Clone)]
pub struct AdminAuthMiddleware {
    token_manager: Arc<SessionTokenManager>,
    repository: Arc<dyn AdminRepository>,
}

impl AdminAuthMiddleware {
    /// Create new admin auth middleware
    #[must_use]
    pub fn new(
        token_manager: Arc<SessionTokenManager>,
        repository: Arc<dyn AdminRepository>,
    ) -> Self {
        Self {
            token_manager,
            repository,
        }
    }

    /// Authenticate a request from its `Authorization` header value
    ///
    /// # Errors
    ///
    /// Returns an auth-required error when the header is missing or not a
    /// bearer credential, an auth-invalid error when the token is refused,
    /// or a database error if the administrator lookup fails
    #[tracing::instrument(skip_all, fields(admin_email = tracing::field::Empty))]
    pub async fn authenticate_request(&self, auth_header: Option<&str>) -> AppResult<Administrator> {
        let token = auth_header
            .and_then(|value| value.trim().split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case(tokens::BEARER_SCHEME))
            .map(|(_, token)| token.trim())
            .filter(|token| !token.is_empty())
            .ok_or_else(AppError::auth_required)?;

        let admin = self
            .token_manager
            .validate(self.repository.as_ref(), token)
            .await?;

        tracing::Span::current().record("admin_email", admin.email.as_str());
        Ok(admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryAdminRepository;
    use crate::errors::ErrorCode;
    use chrono::Duration;
    use jsonwebtoken::Algorithm;

    fn middleware(repo: Arc<MemoryAdminRepository>) -> (AdminAuthMiddleware, Arc<SessionTokenManager>) {
        let tokens = Arc::new(SessionTokenManager::new(
            "middleware-secret",
            Algorithm::HS256,
            Duration::hours(1),
        ));
        (AdminAuthMiddleware::new(tokens.clone(), repo), tokens)
    }

    #[tokio::test]
    async fn test_missing_or_non_bearer_header() {
        let (mw, _) = middleware(Arc::new(MemoryAdminRepository::new()));

        for header in [None, Some("Basic abc"), Some("Bearer "), Some("bearer-less")] {
            let err = mw.authenticate_request(header).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::AuthRequired);
        }
    }

    #[tokio::test]
    async fn test_valid_bearer_token_resolves_admin() {
        let repo = Arc::new(MemoryAdminRepository::new());
        repo.create_admin("admin@example.com", "hash").await.unwrap();
        let (mw, tokens) = middleware(repo);

        let token = tokens.issue("admin@example.com", None).unwrap();
        let admin = mw
            .authenticate_request(Some(&format!("Bearer {token}")))
            .await
            .unwrap();
        assert_eq!(admin.email, "admin@example.com");

        for scheme in ["bearer", "BEARER", "BeArEr"] {
            let admin = mw
                .authenticate_request(Some(&format!("{scheme} {token}")))
                .await
                .unwrap();
            assert_eq!(admin.email, "admin@example.com");
        }

        let err = mw
            .authenticate_request(Some("Bearer not.a.token"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthInvalid);
    }
}
