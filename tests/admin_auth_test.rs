// ABOUTME: Integration tests for the administrator credential and session token core
// ABOUTME: Runs the same properties against the in-memory and SQLite administrator stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Duration, Utc};
use jsonwebtoken::Algorithm;
use portfolio_api::{
    admin::{authenticate, bootstrap_administrator, AuthFailure, SessionTokenManager},
    config::AuthConfig,
    database::{AdminRepository, Database, MemoryAdminRepository},
};
use std::sync::Arc;

fn auth_config() -> AuthConfig {
    AuthConfig {
        admin_email: common::ADMIN_EMAIL.into(),
        admin_password: common::ADMIN_PASSWORD.into(),
        jwt_secret: "integration-test-secret".into(),
        jwt_algorithm: Algorithm::HS256,
        token_ttl: Duration::minutes(1440),
        bcrypt_cost: 4,
    }
}

async fn sqlite_store() -> Arc<dyn AdminRepository> {
    common::init_test_logging();
    let db = Database::new("sqlite::memory:").await.unwrap();
    Arc::new(db.admins())
}

fn memory_store() -> Arc<dyn AdminRepository> {
    common::init_test_logging();
    Arc::new(MemoryAdminRepository::new())
}

async fn stores() -> Vec<Arc<dyn AdminRepository>> {
    vec![memory_store(), sqlite_store().await]
}

#[tokio::test]
async fn test_login_scenario_round_trip() {
    for store in stores().await {
        let config = auth_config();
        let tokens = SessionTokenManager::from_config(&config);

        let admin = bootstrap_administrator(store.as_ref(), &config).await.unwrap();
        let authed = authenticate(store.as_ref(), "admin@example.com", "admin123")
            .await
            .unwrap();
        assert_eq!(authed, admin);

        let token = tokens
            .issue(&authed.email, Some(Duration::minutes(1440)))
            .unwrap();
        let validated = tokens.validate(store.as_ref(), &token).await.unwrap();
        assert_eq!(validated, admin);
    }
}

#[tokio::test]
async fn test_bootstrap_twice_creates_one_row() {
    for store in stores().await {
        bootstrap_administrator(store.as_ref(), &auth_config())
            .await
            .unwrap();
        bootstrap_administrator(store.as_ref(), &auth_config())
            .await
            .unwrap();
        assert_eq!(store.count_admins().await.unwrap(), 1);
    }
}

#[tokio::test]
async fn test_concurrent_bootstrap_creates_one_row() {
    let store = sqlite_store().await;
    let config = auth_config();

    let (a, b) = tokio::join!(
        bootstrap_administrator(store.as_ref(), &config),
        bootstrap_administrator(store.as_ref(), &config),
    );
    assert_eq!(a.unwrap().id, b.unwrap().id);
    assert_eq!(store.count_admins().await.unwrap(), 1);
}

#[tokio::test]
async fn test_bootstrap_keeps_existing_password() {
    let store = memory_store();
    let admin = bootstrap_administrator(store.as_ref(), &auth_config())
        .await
        .unwrap();

    let changed = AuthConfig {
        admin_password: "a-new-password".into(),
        ..auth_config()
    };
    let again = bootstrap_administrator(store.as_ref(), &changed).await.unwrap();
    assert_eq!(again.password_hash, admin.password_hash);

    let err = authenticate(store.as_ref(), "admin@example.com", "a-new-password")
        .await
        .unwrap_err();
    assert_eq!(err.failure(), Some(AuthFailure::InvalidCredentials));
}

#[tokio::test]
async fn test_bad_credentials_are_indistinguishable() {
    for store in stores().await {
        bootstrap_administrator(store.as_ref(), &auth_config())
            .await
            .unwrap();

        let unknown = authenticate(store.as_ref(), "someone@example.com", "admin123")
            .await
            .unwrap_err();
        let wrong = authenticate(store.as_ref(), "admin@example.com", "wrong")
            .await
            .unwrap_err();

        assert_eq!(unknown.failure(), Some(AuthFailure::InvalidCredentials));
        assert_eq!(wrong.failure(), unknown.failure());
        assert_eq!(wrong.to_string(), unknown.to_string());
    }
}

#[tokio::test]
async fn test_token_expires_after_ttl() {
    let store = memory_store();
    let config = auth_config();
    let tokens = SessionTokenManager::from_config(&config);
    bootstrap_administrator(store.as_ref(), &config).await.unwrap();

    let issued_at = Utc::now();
    let token = tokens
        .issue_at("admin@example.com", Some(Duration::minutes(30)), issued_at)
        .unwrap();

    assert!(tokens
        .validate_at(store.as_ref(), &token, issued_at + Duration::minutes(29))
        .await
        .is_ok());

    let err = tokens
        .validate_at(store.as_ref(), &token, issued_at + Duration::minutes(31))
        .await
        .unwrap_err();
    assert_eq!(err.failure(), Some(AuthFailure::Expired));
}

#[tokio::test]
async fn test_default_ttl_is_configured_lifetime() {
    let store = memory_store();
    let config = auth_config();
    let tokens = SessionTokenManager::from_config(&config);
    bootstrap_administrator(store.as_ref(), &config).await.unwrap();

    let issued_at = Utc::now();
    let token = tokens.issue_at("admin@example.com", None, issued_at).unwrap();

    let almost = issued_at + Duration::minutes(1439);
    assert!(tokens.validate_at(store.as_ref(), &token, almost).await.is_ok());

    let after = issued_at + Duration::minutes(1441);
    let err = tokens
        .validate_at(store.as_ref(), &token, after)
        .await
        .unwrap_err();
    assert_eq!(err.failure(), Some(AuthFailure::Expired));
}

#[tokio::test]
async fn test_altered_signature_is_rejected() {
    let store = memory_store();
    let config = auth_config();
    let tokens = SessionTokenManager::from_config(&config);
    bootstrap_administrator(store.as_ref(), &config).await.unwrap();

    let token = tokens.issue("admin@example.com", None).unwrap();
    let (head, signature) = token.rsplit_once('.').unwrap();
    let mut sig: Vec<char> = signature.chars().collect();
    let mid = sig.len() / 2;
    sig[mid] = if sig[mid] == 'x' { 'y' } else { 'x' };
    let tampered = format!("{head}.{}", sig.into_iter().collect::<String>());

    let err = tokens.validate(store.as_ref(), &tampered).await.unwrap_err();
    assert_eq!(err.failure(), Some(AuthFailure::InvalidSignature));
}

#[tokio::test]
async fn test_token_for_unknown_subject_is_rejected() {
    let store = memory_store();
    let tokens = SessionTokenManager::from_config(&auth_config());

    let token = tokens.issue("admin@example.com", None).unwrap();
    let err = tokens.validate(store.as_ref(), &token).await.unwrap_err();
    assert_eq!(err.failure(), Some(AuthFailure::UnknownSubject));
}

#[tokio::test]
async fn test_algorithms_are_not_interchangeable() {
    let store = memory_store();
    bootstrap_administrator(store.as_ref(), &auth_config())
        .await
        .unwrap();

    let hs384 = SessionTokenManager::new("integration-test-secret", Algorithm::HS384, Duration::hours(1));
    let hs256 = SessionTokenManager::from_config(&auth_config());

    let token = hs384.issue("admin@example.com", None).unwrap();
    assert!(hs384.validate(store.as_ref(), &token).await.is_ok());

    let err = hs256.validate(store.as_ref(), &token).await.unwrap_err();
    assert_eq!(err.failure(), Some(AuthFailure::InvalidSignature));
}
