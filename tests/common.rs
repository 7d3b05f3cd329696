// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Builds an in-memory app with a bootstrapped administrator and request helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `portfolio_api`

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use portfolio_api::{
    admin::bootstrap_administrator, config::ServerConfig, database::Database,
    resources::ServerResources, server::build_router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Once};
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin123";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration for tests: in-memory database, cheap bcrypt, temp upload dir
pub fn test_config(upload_dir: &TempDir, overrides: &[(&str, &str)]) -> Result<ServerConfig> {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("DATABASE_URL".to_owned(), "sqlite::memory:".to_owned()),
        ("ADMIN_EMAIL".to_owned(), ADMIN_EMAIL.to_owned()),
        ("ADMIN_PASSWORD".to_owned(), ADMIN_PASSWORD.to_owned()),
        ("JWT_SECRET".to_owned(), "integration-test-secret".to_owned()),
        ("BCRYPT_COST".to_owned(), "4".to_owned()),
        (
            "UPLOAD_DIR".to_owned(),
            upload_dir.path().to_string_lossy().into_owned(),
        ),
    ]);
    for (key, value) in overrides {
        vars.insert((*key).to_owned(), (*value).to_owned());
    }

    Ok(ServerConfig::from_lookup(|key| vars.get(key).cloned())?)
}

/// A fully wired application over an in-memory database
pub struct TestApp {
    pub router: Router,
    pub resources: Arc<ServerResources>,
    pub upload_dir: TempDir,
}

/// Standard test application with the administrator bootstrapped
pub async fn create_test_app() -> Result<TestApp> {
    create_test_app_with(&[]).await
}

/// Test application with configuration overrides
pub async fn create_test_app_with(overrides: &[(&str, &str)]) -> Result<TestApp> {
    init_test_logging();

    let upload_dir = TempDir::new()?;
    let config = test_config(&upload_dir, overrides)?;
    let database = Database::new(&config.database.url).await?;
    let resources = Arc::new(ServerResources::new(config, database));
    bootstrap_administrator(resources.admin_repository.as_ref(), &resources.config.auth).await?;

    Ok(TestApp {
        router: build_router(&resources),
        resources,
        upload_dir,
    })
}

/// Build a request with an optional JSON body and bearer token
pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    builder.body(body).unwrap()
}

/// Send a request and decode the JSON response body (Null when empty or not JSON)
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, json)
}

/// Log in as the configured administrator and return the access token
pub async fn login_token(router: &Router) -> String {
    let body = serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD });
    let (status, _, json) = send(
        router,
        request(Method::POST, "/api/auth/login", None, Some(&body)),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {json}");
    json["access_token"].as_str().unwrap().to_owned()
}
