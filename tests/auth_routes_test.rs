// ABOUTME: HTTP tests for login, identity and bearer-token enforcement on protected routes
// ABOUTME: Drives the full axum router with tower oneshot over an in-memory database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::http::{header, Method, StatusCode};
use chrono::{Duration, Utc};
use common::{
    create_test_app, create_test_app_with, login_token, request, send, ADMIN_EMAIL, ADMIN_PASSWORD,
};
use serde_json::json;

#[tokio::test]
async fn test_login_returns_bearer_token() {
    let app = create_test_app().await.unwrap();
    let body = json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD });

    let (status, _, json) = send(
        &app.router,
        request(Method::POST, "/api/auth/login", None, Some(&body)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["token_type"], "bearer");
    assert!(json["access_token"].as_str().unwrap().split('.').count() == 3);
}

#[tokio::test]
async fn test_login_failures_are_generic_401() {
    let app = create_test_app().await.unwrap();

    let mut messages = Vec::new();
    for body in [
        json!({ "email": ADMIN_EMAIL, "password": "wrong" }),
        json!({ "email": "nobody@example.com", "password": ADMIN_PASSWORD }),
    ] {
        let (status, headers, json) = send(
            &app.router,
            request(Method::POST, "/api/auth/login", None, Some(&body)),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(headers.get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
        messages.push(json["error"]["message"].clone());
    }

    assert_eq!(messages[0], messages[1]);
    assert_eq!(messages[0], "Incorrect email or password");
}

#[tokio::test]
async fn test_oversized_token_lifetime_rejected_at_startup() {
    let result = create_test_app_with(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "1000000000000")]).await;
    assert!(result.is_err());

    let app = create_test_app_with(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "525600")])
        .await
        .unwrap();
    login_token(&app.router).await;
}

#[tokio::test]
async fn test_login_rejects_malformed_email() {
    let app = create_test_app().await.unwrap();
    let body = json!({ "email": "not-an-email", "password": ADMIN_PASSWORD });

    let (status, _, json) = send(
        &app.router,
        request(Method::POST, "/api/auth/login", None, Some(&body)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_me_returns_admin_without_hash() {
    let app = create_test_app().await.unwrap();
    let token = login_token(&app.router).await;

    let (status, _, json) = send(
        &app.router,
        request(Method::GET, "/api/auth/me", Some(&token), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["email"], ADMIN_EMAIL);
    assert!(json["id"].is_i64());
    assert!(json.get("password_hash").is_none());
    assert!(json.get("hashed_password").is_none());
}

#[tokio::test]
async fn test_bearer_scheme_is_case_insensitive() {
    let app = create_test_app().await.unwrap();
    let token = login_token(&app.router).await;

    let mut req = request(Method::GET, "/api/auth/me", None, None);
    req.headers_mut().insert(
        header::AUTHORIZATION,
        format!("bearer {token}").parse().unwrap(),
    );
    let (status, _, json) = send(&app.router, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = create_test_app().await.unwrap();

    for (method, uri) in [
        (Method::GET, "/api/auth/me"),
        (Method::GET, "/api/orders"),
        (Method::GET, "/api/custom-requests"),
        (Method::DELETE, "/api/products/1"),
        (Method::DELETE, "/api/upload/whatever.png"),
    ] {
        let (status, headers, json) = send(&app.router, request(method, uri, None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(headers.get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
        assert_eq!(json["error"]["message"], "Not authenticated");
    }
}

#[tokio::test]
async fn test_invalid_tokens_get_same_response() {
    let app = create_test_app().await.unwrap();
    let tokens = &app.resources.token_manager;

    let expired = tokens
        .issue_at(ADMIN_EMAIL, Some(Duration::minutes(5)), Utc::now() - Duration::hours(1))
        .unwrap();
    let unknown = tokens.issue("ghost@example.com", None).unwrap();
    let garbage = "definitely.not.ajwt".to_owned();

    for token in [expired, unknown, garbage] {
        let (status, headers, json) = send(
            &app.router,
            request(Method::GET, "/api/auth/me", Some(&token), None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(headers.get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
        assert_eq!(json["error"]["message"], "Could not validate credentials");
    }
}

#[tokio::test]
async fn test_health_is_public() {
    let app = create_test_app().await.unwrap();

    let (status, _, json) = send(&app.router, request(Method::GET, "/api/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["message"], "Portfolio & Marketplace API is running");
}
