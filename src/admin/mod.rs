// ABOUTME: Administrator authentication module organization and exports
// ABOUTME: Password hashing, credential checks, bootstrap and session tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Administrator Authentication
//!
//! The site has exactly one privileged account. Login verifies its password
//! and issues a signed session token; every protected request validates that
//! token and resolves the administrator before the handler runs.

/// Credential checks and bootstrap
pub mod auth;
/// Session token issuance and validation
pub mod jwt;
/// Login payloads and failure kinds
pub mod models;
/// bcrypt hashing
pub mod password;

pub use auth::{authenticate, bootstrap_administrator};
pub use jwt::SessionTokenManager;
pub use models::{AdminResponse, AuthError, AuthFailure, LoginRequest, TokenResponse};
pub use password::{hash_password, verify_password};
