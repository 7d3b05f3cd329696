// ABOUTME: bcrypt password hashing and verification for the administrator credential
// ABOUTME: Verification never errors; malformed hashes simply fail to match
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};

/// Hash a password with a fresh random salt
///
/// # Errors
///
/// Returns an error if `cost` is outside bcrypt's accepted range
pub fn hash_password(plaintext: &str, cost: u32) -> AppResult<String> {
    bcrypt::hash(plaintext, cost)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Check a password against a stored bcrypt hash
#[must_use]
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    bcrypt::verify(plaintext, hash).unwrap_or(false)
}
