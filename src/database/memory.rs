// ABOUTME: In-memory administrator repository for tests and embedded use
// ABOUTME: Mirrors the SQLite store's uniqueness semantics behind a tokio RwLock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AdminRepository, DatabaseError};
use crate::models::Administrator;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

/// Administrator store held entirely in process memory
#[derive(Default)]
pub struct MemoryAdminRepository {
    admins: RwLock<Vec<Administrator>>,
}

impl MemoryAdminRepository {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdminRepository for MemoryAdminRepository {
    async fn find_admin_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Administrator>, DatabaseError> {
        let admins = self.admins.read().await;
        Ok(admins.iter().find(|a| a.email == email).cloned())
    }

    async fn create_admin(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Administrator, DatabaseError> {
        let mut admins = self.admins.write().await;
        if admins.iter().any(|a| a.email == email) {
            return Err(DatabaseError::Conflict {
                context: format!("admins.email '{email}' already exists"),
            });
        }

        let admin = Administrator {
            id: i64::try_from(admins.len()).unwrap_or(i64::MAX - 1) + 1,
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            created_at: Utc::now(),
        };
        admins.push(admin.clone());
        Ok(admin)
    }

    async fn count_admins(&self) -> Result<i64, DatabaseError> {
        let admins = self.admins.read().await;
        Ok(i64::try_from(admins.len()).unwrap_or(i64::MAX))
    }
}
