// ABOUTME: SQLite database management: connection pool, schema migrations and error types
// ABOUTME: Hands out per-resource managers that share one sqlx connection pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! One [`Database`] owns the `SQLite` pool. Tables are created at startup
//! with `CREATE TABLE IF NOT EXISTS`, and each resource gets a small manager
//! type that borrows a clone of the pool.

mod admins;
mod custom_requests;
mod memory;
mod orders;
mod page_contents;
mod products;

pub use admins::{AdminRepository, AdminsManager};
pub use custom_requests::CustomRequestsManager;
pub use memory::MemoryAdminRepository;
pub use orders::OrdersManager;
pub use page_contents::PageContentManager;
pub use products::ProductsManager;

use crate::errors::AppError;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

/// Errors raised by the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Unique constraint rejected the write
    #[error("Conflict: {context}")]
    Conflict {
        /// What collided
        context: String,
    },

    /// Foreign key pointed at a missing row
    #[error("Invalid reference: {context}")]
    InvalidReference {
        /// Which reference failed
        context: String,
    },

    /// Stored data could not be decoded
    #[error("Invalid stored data: {context}")]
    InvalidData {
        /// What failed to decode
        context: String,
    },

    /// Any other driver failure
    #[error("Query failed: {context}")]
    QueryError {
        /// Driver message
        context: String,
    },
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_error) = &error {
            if db_error.is_unique_violation() {
                return Self::Conflict {
                    context: db_error.message().to_owned(),
                };
            }
            if db_error.is_foreign_key_violation() {
                return Self::InvalidReference {
                    context: db_error.message().to_owned(),
                };
            }
        }
        Self::QueryError {
            context: error.to_string(),
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(error: DatabaseError) -> Self {
        match &error {
            DatabaseError::Conflict { .. } => Self::already_exists(error.to_string()),
            DatabaseError::InvalidReference { .. } => Self::invalid_input(error.to_string()),
            DatabaseError::InvalidData { .. } | DatabaseError::QueryError { .. } => {
                Self::database(error.to_string())
            }
        }
    }
}

/// Database manager owning the connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database at `database_url` and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or a migration fails
    pub async fn new(database_url: &str) -> Result<Self, DatabaseError> {
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to `:memory:` is a separate database, so pin a single one
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;
        let db = Self { pool };
        db.migrate().await?;

        info!("Database ready at {}", database_url);
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        self.admins().migrate().await?;
        self.products().migrate().await?;
        self.orders().migrate().await?;
        self.custom_requests().migrate().await?;
        self.page_contents().migrate().await?;
        Ok(())
    }

    /// Administrator store
    #[must_use]
    pub fn admins(&self) -> AdminsManager {
        AdminsManager::new(self.pool.clone())
    }

    /// Product catalog
    #[must_use]
    pub fn products(&self) -> ProductsManager {
        ProductsManager::new(self.pool.clone())
    }

    /// Customer orders
    #[must_use]
    pub fn orders(&self) -> OrdersManager {
        OrdersManager::new(self.pool.clone())
    }

    /// Custom project requests
    #[must_use]
    pub fn custom_requests(&self) -> CustomRequestsManager {
        CustomRequestsManager::new(self.pool.clone())
    }

    /// Editable page content
    #[must_use]
    pub fn page_contents(&self) -> PageContentManager {
        PageContentManager::new(self.pool.clone())
    }
}

/// Parse an RFC 3339 timestamp column
pub(crate) fn parse_timestamp(column: &str, raw: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::InvalidData {
            context: format!("{column} '{raw}': {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_migrates_twice() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();

        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN \
             ('admins', 'products', 'orders', 'custom_requests', 'page_contents')",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(row.0, 5);
    }

    #[test]
    fn test_parse_timestamp() {
        assert!(parse_timestamp("created_at", "2025-01-02T03:04:05+00:00").is_ok());
        assert!(matches!(
            parse_timestamp("created_at", "yesterday"),
            Err(DatabaseError::InvalidData { .. })
        ));
    }
}
