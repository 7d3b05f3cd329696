// ABOUTME: Administrator persistence: repository trait and its SQLite implementation
// ABOUTME: Supports the two operations authentication needs, create and find-by-email
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{parse_timestamp, DatabaseError};
use crate::models::Administrator;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Persistence interface for the administrator record
///
/// Authentication code only talks to this trait, so it runs against
/// `SQLite` in production and against [`super::MemoryAdminRepository`] in tests.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Find the administrator with this email
    async fn find_admin_by_email(&self, email: &str)
        -> Result<Option<Administrator>, DatabaseError>;

    /// Insert a new administrator; fails with [`DatabaseError::Conflict`] if the email exists
    async fn create_admin(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Administrator, DatabaseError>;

    /// Number of administrator rows
    async fn count_admins(&self) -> Result<i64, DatabaseError>;
}

/// `SQLite`-backed administrator store
#[derive(Clone)]
pub struct AdminsManager {
    pool: SqlitePool,
}

impl AdminsManager {
    /// Create a new admins manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub(super) async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS admins (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                hashed_password TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl AdminRepository for AdminsManager {
    async fn find_admin_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Administrator>, DatabaseError> {
        let row = sqlx::query(
            r"
            SELECT id, email, hashed_password, created_at
            FROM admins
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_admin(&r)).transpose()
    }

    async fn create_admin(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Administrator, DatabaseError> {
        let now = Utc::now();
        let result = sqlx::query(
            r"
            INSERT INTO admins (email, hashed_password, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(email)
        .bind(password_hash)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(Administrator {
            id: result.last_insert_rowid(),
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            created_at: now,
        })
    }

    async fn count_admins(&self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn row_to_admin(row: &SqliteRow) -> Result<Administrator, DatabaseError> {
    let created_at: String = row.try_get("created_at")?;
    Ok(Administrator {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("hashed_password")?,
        created_at: parse_timestamp("created_at", &created_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    #[tokio::test]
    async fn test_create_and_find_admin() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let admins = db.admins();

        assert!(admins
            .find_admin_by_email("admin@example.com")
            .await
            .unwrap()
            .is_none());

        let created = admins
            .create_admin("admin@example.com", "$2b$04$hash")
            .await
            .unwrap();
        let found = admins
            .find_admin_by_email("admin@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "$2b$04$hash");
        assert_eq!(admins.count_admins().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let admins = db.admins();
        admins.create_admin("a@example.com", "h1").await.unwrap();

        let err = admins.create_admin("a@example.com", "h2").await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict { .. }));
    }
}
