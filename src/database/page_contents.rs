// ABOUTME: Database operations for editable site copy addressed by page key
// ABOUTME: Keys are unique; creating a duplicate key surfaces as a conflict
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{parse_timestamp, DatabaseError};
use crate::models::{CreatePageContentRequest, PageContent};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Page content manager
#[derive(Clone)]
pub struct PageContentManager {
    pool: SqlitePool,
}

impl PageContentManager {
    /// Create a new page content manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub(super) async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS page_contents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                page_key TEXT NOT NULL UNIQUE,
                content_type TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Create a content block
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Conflict`] if `page_key` is taken, or another error if the insert fails
    pub async fn create(
        &self,
        request: &CreatePageContentRequest,
    ) -> Result<PageContent, DatabaseError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r"
            INSERT INTO page_contents (page_key, content_type, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ",
        )
        .bind(&request.page_key)
        .bind(&request.content_type)
        .bind(&request.content)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get(&request.page_key)
            .await?
            .ok_or_else(|| DatabaseError::QueryError {
                context: "inserted page content could not be read back".to_owned(),
            })
    }

    /// Get a content block by key
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get(&self, page_key: &str) -> Result<Option<PageContent>, DatabaseError> {
        let row = sqlx::query(
            r"
            SELECT id, page_key, content_type, content, created_at, updated_at
            FROM page_contents
            WHERE page_key = $1
            ",
        )
        .bind(page_key)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_page_content(&r)).transpose()
    }

    /// All content blocks ordered by key
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(&self) -> Result<Vec<PageContent>, DatabaseError> {
        let rows = sqlx::query(
            r"
            SELECT id, page_key, content_type, content, created_at, updated_at
            FROM page_contents
            ORDER BY page_key
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_page_content).collect()
    }

    /// Replace the content of an existing block
    ///
    /// Returns `None` when no block has this key.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update(
        &self,
        page_key: &str,
        content: &str,
    ) -> Result<Option<PageContent>, DatabaseError> {
        let result = sqlx::query(
            "UPDATE page_contents SET content = $1, updated_at = $2 WHERE page_key = $3",
        )
        .bind(content)
        .bind(Utc::now().to_rfc3339())
        .bind(page_key)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(page_key).await
    }
}

fn row_to_page_content(row: &SqliteRow) -> Result<PageContent, DatabaseError> {
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(PageContent {
        id: row.try_get("id")?,
        page_key: row.try_get("page_key")?,
        content_type: row.try_get("content_type")?,
        content: row.try_get("content")?,
        created_at: parse_timestamp("created_at", &created_at)?,
        updated_at: parse_timestamp("updated_at", &updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    fn hero() -> CreatePageContentRequest {
        CreatePageContentRequest {
            page_key: "home_hero".into(),
            content_type: "text".into(),
            content: "Handmade furniture".into(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_page_key_conflicts() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let contents = db.page_contents();

        contents.create(&hero()).await.unwrap();
        let err = contents.create(&hero()).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict { .. }));
        assert_eq!(contents.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_content() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let contents = db.page_contents();
        contents.create(&hero()).await.unwrap();

        let updated = contents
            .update("home_hero", "Made to order")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.content, "Made to order");
        assert_eq!(updated.content_type, "text");
        assert!(contents.update("missing", "x").await.unwrap().is_none());
    }
}
