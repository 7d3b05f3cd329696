// ABOUTME: Database operations for custom project requests submitted by prospective clients
// ABOUTME: Create from the public form, list and move through review states from the admin side
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{parse_timestamp, DatabaseError};
use crate::models::{CreateCustomRequest, CustomRequest, Page, RequestStatus, UpdateCustomRequest};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Custom request manager
#[derive(Clone)]
pub struct CustomRequestsManager {
    pool: SqlitePool,
}

impl CustomRequestsManager {
    /// Create a new custom requests manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub(super) async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS custom_requests (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                customer_name TEXT NOT NULL,
                customer_email TEXT NOT NULL,
                customer_phone TEXT,
                project_title TEXT NOT NULL,
                project_scope TEXT NOT NULL,
                budget_range TEXT,
                timeline TEXT,
                additional_details TEXT,
                status TEXT NOT NULL DEFAULT 'pending'
                    CHECK (status IN ('pending', 'in_progress', 'completed', 'rejected')),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Store a new request in `pending` state
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create(
        &self,
        request: &CreateCustomRequest,
    ) -> Result<CustomRequest, DatabaseError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r"
            INSERT INTO custom_requests (customer_name, customer_email, customer_phone,
                                         project_title, project_scope, budget_range, timeline,
                                         additional_details, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            ",
        )
        .bind(&request.customer_name)
        .bind(&request.customer_email)
        .bind(&request.customer_phone)
        .bind(&request.project_title)
        .bind(&request.project_scope)
        .bind(&request.budget_range)
        .bind(&request.timeline)
        .bind(&request.additional_details)
        .bind(RequestStatus::Pending.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid())
            .await?
            .ok_or_else(|| DatabaseError::QueryError {
                context: "inserted custom request could not be read back".to_owned(),
            })
    }

    /// Get a request by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get(&self, request_id: i64) -> Result<Option<CustomRequest>, DatabaseError> {
        let row = sqlx::query(
            r"
            SELECT id, customer_name, customer_email, customer_phone, project_title,
                   project_scope, budget_range, timeline, additional_details, status,
                   created_at, updated_at
            FROM custom_requests
            WHERE id = $1
            ",
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_custom_request(&r)).transpose()
    }

    /// List requests, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(&self, page: Page) -> Result<Vec<CustomRequest>, DatabaseError> {
        let rows = sqlx::query(
            r"
            SELECT id, customer_name, customer_email, customer_phone, project_title,
                   project_scope, budget_range, timeline, additional_details, status,
                   created_at, updated_at
            FROM custom_requests
            ORDER BY id DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_custom_request).collect()
    }

    /// Move a request to a new review state
    ///
    /// Returns `None` when the request does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update(
        &self,
        request_id: i64,
        update: &UpdateCustomRequest,
    ) -> Result<Option<CustomRequest>, DatabaseError> {
        let Some(existing) = self.get(request_id).await? else {
            return Ok(None);
        };
        let status = update.status.unwrap_or(existing.status);

        sqlx::query("UPDATE custom_requests SET status = $1, updated_at = $2 WHERE id = $3")
            .bind(status.as_str())
            .bind(Utc::now().to_rfc3339())
            .bind(request_id)
            .execute(&self.pool)
            .await?;

        self.get(request_id).await
    }
}

fn row_to_custom_request(row: &SqliteRow) -> Result<CustomRequest, DatabaseError> {
    let status: String = row.try_get("status")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(CustomRequest {
        id: row.try_get("id")?,
        customer_name: row.try_get("customer_name")?,
        customer_email: row.try_get("customer_email")?,
        customer_phone: row.try_get("customer_phone")?,
        project_title: row.try_get("project_title")?,
        project_scope: row.try_get("project_scope")?,
        budget_range: row.try_get("budget_range")?,
        timeline: row.try_get("timeline")?,
        additional_details: row.try_get("additional_details")?,
        status: RequestStatus::parse(&status),
        created_at: parse_timestamp("created_at", &created_at)?,
        updated_at: parse_timestamp("updated_at", &updated_at)?,
    })
}
