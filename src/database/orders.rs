// ABOUTME: Database operations for customer orders
// ABOUTME: Orders optionally reference a product; the reference is cleared when the product is deleted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{parse_timestamp, DatabaseError};
use crate::models::{CreateOrderRequest, Order, OrderStatus, OrderType, Page, UpdateOrderRequest};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Customer order manager
#[derive(Clone)]
pub struct OrdersManager {
    pool: SqlitePool,
}

impl OrdersManager {
    /// Create a new orders manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub(super) async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS orders (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                product_id INTEGER REFERENCES products(id) ON DELETE SET NULL,
                customer_name TEXT NOT NULL,
                customer_email TEXT NOT NULL,
                customer_phone TEXT,
                order_type TEXT NOT NULL CHECK (order_type IN ('purchase', 'customization')),
                customization_details TEXT,
                status TEXT NOT NULL DEFAULT 'pending'
                    CHECK (status IN ('pending', 'processing', 'completed', 'cancelled')),
                total_amount REAL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_product_id ON orders(product_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Record a new order in `pending` state
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::InvalidReference`] if `product_id` names no product,
    /// or another error if the insert fails
    pub async fn create(&self, request: &CreateOrderRequest) -> Result<Order, DatabaseError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r"
            INSERT INTO orders (product_id, customer_name, customer_email, customer_phone,
                                order_type, customization_details, status, total_amount,
                                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            ",
        )
        .bind(request.product_id)
        .bind(&request.customer_name)
        .bind(&request.customer_email)
        .bind(&request.customer_phone)
        .bind(request.order_type.as_str())
        .bind(&request.customization_details)
        .bind(OrderStatus::Pending.as_str())
        .bind(request.total_amount)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid())
            .await?
            .ok_or_else(|| DatabaseError::QueryError {
                context: "inserted order could not be read back".to_owned(),
            })
    }

    /// Get an order by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get(&self, order_id: i64) -> Result<Option<Order>, DatabaseError> {
        let row = sqlx::query(
            r"
            SELECT id, product_id, customer_name, customer_email, customer_phone, order_type,
                   customization_details, status, total_amount, created_at, updated_at
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_order(&r)).transpose()
    }

    /// List orders, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(&self, page: Page) -> Result<Vec<Order>, DatabaseError> {
        let rows = sqlx::query(
            r"
            SELECT id, product_id, customer_name, customer_email, customer_phone, order_type,
                   customization_details, status, total_amount, created_at, updated_at
            FROM orders
            ORDER BY id DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_order).collect()
    }

    /// Update status and/or customization details
    ///
    /// Returns `None` when the order does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update(
        &self,
        order_id: i64,
        request: &UpdateOrderRequest,
    ) -> Result<Option<Order>, DatabaseError> {
        let Some(existing) = self.get(order_id).await? else {
            return Ok(None);
        };

        let status = request.status.unwrap_or(existing.status);
        let customization_details = request
            .customization_details
            .clone()
            .unwrap_or(existing.customization_details);

        sqlx::query(
            r"
            UPDATE orders SET status = $1, customization_details = $2, updated_at = $3
            WHERE id = $4
            ",
        )
        .bind(status.as_str())
        .bind(&customization_details)
        .bind(Utc::now().to_rfc3339())
        .bind(order_id)
        .execute(&self.pool)
        .await?;

        self.get(order_id).await
    }
}

fn row_to_order(row: &SqliteRow) -> Result<Order, DatabaseError> {
    let order_type: String = row.try_get("order_type")?;
    let status: String = row.try_get("status")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Order {
        id: row.try_get("id")?,
        product_id: row.try_get("product_id")?,
        customer_name: row.try_get("customer_name")?,
        customer_email: row.try_get("customer_email")?,
        customer_phone: row.try_get("customer_phone")?,
        order_type: OrderType::parse(&order_type),
        customization_details: row.try_get("customization_details")?,
        status: OrderStatus::parse(&status),
        total_amount: row.try_get("total_amount")?,
        created_at: parse_timestamp("created_at", &created_at)?,
        updated_at: parse_timestamp("updated_at", &updated_at)?,
    })
}
