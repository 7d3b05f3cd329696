// ABOUTME: Database operations for catalog products
// ABOUTME: Filterable paginated listing plus create, partial update and delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{parse_timestamp, DatabaseError};
use crate::models::{CreateProductRequest, Page, Product, ProductFilter, UpdateProductRequest};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};

const PRODUCT_COLUMNS: &str = "id, title, description, price, category, image_url, \
     additional_images, features, is_featured, is_available, created_at, updated_at";

/// Product catalog manager
#[derive(Clone)]
pub struct ProductsManager {
    pool: SqlitePool,
}

impl ProductsManager {
    /// Create a new products manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub(super) async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                price REAL NOT NULL,
                category TEXT,
                image_url TEXT,
                additional_images TEXT,
                features TEXT,
                is_featured INTEGER NOT NULL DEFAULT 0,
                is_available INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_category ON products(category)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create a new product
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create(&self, request: &CreateProductRequest) -> Result<Product, DatabaseError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r"
            INSERT INTO products (title, description, price, category, image_url,
                                  additional_images, features, is_featured, is_available,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            ",
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.price)
        .bind(&request.category)
        .bind(&request.image_url)
        .bind(&request.additional_images)
        .bind(&request.features)
        .bind(request.is_featured)
        .bind(request.is_available)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid())
            .await?
            .ok_or_else(|| DatabaseError::QueryError {
                context: "inserted product could not be read back".to_owned(),
            })
    }

    /// Get a product by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get(&self, product_id: i64) -> Result<Option<Product>, DatabaseError> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_product(&r)).transpose()
    }

    /// Whether a product with this id exists
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn exists(&self, product_id: i64) -> Result<bool, DatabaseError> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    /// List products, optionally filtered by category and featured flag
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(
        &self,
        filter: &ProductFilter,
        page: Page,
    ) -> Result<Vec<Product>, DatabaseError> {
        let mut query: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE 1 = 1"));

        if let Some(category) = &filter.category {
            query.push(" AND category = ").push_bind(category.clone());
        }
        if let Some(featured) = filter.featured {
            query.push(" AND is_featured = ").push_bind(featured);
        }

        query
            .push(" ORDER BY id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.skip);

        let rows = query.build().fetch_all(&self.pool).await?;
        rows.iter().map(row_to_product).collect()
    }

    /// Apply a partial update; only provided fields change
    ///
    /// Returns `None` when the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update(
        &self,
        product_id: i64,
        request: &UpdateProductRequest,
    ) -> Result<Option<Product>, DatabaseError> {
        let Some(existing) = self.get(product_id).await? else {
            return Ok(None);
        };

        let title = request.title.as_ref().unwrap_or(&existing.title);
        let description = request.description.clone().unwrap_or(existing.description);
        let price = request.price.unwrap_or(existing.price);
        let category = request.category.clone().unwrap_or(existing.category);
        let image_url = request.image_url.clone().unwrap_or(existing.image_url);
        let additional_images = request
            .additional_images
            .clone()
            .unwrap_or(existing.additional_images);
        let features = request.features.clone().unwrap_or(existing.features);
        let is_featured = request.is_featured.unwrap_or(existing.is_featured);
        let is_available = request.is_available.unwrap_or(existing.is_available);

        let result = sqlx::query(
            r"
            UPDATE products SET
                title = $1, description = $2, price = $3, category = $4, image_url = $5,
                additional_images = $6, features = $7, is_featured = $8, is_available = $9,
                updated_at = $10
            WHERE id = $11
            ",
        )
        .bind(title)
        .bind(&description)
        .bind(price)
        .bind(&category)
        .bind(&image_url)
        .bind(&additional_images)
        .bind(&features)
        .bind(is_featured)
        .bind(is_available)
        .bind(Utc::now().to_rfc3339())
        .bind(product_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(product_id).await
    }

    /// Delete a product; orders referencing it keep a NULL `product_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete(&self, product_id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_product(row: &SqliteRow) -> Result<Product, DatabaseError> {
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Product {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        category: row.try_get("category")?,
        image_url: row.try_get("image_url")?,
        additional_images: row.try_get("additional_images")?,
        features: row.try_get("features")?,
        is_featured: row.try_get("is_featured")?,
        is_available: row.try_get("is_available")?,
        created_at: parse_timestamp("created_at", &created_at)?,
        updated_at: parse_timestamp("updated_at", &updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    fn lamp(category: &str, featured: bool) -> CreateProductRequest {
        CreateProductRequest {
            title: "Walnut lamp".into(),
            description: Some("Hand turned".into()),
            price: 120.0,
            category: Some(category.into()),
            image_url: None,
            additional_images: None,
            features: Some(r#"["walnut","brass"]"#.into()),
            is_featured: featured,
            is_available: true,
        }
    }

    #[tokio::test]
    async fn test_create_and_filter_products() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let products = db.products();

        products.create(&lamp("lighting", true)).await.unwrap();
        products.create(&lamp("lighting", false)).await.unwrap();
        products.create(&lamp("furniture", false)).await.unwrap();

        let all = products
            .list(&ProductFilter::default(), Page::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 3);

        let lighting = ProductFilter {
            category: Some("lighting".into()),
            featured: None,
        };
        assert_eq!(
            products.list(&lighting, Page::default()).await.unwrap().len(),
            2
        );

        let featured = ProductFilter {
            category: None,
            featured: Some(true),
        };
        let listed = products.list(&featured, Page::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].is_featured);

        let paged = products
            .list(&ProductFilter::default(), Page::new(Some(1), Some(1)))
            .await
            .unwrap();
        assert_eq!(paged.len(), 1);
        assert_eq!(paged[0].id, all[1].id);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let products = db.products();
        let created = products.create(&lamp("lighting", false)).await.unwrap();

        let update = UpdateProductRequest {
            price: Some(99.5),
            ..UpdateProductRequest::default()
        };
        let updated = products.update(created.id, &update).await.unwrap().unwrap();

        assert!((updated.price - 99.5).abs() < f64::EPSILON);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.description, created.description);
        assert!(updated.updated_at >= created.updated_at);

        assert!(products.update(9999, &update).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_explicit_null_clears_nullable_fields() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let products = db.products();
        let created = products.create(&lamp("lighting", false)).await.unwrap();
        assert!(created.features.is_some());

        let update: UpdateProductRequest =
            serde_json::from_str(r#"{"features": null, "category": null}"#).unwrap();
        let updated = products.update(created.id, &update).await.unwrap().unwrap();

        assert_eq!(updated.features, None);
        assert_eq!(updated.category, None);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.title, created.title);
    }

    #[tokio::test]
    async fn test_delete_product() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let products = db.products();
        let created = products.create(&lamp("lighting", false)).await.unwrap();

        assert!(products.delete(created.id).await.unwrap());
        assert!(!products.delete(created.id).await.unwrap());
        assert!(products.get(created.id).await.unwrap().is_none());
    }
}
