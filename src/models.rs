// ABOUTME: Domain models for the catalog, orders, custom requests, page content and administrator
// ABOUTME: Includes request payloads for create/update operations and status enums with DB mappings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Records returned by the database managers and the request bodies the
//! routes accept. Response bodies are the records themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// The single privileged account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Administrator {
    /// Row identifier
    pub id: i64,
    /// Unique login email
    pub email: String,
    /// bcrypt hash, never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    pub image_url: Option<String>,
    /// JSON-encoded list of image URLs
    pub additional_images: Option<String>,
    /// JSON-encoded list of feature strings
    pub features: Option<String>,
    pub is_featured: bool,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a product
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub additional_images: Option<String>,
    pub features: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

/// Request body for updating a product
///
/// Absent fields are left unchanged. On nullable columns an explicit `null`
/// clears the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[allow(clippy::option_option)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub additional_images: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub features: Option<Option<String>>,
    pub is_featured: Option<bool>,
    pub is_available: Option<bool>,
}

/// Catalog listing filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub featured: Option<bool>,
}

/// Offset pagination shared by list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: crate::constants::limits::DEFAULT_SKIP,
            limit: crate::constants::limits::DEFAULT_LIMIT,
        }
    }
}

impl Page {
    /// Build a page from optional query values, clamping to sane bounds
    #[must_use]
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Self {
        use crate::constants::limits::{DEFAULT_LIMIT, DEFAULT_SKIP, MAX_LIMIT};
        Self {
            skip: skip.unwrap_or(DEFAULT_SKIP).max(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(0, MAX_LIMIT),
        }
    }
}

/// Kind of order placed by a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Straight purchase of a catalog item
    Purchase,
    /// Purchase with requested modifications
    Customization,
}

impl OrderType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Customization => "customization",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "customization" => Self::Customization,
            _ => Self::Purchase,
        }
    }
}

/// Fulfilment state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "processing" => Self::Processing,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

/// Customer order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub product_id: Option<i64>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub order_type: OrderType,
    pub customization_details: Option<String>,
    pub status: OrderStatus,
    pub total_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for placing an order
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub product_id: Option<i64>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub order_type: OrderType,
    pub customization_details: Option<String>,
    pub total_amount: Option<f64>,
}

/// Request body for updating an order; `customization_details: null` clears it
#[derive(Debug, Clone, Default, Deserialize)]
#[allow(clippy::option_option)]
pub struct UpdateOrderRequest {
    pub status: Option<OrderStatus>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub customization_details: Option<Option<String>>,
}

/// Review state of a custom project request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Rejected,
}

impl RequestStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "rejected" => Self::Rejected,
            _ => Self::Pending,
        }
    }
}

/// Commissioned project enquiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRequest {
    pub id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub project_title: String,
    pub project_scope: String,
    pub budget_range: Option<String>,
    pub timeline: Option<String>,
    pub additional_details: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for submitting a custom request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub project_title: String,
    pub project_scope: String,
    pub budget_range: Option<String>,
    pub timeline: Option<String>,
    pub additional_details: Option<String>,
}

/// Request body for moving a custom request through review
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCustomRequest {
    pub status: Option<RequestStatus>,
}

/// Editable block of site copy addressed by key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub id: i64,
    /// Stable key such as `home_hero` or `about_bio`
    pub page_key: String,
    /// `text`, `html` or `json`
    pub content_type: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating page content
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePageContentRequest {
    pub page_key: String,
    pub content_type: String,
    pub content: String,
}

/// Request body for replacing page content
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePageContentRequest {
    pub content: String,
}

const fn default_true() -> bool {
    true
}

/// Distinguish an explicit `null` (`Some(None)`) from an absent field (`None`, via `serde(default)`)
#[allow(clippy::option_option)]
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Minimal structural email check: one `@`, non-empty local part, dotted domain
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split('.')
            .filter(|part| !part.is_empty())
            .count()
            >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_through_db_strings() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), status);
        }
        assert_eq!(RequestStatus::parse("in_progress"), RequestStatus::InProgress);
        assert_eq!(RequestStatus::parse("garbage"), RequestStatus::Pending);
    }

    #[test]
    fn test_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&RequestStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: OrderType = serde_json::from_str("\"customization\"").unwrap();
        assert_eq!(parsed, OrderType::Customization);
    }

    #[test]
    fn test_page_clamps_values() {
        assert_eq!(Page::new(None, None), Page::default());
        let page = Page::new(Some(-5), Some(5000));
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, 1000);
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("buyer@example.com"));
        assert!(is_valid_email("first.last+tag@shop.co.uk"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user name@example.com"));
    }

    #[test]
    fn test_administrator_hides_password_hash() {
        let admin = Administrator {
            id: 1,
            email: "admin@example.com".into(),
            password_hash: "$2b$12$secret".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&admin).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(json.contains("admin@example.com"));
    }
}
