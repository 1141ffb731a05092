//! Book Model
//!
//! The catalog is managed elsewhere; this service reads stock/price and
//! decrements stock when orders are created.

use serde::{Deserialize, Serialize};

/// Book entity (catalog row)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    /// Catalog unit price
    pub price: f64,
    /// On-hand stock, decremented by order creation
    pub quantity: i64,
    pub image_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Stock and price snapshot read during order creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BookStock {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub quantity: i64,
}
