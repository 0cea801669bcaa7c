//! Catalog rows: collections, products, reviews.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use storefront_core::{CollectionId, ProductId, ReviewId};

/// A collection together with the number of products it owns.
#[derive(Debug, Clone, FromRow)]
pub struct CollectionWithCount {
    pub id: CollectionId,
    pub title: String,
    pub featured_product_id: Option<ProductId>,
    pub products_count: i64,
}

/// A sellable product.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub unit_price: Decimal,
    pub inventory: i32,
    pub collection_id: CollectionId,
}

/// A customer review attached to a product.
#[derive(Debug, Clone, FromRow)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
