//! Catalog request/response types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{
    CollectionId, ProductId, ReviewId, price_with_tax, validate_unit_price,
};

use crate::db::collections::CollectionDraft;
use crate::db::products::ProductDraft;
use crate::db::reviews::ReviewDraft;
use crate::error::AppError;
use crate::models::{CollectionWithCount, Product, Review};

/// A collection as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionDto {
    pub id: CollectionId,
    pub title: String,
    pub featured_product_id: Option<ProductId>,
    pub products_count: i64,
}

impl From<CollectionWithCount> for CollectionDto {
    fn from(row: CollectionWithCount) -> Self {
        Self {
            id: row.id,
            title: row.title,
            featured_product_id: row.featured_product_id,
            products_count: row.products_count,
        }
    }
}

/// Payload for creating or replacing a collection.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionRequest {
    pub title: String,
    #[serde(default)]
    pub featured_product_id: Option<ProductId>,
}

impl CollectionRequest {
    /// Validate the payload into a draft.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an empty title.
    pub fn into_draft(self) -> Result<CollectionDraft, AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title must not be empty".to_owned()));
        }
        Ok(CollectionDraft {
            title: self.title,
            featured_product_id: self.featured_product_id,
        })
    }
}

/// A product as returned by the API.
///
/// `price_with_tax` is derived from `unit_price` at serialization time.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDto {
    pub id: ProductId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub unit_price: Decimal,
    pub price_with_tax: Decimal,
    pub inventory: i32,
    pub collection_id: CollectionId,
}

impl From<Product> for ProductDto {
    fn from(row: Product) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            description: row.description,
            unit_price: row.unit_price,
            price_with_tax: price_with_tax(row.unit_price),
            inventory: row.inventory,
            collection_id: row.collection_id,
        }
    }
}

/// Payload for creating or replacing a product.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRequest {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    pub unit_price: Decimal,
    #[serde(default)]
    pub inventory: i32,
    pub collection_id: CollectionId,
}

impl ProductRequest {
    /// Validate the payload into a draft.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an empty title, a negative price,
    /// or negative inventory.
    pub fn into_draft(self) -> Result<ProductDraft, AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title must not be empty".to_owned()));
        }
        if !validate_unit_price(self.unit_price) {
            return Err(AppError::Validation(
                "unit_price must not be negative".to_owned(),
            ));
        }
        if self.inventory < 0 {
            return Err(AppError::Validation(
                "inventory must not be negative".to_owned(),
            ));
        }
        Ok(ProductDraft {
            title: self.title,
            slug: self.slug,
            description: self.description,
            unit_price: self.unit_price,
            inventory: self.inventory,
            collection_id: self.collection_id,
        })
    }
}

/// A review as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewDto {
    pub id: ReviewId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewDto {
    fn from(row: Review) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

/// Payload for creating or replacing a review.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub name: String,
    pub description: String,
}

impl ReviewRequest {
    /// Validate the payload into a draft.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an empty reviewer name.
    pub fn into_draft(self) -> Result<ReviewDraft, AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_owned()));
        }
        Ok(ReviewDraft {
            name: self.name,
            description: self.description,
        })
    }
}
