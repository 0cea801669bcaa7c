//! Cart rows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use storefront_core::{CartId, CartItemId, CollectionId, ProductId};

/// A transient cart. Deleted at successful order placement.
#[derive(Debug, Clone, FromRow)]
pub struct Cart {
    pub id: CartId,
    pub created_at: DateTime<Utc>,
}

/// A cart line joined with its product, as read for display and for order
/// placement. The `product_*` columns carry the product's current state,
/// including the unit price that order placement snapshots.
#[derive(Debug, Clone, FromRow)]
pub struct CartLine {
    pub id: CartItemId,
    pub quantity: i32,
    pub product_id: ProductId,
    pub product_title: String,
    pub product_slug: String,
    pub product_description: Option<String>,
    pub product_unit_price: Decimal,
    pub product_inventory: i32,
    pub product_collection_id: CollectionId,
}
