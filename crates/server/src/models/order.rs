//! Order rows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use storefront_core::{CustomerId, OrderId, OrderItemId, PaymentStatus, ProductId};

/// A durable record of a completed purchase intent.
#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub payment_status: PaymentStatus,
    pub placed_at: DateTime<Utc>,
}

/// A line in an order.
///
/// `unit_price` is the price snapshot captured at placement time and is never
/// recomputed from the product afterwards.
#[derive(Debug, Clone, FromRow)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
}
