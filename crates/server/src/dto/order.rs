//! Order request/response types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{CartId, CustomerId, OrderId, OrderItemId, PaymentStatus, ProductId};

use crate::models::{Order, OrderItem};
use crate::services::orders::PlacedOrder;

/// An order line as returned by the API.
///
/// `unit_price` is the historical snapshot captured at placement time.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemDto {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl From<OrderItem> for OrderItemDto {
    fn from(row: OrderItem) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            quantity: row.quantity,
            unit_price: row.unit_price,
        }
    }
}

/// An order as returned by the API, with its lines.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDto {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub payment_status: PaymentStatus,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<OrderItemDto>,
}

impl OrderDto {
    /// Assemble an order response from its row and items.
    #[must_use]
    pub fn assemble(order: Order, items: Vec<OrderItem>) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            payment_status: order.payment_status,
            placed_at: order.placed_at,
            items: items.into_iter().map(OrderItemDto::from).collect(),
        }
    }
}

impl From<PlacedOrder> for OrderDto {
    fn from(placed: PlacedOrder) -> Self {
        Self::assemble(placed.order, placed.items)
    }
}

/// Payload for placing an order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub cart_id: CartId,
}

/// Payload for updating an order (admin operation). Only the payment
/// status is mutable after placement.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderRequest {
    pub payment_status: PaymentStatus,
}
