//! Order placement.
//!
//! Turns a cart into an order as a single all-or-nothing unit of work:
//! resolve the customer, create the order, snapshot every cart line at the
//! product's current unit price, and delete the cart. If any step fails the
//! transaction rolls back and nothing is visible to the caller.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use thiserror::Error;
use tracing::instrument;

use storefront_core::{CartId, OrderId, ProductId, UserId};

use crate::db::{RepositoryError, customers};
use crate::models::{CartLine, Order, OrderItem};

/// Errors from order placement.
#[derive(Debug, Error)]
pub enum OrderPlacementError {
    /// No cart exists with the given identifier.
    #[error("no cart with the given id exists")]
    CartNotFound,

    /// The cart exists but contains no items.
    #[error("the cart is empty")]
    EmptyCart,

    /// A repository call failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// A direct database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A freshly placed order together with its items.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// One order line to be written, captured from a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineSnapshot {
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Build the order lines for a cart's contents, snapshotting each product's
/// unit price as it is right now. The snapshot is never recomputed later.
#[must_use]
pub fn snapshot_lines(lines: &[CartLine]) -> Vec<OrderLineSnapshot> {
    lines
        .iter()
        .map(|line| OrderLineSnapshot {
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price: line.product_unit_price,
        })
        .collect()
}

/// Place an order from the given cart for the given caller.
///
/// Preconditions (checked before any mutation): the cart must exist and
/// must contain at least one item.
///
/// Two concurrent placements of the same cart serialize on the cart row:
/// the loser of the final `DELETE` observes zero affected rows and rolls
/// back with `CartNotFound`.
///
/// # Errors
///
/// Returns `OrderPlacementError::CartNotFound` or `EmptyCart` when the
/// preconditions fail, or a database error (after rollback) otherwise.
#[instrument(skip(pool), fields(%user_id, %cart_id))]
pub async fn place_order(
    pool: &PgPool,
    user_id: UserId,
    cart_id: CartId,
) -> Result<PlacedOrder, OrderPlacementError> {
    let mut tx = pool.begin().await?;

    let cart_exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM store.cart WHERE id = $1)")
            .bind(cart_id)
            .fetch_one(&mut *tx)
            .await?;
    if !cart_exists {
        return Err(OrderPlacementError::CartNotFound);
    }

    let lines = sqlx::query_as::<_, CartLine>(
        "SELECT ci.id, ci.quantity,
                p.id AS product_id, p.title AS product_title, p.slug AS product_slug,
                p.description AS product_description, p.unit_price AS product_unit_price,
                p.inventory AS product_inventory, p.collection_id AS product_collection_id
         FROM store.cart_item ci
         JOIN store.product p ON p.id = ci.product_id
         WHERE ci.cart_id = $1
         ORDER BY ci.id",
    )
    .bind(cart_id)
    .fetch_all(&mut *tx)
    .await?;
    if lines.is_empty() {
        return Err(OrderPlacementError::EmptyCart);
    }

    let customer = customers::get_or_create(&mut tx, user_id).await?;

    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO store.orders (customer_id)
         VALUES ($1)
         RETURNING id, customer_id, payment_status, placed_at",
    )
    .bind(customer.id.as_i32())
    .fetch_one(&mut *tx)
    .await?;

    let snapshots = snapshot_lines(&lines);
    insert_order_items(&mut tx, order.id, &snapshots).await?;

    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, product_id, quantity, unit_price
         FROM store.order_item
         WHERE order_id = $1
         ORDER BY id",
    )
    .bind(order.id.as_i32())
    .fetch_all(&mut *tx)
    .await?;

    let deleted = sqlx::query("DELETE FROM store.cart WHERE id = $1")
        .bind(cart_id)
        .execute(&mut *tx)
        .await?;
    if deleted.rows_affected() == 0 {
        // A concurrent placement consumed the cart first.
        return Err(OrderPlacementError::CartNotFound);
    }

    tx.commit().await?;

    tracing::info!(
        order_id = %order.id,
        customer_id = %order.customer_id,
        line_count = items.len(),
        "order placed"
    );

    Ok(PlacedOrder { order, items })
}

/// Bulk-insert the snapshotted order lines.
async fn insert_order_items(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    order_id: OrderId,
    snapshots: &[OrderLineSnapshot],
) -> Result<(), sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(
        "INSERT INTO store.order_item (order_id, product_id, quantity, unit_price) ",
    );
    qb.push_values(snapshots, |mut row, snapshot| {
        row.push_bind(order_id.as_i32())
            .push_bind(snapshot.product_id.as_i32())
            .push_bind(snapshot.quantity)
            .push_bind(snapshot.unit_price);
    });
    qb.build().execute(&mut **tx).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use storefront_core::{CartItemId, CollectionId};

    fn line(item_id: i32, product_id: i32, unit_price: &str, quantity: i32) -> CartLine {
        CartLine {
            id: CartItemId::new(item_id),
            quantity,
            product_id: ProductId::new(product_id),
            product_title: format!("product {product_id}"),
            product_slug: format!("product-{product_id}"),
            product_description: None,
            product_unit_price: Decimal::from_str(unit_price).expect("valid decimal"),
            product_inventory: 100,
            product_collection_id: CollectionId::new(1),
        }
    }

    #[test]
    fn test_snapshot_copies_current_price_and_quantity() {
        let lines = vec![line(1, 10, "10.00", 2), line(2, 20, "5.00", 1)];

        let snapshots = snapshot_lines(&lines);

        assert_eq!(
            snapshots,
            vec![
                OrderLineSnapshot {
                    product_id: ProductId::new(10),
                    quantity: 2,
                    unit_price: Decimal::from_str("10.00").expect("valid decimal"),
                },
                OrderLineSnapshot {
                    product_id: ProductId::new(20),
                    quantity: 1,
                    unit_price: Decimal::from_str("5.00").expect("valid decimal"),
                },
            ]
        );
    }

    #[test]
    fn test_snapshot_is_one_line_per_cart_item() {
        let lines: Vec<CartLine> = (1..=7).map(|i| line(i, i * 100, "1.50", i)).collect();
        assert_eq!(snapshot_lines(&lines).len(), lines.len());
    }

    #[test]
    fn test_snapshot_of_empty_cart_is_empty() {
        assert!(snapshot_lines(&[]).is_empty());
    }
}
