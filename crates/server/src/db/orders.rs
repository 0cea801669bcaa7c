//! Order repository (reads and admin mutations).
//!
//! Order creation is not here: it is the transactional script in
//! [`crate::services::orders`], because it spans carts, customers, and
//! order items in one unit of work.

use sqlx::PgPool;

use storefront_core::{CustomerId, OrderId, PaymentStatus};

use super::RepositoryError;
use crate::models::{Order, OrderItem};
use crate::pagination::PageParams;

const ORDER_COLUMNS: &str = "id, customer_id, payment_status, placed_at";
const ORDER_ITEM_COLUMNS: &str = "id, order_id, product_id, quantity, unit_price";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders (admin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_all(&self, page: &PageParams) -> Result<(Vec<Order>, i64), RepositoryError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM store.orders")
            .fetch_one(self.pool)
            .await?;

        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM store.orders ORDER BY placed_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok((orders, total))
    }

    /// List the orders belonging to one customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
        page: &PageParams,
    ) -> Result<(Vec<Order>, i64), RepositoryError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM store.orders WHERE customer_id = $1")
                .bind(customer_id.as_i32())
                .fetch_one(self.pool)
                .await?;

        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM store.orders
             WHERE customer_id = $1
             ORDER BY placed_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(customer_id.as_i32())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok((orders, total))
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM store.orders WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// List the items of an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItem>(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM store.order_item WHERE order_id = $1 ORDER BY id"
        ))
        .bind(order_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Set an order's payment status (admin operation).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_payment_status(
        &self,
        id: OrderId,
        payment_status: PaymentStatus,
    ) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE store.orders SET payment_status = $1 WHERE id = $2
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(payment_status)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        order.ok_or(RepositoryError::NotFound)
    }

    /// Delete an order, cascading to its items (admin operation).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM store.orders WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
