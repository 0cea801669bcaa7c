//! Cart repository.
//!
//! Cart lines are unique per (cart, product); adding a product that is
//! already in the cart merges into the existing line's quantity.

use sqlx::PgPool;

use storefront_core::{CartId, CartItemId, ProductId};

use super::RepositoryError;
use crate::models::{Cart, CartLine};

const CART_LINE_SELECT: &str = "\
    SELECT ci.id, ci.quantity,
           p.id AS product_id, p.title AS product_title, p.slug AS product_slug,
           p.description AS product_description, p.unit_price AS product_unit_price,
           p.inventory AS product_inventory, p.collection_id AS product_collection_id
    FROM store.cart_item ci
    JOIN store.product p ON p.id = ci.product_id";

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an empty cart with a fresh random ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self) -> Result<Cart, RepositoryError> {
        let cart = sqlx::query_as::<_, Cart>(
            "INSERT INTO store.cart (id) VALUES ($1) RETURNING id, created_at",
        )
        .bind(CartId::generate())
        .fetch_one(self.pool)
        .await?;

        Ok(cart)
    }

    /// Get a cart by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CartId) -> Result<Option<Cart>, RepositoryError> {
        let cart =
            sqlx::query_as::<_, Cart>("SELECT id, created_at FROM store.cart WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(cart)
    }

    /// Check whether a cart exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: CartId) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM store.cart WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// Delete a cart, cascading to its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the cart does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: CartId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM store.cart WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List a cart's lines joined with their products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines(&self, cart_id: CartId) -> Result<Vec<CartLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, CartLine>(&format!(
            "{CART_LINE_SELECT} WHERE ci.cart_id = $1 ORDER BY ci.id"
        ))
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }

    /// Get a single cart line by its item ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_line(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
    ) -> Result<Option<CartLine>, RepositoryError> {
        let line = sqlx::query_as::<_, CartLine>(&format!(
            "{CART_LINE_SELECT} WHERE ci.cart_id = $1 AND ci.id = $2"
        ))
        .bind(cart_id)
        .bind(item_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(line)
    }

    /// Add a product to a cart, merging into an existing line if present.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the cart or product vanished
    /// between validation and insert. Returns `RepositoryError::Database`
    /// for other database errors.
    pub async fn add_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartLine, RepositoryError> {
        let item_id: i32 = sqlx::query_scalar(
            "INSERT INTO store.cart_item (cart_id, product_id, quantity)
             VALUES ($1, $2, $3)
             ON CONFLICT (cart_id, product_id)
             DO UPDATE SET quantity = store.cart_item.quantity + EXCLUDED.quantity
             RETURNING id",
        )
        .bind(cart_id)
        .bind(product_id.as_i32())
        .bind(quantity)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_foreign_key(e, "cart or product does not exist"))?;

        self.get_line(cart_id, CartItemId::new(item_id))
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Set the quantity of an existing cart line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line does not exist in the
    /// cart. Returns `RepositoryError::Database` for other database errors.
    pub async fn update_item_quantity(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<CartLine, RepositoryError> {
        let result =
            sqlx::query("UPDATE store.cart_item SET quantity = $1 WHERE id = $2 AND cart_id = $3")
                .bind(quantity)
                .bind(item_id.as_i32())
                .bind(cart_id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get_line(cart_id, item_id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Remove a line from a cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line does not exist in the
    /// cart. Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_item(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM store.cart_item WHERE id = $1 AND cart_id = $2")
            .bind(item_id.as_i32())
            .bind(cart_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
