//! Database operations for the storefront `PostgreSQL`.
//!
//! ## Tables (schema `store`)
//!
//! - `collection`, `product`, `review` - Catalog store
//! - `cart`, `cart_item` - Cart store
//! - `customer` - Customer directory (lazy get-or-create by external user id)
//! - `orders`, `order_item` - Placed orders with price-snapshotted lines
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p storefront-cli -- migrate
//! ```
//!
//! Queries use the runtime sqlx API (`query_as` + `FromRow`) so the
//! workspace builds without a live database.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod carts;
pub mod collections;
pub mod customers;
pub mod orders;
pub mod products;
pub mod reviews;

pub use carts::CartRepository;
pub use collections::CollectionRepository;
pub use customers::CustomerRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use reviews::ReviewRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate cart line, referenced row).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a sqlx error, turning unique-constraint violations into
    /// `Conflict` with the given message.
    pub(crate) fn from_unique(e: sqlx::Error, conflict_msg: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict_msg.to_owned());
        }
        Self::Database(e)
    }

    /// Map a sqlx error, turning foreign-key violations into `Conflict`
    /// with the given message.
    pub(crate) fn from_foreign_key(e: sqlx::Error, conflict_msg: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_foreign_key_violation()
        {
            return Self::Conflict(conflict_msg.to_owned());
        }
        Self::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
