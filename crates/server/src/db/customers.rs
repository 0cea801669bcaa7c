//! Customer directory.
//!
//! Maps the external user identity to a customer row, created lazily on
//! first access. Concurrent first accesses are resolved by the unique
//! index on `customer.user_id`, not by any in-process lock.

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};

use storefront_core::{CustomerId, Membership, UserId};

use super::RepositoryError;
use crate::models::Customer;
use crate::pagination::PageParams;

const CUSTOMER_COLUMNS: &str = "id, user_id, phone, birth_date, membership";

/// Editable customer profile fields.
#[derive(Debug, Clone)]
pub struct CustomerProfile {
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub membership: Membership,
}

/// Idempotent get-or-create keyed on the external user identity.
///
/// Takes a connection rather than a pool so order placement can run it
/// inside its transaction.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a query fails, or
/// `RepositoryError::DataCorruption` if the row vanishes between the
/// conditional insert and the re-select.
pub async fn get_or_create(
    conn: &mut PgConnection,
    user_id: UserId,
) -> Result<Customer, RepositoryError> {
    sqlx::query("INSERT INTO store.customer (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
        .bind(user_id.as_i64())
        .execute(&mut *conn)
        .await?;

    let customer = sqlx::query_as::<_, Customer>(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM store.customer WHERE user_id = $1"
    ))
    .bind(user_id.as_i64())
    .fetch_optional(conn)
    .await?;

    customer.ok_or_else(|| {
        RepositoryError::DataCorruption(format!("customer row missing for user {user_id}"))
    })
}

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List customers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self, page: &PageParams) -> Result<(Vec<Customer>, i64), RepositoryError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM store.customer")
            .fetch_one(self.pool)
            .await?;

        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM store.customer ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok((customers, total))
    }

    /// Get a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM store.customer WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(customer)
    }

    /// Resolve the customer for an external user identity, creating the row
    /// with the default membership tier if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn resolve(&self, user_id: UserId) -> Result<Customer, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        get_or_create(&mut conn, user_id).await
    }

    /// Create a customer for a given user identity (admin operation).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a customer already exists for
    /// the user. Returns `RepositoryError::Database` for other errors.
    pub async fn create(
        &self,
        user_id: UserId,
        profile: &CustomerProfile,
    ) -> Result<Customer, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "INSERT INTO store.customer (user_id, phone, birth_date, membership)
             VALUES ($1, $2, $3, $4)
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(user_id.as_i64())
        .bind(&profile.phone)
        .bind(profile.birth_date)
        .bind(profile.membership)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_unique(e, "customer already exists for this user"))?;

        Ok(customer)
    }

    /// Replace a customer's profile fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: CustomerId,
        profile: &CustomerProfile,
    ) -> Result<Customer, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "UPDATE store.customer SET phone = $1, birth_date = $2, membership = $3
             WHERE id = $4
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(&profile.phone)
        .bind(profile.birth_date)
        .bind(profile.membership)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        customer.ok_or(RepositoryError::NotFound)
    }

    /// Delete a customer (admin operation).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the customer has orders.
    /// Returns `RepositoryError::NotFound` if it does not exist.
    pub async fn delete(&self, id: CustomerId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM store.customer WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await
            .map_err(|e| RepositoryError::from_foreign_key(e, "customer has orders"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
