//! Review repository. Reviews are always scoped to a product.

use sqlx::PgPool;

use storefront_core::{ProductId, ReviewId};

use super::RepositoryError;
use crate::models::Review;
use crate::pagination::PageParams;

const REVIEW_COLUMNS: &str = "id, product_id, name, description, created_at";

/// Fields for creating or replacing a review.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub name: String,
    pub description: String,
}

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List reviews for a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_product(
        &self,
        product_id: ProductId,
        page: &PageParams,
    ) -> Result<(Vec<Review>, i64), RepositoryError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM store.review WHERE product_id = $1")
                .bind(product_id.as_i32())
                .fetch_one(self.pool)
                .await?;

        let reviews = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM store.review
             WHERE product_id = $1
             ORDER BY created_at, id
             LIMIT $2 OFFSET $3"
        ))
        .bind(product_id.as_i32())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok((reviews, total))
    }

    /// Get a review by ID within a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        product_id: ProductId,
        id: ReviewId,
    ) -> Result<Option<Review>, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM store.review WHERE id = $1 AND product_id = $2"
        ))
        .bind(id.as_i32())
        .bind(product_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(review)
    }

    /// Create a review for a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        product_id: ProductId,
        draft: &ReviewDraft,
    ) -> Result<Review, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(&format!(
            "INSERT INTO store.review (product_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(product_id.as_i32())
        .bind(&draft.name)
        .bind(&draft.description)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_foreign_key(e, "product does not exist"))?;

        Ok(review)
    }

    /// Replace a review's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the review does not exist in
    /// the product. Returns `RepositoryError::Database` for other errors.
    pub async fn update(
        &self,
        product_id: ProductId,
        id: ReviewId,
        draft: &ReviewDraft,
    ) -> Result<Review, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(&format!(
            "UPDATE store.review SET name = $1, description = $2
             WHERE id = $3 AND product_id = $4
             RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(id.as_i32())
        .bind(product_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        review.ok_or(RepositoryError::NotFound)
    }

    /// Delete a review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the review does not exist in
    /// the product. Returns `RepositoryError::Database` for other errors.
    pub async fn delete(&self, product_id: ProductId, id: ReviewId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM store.review WHERE id = $1 AND product_id = $2")
            .bind(id.as_i32())
            .bind(product_id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
