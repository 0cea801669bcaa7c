//! Collection repository.

use sqlx::PgPool;

use storefront_core::{CollectionId, ProductId};

use super::RepositoryError;
use crate::models::CollectionWithCount;
use crate::pagination::PageParams;

/// Fields for creating or fully replacing a collection.
#[derive(Debug, Clone)]
pub struct CollectionDraft {
    pub title: String,
    pub featured_product_id: Option<ProductId>,
}

const COLLECTION_WITH_COUNT: &str = "\
    SELECT c.id, c.title, c.featured_product_id,
           (SELECT COUNT(*) FROM store.product p WHERE p.collection_id = c.id) AS products_count
    FROM store.collection c";

/// Repository for collection database operations.
pub struct CollectionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CollectionRepository<'a> {
    /// Create a new collection repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List collections with their product counts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(
        &self,
        page: &PageParams,
    ) -> Result<(Vec<CollectionWithCount>, i64), RepositoryError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM store.collection")
            .fetch_one(self.pool)
            .await?;

        let collections = sqlx::query_as::<_, CollectionWithCount>(&format!(
            "{COLLECTION_WITH_COUNT} ORDER BY c.id LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok((collections, total))
    }

    /// Get a collection by ID, with its product count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        id: CollectionId,
    ) -> Result<Option<CollectionWithCount>, RepositoryError> {
        let collection = sqlx::query_as::<_, CollectionWithCount>(&format!(
            "{COLLECTION_WITH_COUNT} WHERE c.id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(collection)
    }

    /// Create a new collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the featured product does not
    /// exist. Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        draft: &CollectionDraft,
    ) -> Result<CollectionWithCount, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO store.collection (title, featured_product_id)
             VALUES ($1, $2)
             RETURNING id",
        )
        .bind(&draft.title)
        .bind(draft.featured_product_id.map(|p| p.as_i32()))
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_foreign_key(e, "featured product does not exist"))?;

        self.get(CollectionId::new(id))
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Replace a collection's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the collection does not exist.
    /// Returns `RepositoryError::Conflict` if the featured product does not
    /// exist. Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: CollectionId,
        draft: &CollectionDraft,
    ) -> Result<CollectionWithCount, RepositoryError> {
        let result = sqlx::query(
            "UPDATE store.collection SET title = $1, featured_product_id = $2 WHERE id = $3",
        )
        .bind(&draft.title)
        .bind(draft.featured_product_id.map(|p| p.as_i32()))
        .bind(id.as_i32())
        .execute(self.pool)
        .await
        .map_err(|e| RepositoryError::from_foreign_key(e, "featured product does not exist"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete a collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the collection still owns
    /// products. Returns `RepositoryError::NotFound` if it does not exist.
    pub async fn delete(&self, id: CollectionId) -> Result<(), RepositoryError> {
        let owned: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM store.product WHERE collection_id = $1")
                .bind(id.as_i32())
                .fetch_one(self.pool)
                .await?;

        if owned > 0 {
            return Err(RepositoryError::Conflict(
                "collection still contains products".to_owned(),
            ));
        }

        let result = sqlx::query("DELETE FROM store.collection WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_foreign_key(e, "collection still contains products")
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
