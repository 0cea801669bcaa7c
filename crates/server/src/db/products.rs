//! Product repository.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use storefront_core::{CollectionId, ProductId};

use super::RepositoryError;
use crate::models::Product;
use crate::pagination::PageParams;

const PRODUCT_COLUMNS: &str = "id, title, slug, description, unit_price, inventory, collection_id";

/// Fields for creating or fully replacing a product.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub unit_price: Decimal,
    pub inventory: i32,
    pub collection_id: CollectionId,
}

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductOrdering {
    #[default]
    Id,
    UnitPriceAsc,
    UnitPriceDesc,
}

impl ProductOrdering {
    /// The ORDER BY clause for this ordering. Static strings only; never
    /// interpolate client input here.
    #[must_use]
    pub const fn order_clause(self) -> &'static str {
        match self {
            Self::Id => " ORDER BY id",
            Self::UnitPriceAsc => " ORDER BY unit_price, id",
            Self::UnitPriceDesc => " ORDER BY unit_price DESC, id",
        }
    }
}

/// Filters for product listings.
#[derive(Debug, Clone, Default)]
pub struct ProductListFilter {
    pub collection_id: Option<CollectionId>,
    pub search: Option<String>,
    pub ordering: ProductOrdering,
}

/// Escape LIKE metacharacters in a user-supplied search term.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &ProductListFilter) {
    qb.push(" WHERE TRUE");
    if let Some(collection_id) = filter.collection_id {
        qb.push(" AND collection_id = ");
        qb.push_bind(collection_id.as_i32());
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(search));
        qb.push(" AND (title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR description ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products matching the filter, with the total match count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(
        &self,
        filter: &ProductListFilter,
        page: &PageParams,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM store.product");
        push_filters(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(self.pool)
            .await?;

        let mut qb =
            QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM store.product"));
        push_filters(&mut qb, filter);
        qb.push(filter.ordering.order_clause());
        qb.push(" LIMIT ");
        qb.push_bind(page.limit());
        qb.push(" OFFSET ");
        qb.push_bind(page.offset());

        let products = qb
            .build_query_as::<Product>()
            .fetch_all(self.pool)
            .await?;

        Ok((products, total))
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM store.product WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the collection does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO store.product (title, slug, description, unit_price, inventory, collection_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&draft.title)
        .bind(&draft.slug)
        .bind(&draft.description)
        .bind(draft.unit_price)
        .bind(draft.inventory)
        .bind(draft.collection_id.as_i32())
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_foreign_key(e, "collection does not exist"))?;

        Ok(product)
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Conflict` if the collection does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE store.product
             SET title = $1, slug = $2, description = $3, unit_price = $4,
                 inventory = $5, collection_id = $6
             WHERE id = $7
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&draft.title)
        .bind(&draft.slug)
        .bind(&draft.description)
        .bind(draft.unit_price)
        .bind(draft.inventory)
        .bind(draft.collection_id.as_i32())
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_foreign_key(e, "collection does not exist"))?;

        product.ok_or(RepositoryError::NotFound)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if any order item references the
    /// product. Returns `RepositoryError::NotFound` if it does not exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let referenced: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM store.order_item WHERE product_id = $1",
        )
        .bind(id.as_i32())
        .fetch_one(self.pool)
        .await?;

        if referenced > 0 {
            return Err(RepositoryError::Conflict(
                "product is referenced by an order item".to_owned(),
            ));
        }

        let result = sqlx::query("DELETE FROM store.product WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_foreign_key(e, "product is referenced by an order item")
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Check whether a product exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM store.product WHERE id = $1)")
                .bind(id.as_i32())
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }
}
