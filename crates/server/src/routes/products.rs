//! Product route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use storefront_core::{CollectionId, ProductId};

use crate::db::ProductRepository;
use crate::db::products::{ProductListFilter, ProductOrdering};
use crate::dto::{ProductDto, ProductRequest};
use crate::error::{AppError, Result};
use crate::middleware::Identity;
use crate::pagination::{Page, PageParams};
use crate::policy::{Action, authorize};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    collection_id: Option<i32>,
    search: Option<String>,
    ordering: Option<String>,
    page: Option<i64>,
    page_size: Option<i64>,
}

/// Parse the `ordering` query value.
fn parse_ordering(value: Option<&str>) -> Result<ProductOrdering> {
    match value {
        None => Ok(ProductOrdering::Id),
        Some("unit_price") => Ok(ProductOrdering::UnitPriceAsc),
        Some("-unit_price") => Ok(ProductOrdering::UnitPriceDesc),
        Some(other) => Err(AppError::Validation(format!(
            "unsupported ordering: {other}"
        ))),
    }
}

impl ProductListQuery {
    fn filter(&self) -> Result<ProductListFilter> {
        Ok(ProductListFilter {
            collection_id: self.collection_id.map(CollectionId::new),
            search: self.search.clone().filter(|s| !s.is_empty()),
            ordering: parse_ordering(self.ordering.as_deref())?,
        })
    }

    const fn page(&self) -> PageParams {
        PageParams {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Page<ProductDto>>> {
    let filter = query.filter()?;
    let page = query.page();

    let (products, total) = ProductRepository::new(state.pool())
        .list(&filter, &page)
        .await?;

    let items = products.into_iter().map(ProductDto::from).collect();
    Ok(Json(Page::new(items, &page, total)))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDto>> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no product with id {id}")))?;

    Ok(Json(ProductDto::from(product)))
}

async fn create_product(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ProductDto>)> {
    authorize(&identity, Action::EditCatalog)?;
    let draft = request.into_draft()?;

    let product = ProductRepository::new(state.pool()).create(&draft).await?;
    Ok((StatusCode::CREATED, Json(ProductDto::from(product))))
}

async fn update_product(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<ProductId>,
    Json(request): Json<ProductRequest>,
) -> Result<Json<ProductDto>> {
    authorize(&identity, Action::EditCatalog)?;
    let draft = request.into_draft()?;

    let product = ProductRepository::new(state.pool())
        .update(id, &draft)
        .await?;
    Ok(Json(ProductDto::from(product)))
}

async fn delete_product(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    authorize(&identity, Action::EditCatalog)?;

    ProductRepository::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
