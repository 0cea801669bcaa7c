//! Review route handlers, nested under products.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use storefront_core::{ProductId, ReviewId};

use crate::db::{ProductRepository, ReviewRepository};
use crate::dto::{ReviewDto, ReviewRequest};
use crate::error::{AppError, Result};
use crate::pagination::{Page, PageParams};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products/{product_id}/reviews",
            get(list_reviews).post(create_review),
        )
        .route(
            "/products/{product_id}/reviews/{review_id}",
            get(get_review).put(update_review).delete(delete_review),
        )
}

/// Reject requests against a product that does not exist.
async fn ensure_product(state: &AppState, product_id: ProductId) -> Result<()> {
    if ProductRepository::new(state.pool()).exists(product_id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!(
            "no product with id {product_id}"
        )))
    }
}

async fn list_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
    Query(page): Query<PageParams>,
) -> Result<Json<Page<ReviewDto>>> {
    ensure_product(&state, product_id).await?;

    let (reviews, total) = ReviewRepository::new(state.pool())
        .list_for_product(product_id, &page)
        .await?;

    let items = reviews.into_iter().map(ReviewDto::from).collect();
    Ok(Json(Page::new(items, &page, total)))
}

async fn get_review(
    State(state): State<AppState>,
    Path((product_id, review_id)): Path<(ProductId, ReviewId)>,
) -> Result<Json<ReviewDto>> {
    let review = ReviewRepository::new(state.pool())
        .get(product_id, review_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no review with id {review_id}")))?;

    Ok(Json(ReviewDto::from(review)))
}

async fn create_review(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
    Json(request): Json<ReviewRequest>,
) -> Result<(StatusCode, Json<ReviewDto>)> {
    ensure_product(&state, product_id).await?;
    let draft = request.into_draft()?;

    let review = ReviewRepository::new(state.pool())
        .create(product_id, &draft)
        .await?;
    Ok((StatusCode::CREATED, Json(ReviewDto::from(review))))
}

async fn update_review(
    State(state): State<AppState>,
    Path((product_id, review_id)): Path<(ProductId, ReviewId)>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ReviewDto>> {
    let draft = request.into_draft()?;

    let review = ReviewRepository::new(state.pool())
        .update(product_id, review_id, &draft)
        .await?;
    Ok(Json(ReviewDto::from(review)))
}

async fn delete_review(
    State(state): State<AppState>,
    Path((product_id, review_id)): Path<(ProductId, ReviewId)>,
) -> Result<StatusCode> {
    ReviewRepository::new(state.pool())
        .delete(product_id, review_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
