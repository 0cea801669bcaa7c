//! Cart route handlers.
//!
//! Carts are anonymous: no identity is required to create or mutate one.
//! Possession of the cart's UUID is the capability.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
};

use storefront_core::{CartId, CartItemId};

use crate::db::{CartRepository, ProductRepository};
use crate::dto::{AddCartItemRequest, CartDto, CartItemDto, UpdateCartItemRequest};
use crate::error::{AppError, Result};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/carts", post(create_cart))
        .route("/carts/{id}", get(get_cart).delete(delete_cart))
        .route("/carts/{id}/items", get(list_items).post(add_item))
        .route(
            "/carts/{id}/items/{item_id}",
            patch(update_item).delete(delete_item),
        )
}

/// Reject requests against a cart that does not exist.
async fn ensure_cart(state: &AppState, cart_id: CartId) -> Result<()> {
    if CartRepository::new(state.pool()).exists(cart_id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("no cart with id {cart_id}")))
    }
}

async fn create_cart(State(state): State<AppState>) -> Result<(StatusCode, Json<CartDto>)> {
    let cart = CartRepository::new(state.pool()).create().await?;
    let dto = CartDto::assemble(cart, Vec::new());
    Ok((StatusCode::CREATED, Json(dto)))
}

async fn get_cart(
    State(state): State<AppState>,
    Path(id): Path<CartId>,
) -> Result<Json<CartDto>> {
    let repo = CartRepository::new(state.pool());
    let cart = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no cart with id {id}")))?;
    let lines = repo.lines(id).await?;

    Ok(Json(CartDto::assemble(cart, lines)))
}

async fn delete_cart(State(state): State<AppState>, Path(id): Path<CartId>) -> Result<StatusCode> {
    CartRepository::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_items(
    State(state): State<AppState>,
    Path(id): Path<CartId>,
) -> Result<Json<Vec<CartItemDto>>> {
    ensure_cart(&state, id).await?;

    let lines = CartRepository::new(state.pool()).lines(id).await?;
    Ok(Json(lines.into_iter().map(CartItemDto::from).collect()))
}

async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<CartId>,
    Json(request): Json<AddCartItemRequest>,
) -> Result<(StatusCode, Json<CartItemDto>)> {
    ensure_cart(&state, id).await?;
    request.validate()?;

    if !ProductRepository::new(state.pool())
        .exists(request.product_id)
        .await?
    {
        return Err(AppError::Validation(format!(
            "no product with id {}",
            request.product_id
        )));
    }

    let line = CartRepository::new(state.pool())
        .add_item(id, request.product_id, request.quantity)
        .await?;
    Ok((StatusCode::CREATED, Json(CartItemDto::from(line))))
}

async fn update_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(CartId, CartItemId)>,
    Json(request): Json<UpdateCartItemRequest>,
) -> Result<Json<CartItemDto>> {
    request.validate()?;

    let line = CartRepository::new(state.pool())
        .update_item_quantity(id, item_id, request.quantity)
        .await?;
    Ok(Json(CartItemDto::from(line)))
}

async fn delete_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(CartId, CartItemId)>,
) -> Result<StatusCode> {
    CartRepository::new(state.pool()).delete_item(id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
