//! Order route handlers.
//!
//! Listing and detail are scoped: administrators see every order, a
//! customer only their own. A non-owner asking for someone else's order
//! gets 404, not 403, so order ids are not probeable.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use storefront_core::OrderId;

use crate::db::{CustomerRepository, OrderRepository};
use crate::dto::{CreateOrderRequest, OrderDto, UpdateOrderRequest};
use crate::error::{AppError, Result};
use crate::middleware::Identity;
use crate::models::Order;
use crate::pagination::{Page, PageParams};
use crate::policy::{Action, authorize};
use crate::services::orders::place_order;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route(
            "/orders/{id}",
            get(get_order).patch(update_order).delete(delete_order),
        )
}

/// Attach each order's items to build full responses.
async fn assemble_all(repo: &OrderRepository<'_>, orders: Vec<Order>) -> Result<Vec<OrderDto>> {
    let mut dtos = Vec::with_capacity(orders.len());
    for order in orders {
        let items = repo.items(order.id).await?;
        dtos.push(OrderDto::assemble(order, items));
    }
    Ok(dtos)
}

async fn list_orders(
    State(state): State<AppState>,
    identity: Identity,
    Query(page): Query<PageParams>,
) -> Result<Json<Page<OrderDto>>> {
    authorize(&identity, Action::ViewOrders)?;

    let repo = OrderRepository::new(state.pool());
    let (orders, total) = if identity.is_admin() {
        repo.list_all(&page).await?
    } else {
        let customer = CustomerRepository::new(state.pool())
            .resolve(identity.user_id)
            .await?;
        repo.list_for_customer(customer.id, &page).await?
    };

    let items = assemble_all(&repo, orders).await?;
    Ok(Json(Page::new(items, &page, total)))
}

async fn get_order(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderDto>> {
    authorize(&identity, Action::ViewOrders)?;

    let repo = OrderRepository::new(state.pool());
    let order = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no order with id {id}")))?;

    if !identity.is_admin() {
        let customer = CustomerRepository::new(state.pool())
            .resolve(identity.user_id)
            .await?;
        if order.customer_id != customer.id {
            return Err(AppError::NotFound(format!("no order with id {id}")));
        }
    }

    let items = repo.items(order.id).await?;
    Ok(Json(OrderDto::assemble(order, items)))
}

async fn create_order(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderDto>)> {
    authorize(&identity, Action::PlaceOrder)?;

    let placed = place_order(state.pool(), identity.user_id, request.cart_id).await?;
    Ok((StatusCode::CREATED, Json(OrderDto::from(placed))))
}

async fn update_order(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<OrderId>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<Json<OrderDto>> {
    authorize(&identity, Action::EditOrders)?;

    let repo = OrderRepository::new(state.pool());
    let order = repo.update_payment_status(id, request.payment_status).await?;
    let items = repo.items(order.id).await?;
    Ok(Json(OrderDto::assemble(order, items)))
}

async fn delete_order(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<OrderId>,
) -> Result<StatusCode> {
    authorize(&identity, Action::EditOrders)?;

    OrderRepository::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
