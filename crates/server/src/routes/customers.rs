//! Customer route handlers.
//!
//! The collection endpoints are administrative; `/customers/me` is the
//! "current customer" endpoint that lazily creates the caller's record.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use storefront_core::CustomerId;

use crate::db::CustomerRepository;
use crate::dto::{CustomerCreateRequest, CustomerDto, CustomerUpdateRequest};
use crate::error::{AppError, Result};
use crate::middleware::Identity;
use crate::pagination::{Page, PageParams};
use crate::policy::{Action, authorize};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/me", get(current_customer).put(update_current_customer))
        .route(
            "/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

async fn list_customers(
    State(state): State<AppState>,
    identity: Identity,
    Query(page): Query<PageParams>,
) -> Result<Json<Page<CustomerDto>>> {
    authorize(&identity, Action::ManageCustomers)?;

    let (customers, total) = CustomerRepository::new(state.pool()).list(&page).await?;

    let items = customers.into_iter().map(CustomerDto::from).collect();
    Ok(Json(Page::new(items, &page, total)))
}

async fn get_customer(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<CustomerId>,
) -> Result<Json<CustomerDto>> {
    authorize(&identity, Action::ManageCustomers)?;

    let customer = CustomerRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no customer with id {id}")))?;

    Ok(Json(CustomerDto::from(customer)))
}

async fn create_customer(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<CustomerCreateRequest>,
) -> Result<(StatusCode, Json<CustomerDto>)> {
    authorize(&identity, Action::ManageCustomers)?;

    let (user_id, profile) = request.into_parts();
    let customer = CustomerRepository::new(state.pool())
        .create(user_id, &profile)
        .await?;
    Ok((StatusCode::CREATED, Json(CustomerDto::from(customer))))
}

async fn update_customer(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<CustomerId>,
    Json(request): Json<CustomerUpdateRequest>,
) -> Result<Json<CustomerDto>> {
    authorize(&identity, Action::ManageCustomers)?;

    let customer = CustomerRepository::new(state.pool())
        .update(id, &request.into())
        .await?;
    Ok(Json(CustomerDto::from(customer)))
}

async fn delete_customer(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<CustomerId>,
) -> Result<StatusCode> {
    authorize(&identity, Action::ManageCustomers)?;

    CustomerRepository::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Resolve (or lazily create) the caller's own customer record.
async fn current_customer(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<CustomerDto>> {
    authorize(&identity, Action::ViewOwnCustomer)?;

    let customer = CustomerRepository::new(state.pool())
        .resolve(identity.user_id)
        .await?;
    Ok(Json(CustomerDto::from(customer)))
}

async fn update_current_customer(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<CustomerUpdateRequest>,
) -> Result<Json<CustomerDto>> {
    authorize(&identity, Action::ViewOwnCustomer)?;

    let repo = CustomerRepository::new(state.pool());
    let customer = repo.resolve(identity.user_id).await?;
    let updated = repo.update(customer.id, &request.into()).await?;
    Ok(Json(CustomerDto::from(updated)))
}
