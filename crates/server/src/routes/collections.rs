//! Collection route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use storefront_core::CollectionId;

use crate::db::CollectionRepository;
use crate::dto::{CollectionDto, CollectionRequest};
use crate::error::{AppError, Result};
use crate::middleware::Identity;
use crate::pagination::{Page, PageParams};
use crate::policy::{Action, authorize};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/collections", get(list_collections).post(create_collection))
        .route(
            "/collections/{id}",
            get(get_collection)
                .put(update_collection)
                .delete(delete_collection),
        )
}

async fn list_collections(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> Result<Json<Page<CollectionDto>>> {
    let (collections, total) = CollectionRepository::new(state.pool()).list(&page).await?;

    let items = collections.into_iter().map(CollectionDto::from).collect();
    Ok(Json(Page::new(items, &page, total)))
}

async fn get_collection(
    State(state): State<AppState>,
    Path(id): Path<CollectionId>,
) -> Result<Json<CollectionDto>> {
    let collection = CollectionRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no collection with id {id}")))?;

    Ok(Json(CollectionDto::from(collection)))
}

async fn create_collection(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<CollectionRequest>,
) -> Result<(StatusCode, Json<CollectionDto>)> {
    authorize(&identity, Action::EditCatalog)?;
    let draft = request.into_draft()?;

    let collection = CollectionRepository::new(state.pool())
        .create(&draft)
        .await?;
    Ok((StatusCode::CREATED, Json(CollectionDto::from(collection))))
}

async fn update_collection(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<CollectionId>,
    Json(request): Json<CollectionRequest>,
) -> Result<Json<CollectionDto>> {
    authorize(&identity, Action::EditCatalog)?;
    let draft = request.into_draft()?;

    let collection = CollectionRepository::new(state.pool())
        .update(id, &draft)
        .await?;
    Ok(Json(CollectionDto::from(collection)))
}

async fn delete_collection(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<CollectionId>,
) -> Result<StatusCode> {
    authorize(&identity, Action::EditCatalog)?;

    CollectionRepository::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
