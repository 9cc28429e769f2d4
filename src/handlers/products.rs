use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::{AppError, AppResult},
    extract::{JsonBody, ProductId},
    models::{NewProduct, Product, ProductPatch},
    validation::{self, PRODUCT_UPDATE},
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(State(state): State<AppState>) -> (StatusCode, Json<Vec<Product>>) {
    let products = state.store.read().await.list_all();
    debug!(count = products.len(), "Listed products");
    (StatusCode::OK, Json(products))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewProduct>,
) -> AppResult<(StatusCode, Json<Vec<Product>>)> {
    let products = state.store.write().await.create(payload)?;

    if let Some(product) = products.last() {
        info!(id = product.id, title = %product.title, "Created product");
    }

    Ok((StatusCode::CREATED, Json(products)))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = state.store.read().await.find_by_id(id)?.clone();
    debug!(id, "Fetched product");
    Ok((StatusCode::OK, Json(product)))
}

// ── Update ────────────────────────────────────────────────────────────────────

/// Partial update. The id is checked before the body so an unknown id is a
/// 404 even when the payload is missing, unparsable or invalid; an invalid
/// payload never touches the stored record.
pub async fn update_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
    body: Result<JsonBody<Value>, AppError>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let mut store = state.store.write().await;
    store.find_by_id(id)?;

    let JsonBody(payload) = body?;

    if let Err(err) = validation::validate(PRODUCT_UPDATE, &payload) {
        debug!(id, field = %err.path, "Rejected product update");
        return Err(err.into());
    }
    let patch: ProductPatch = serde_json::from_value(payload)?;
    let product = store.update_by_id(id, patch)?;

    info!(id, "Updated product");
    Ok((StatusCode::OK, Json(product)))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = state.store.write().await.delete_by_id(id)?;
    info!(id, "Deleted product");
    Ok((StatusCode::OK, Json(product)))
}
