//! # Catalog Routes
//!
//! Product listing, creation and deletion. Products are immutable once
//! created — there is deliberately no update route.

use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;

use verdant_core::validation::validate_new_product;
use verdant_core::{NewProduct, Product};

use crate::error::ApiError;
use crate::routes::{CreatedResponse, SuccessResponse};
use crate::state::AppState;

/// `GET /api/products` — all products, ordered by name ascending.
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    debug!("list_products");
    let products = state.db.products().list().await?;
    Ok(Json(products))
}

/// `POST /api/products` — add a product, returning its assigned id.
///
/// Rejects an empty name or negative price before anything hits storage.
pub async fn add_product(
    State(state): State<AppState>,
    Json(input): Json<NewProduct>,
) -> Result<Json<CreatedResponse>, ApiError> {
    debug!(name = %input.name, "add_product");

    validate_new_product(&input)?;
    let id = state.db.products().insert(&input).await?;

    Ok(Json(CreatedResponse { id }))
}

/// `DELETE /api/products/{id}` — idempotent delete.
///
/// Deleting an id that doesn't exist is a no-op, and historical sales
/// keep their own snapshots, so this never cascades.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, ApiError> {
    debug!(id, "delete_product");

    state.db.products().delete(id).await?;
    Ok(Json(SuccessResponse::ok()))
}
