//! # Settings Routes
//!
//! Read and replace the shop-identity singleton.

use axum::extract::State;
use axum::Json;
use tracing::debug;

use verdant_core::validation::validate_settings;
use verdant_core::ShopSettings;

use crate::error::ApiError;
use crate::routes::SuccessResponse;
use crate::state::AppState;

/// `GET /api/settings` — the singleton, seeded on first read if absent.
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<ShopSettings>, ApiError> {
    debug!("get_settings");
    let settings = state.db.settings().get_or_seed().await?;
    Ok(Json(settings))
}

/// `POST /api/settings` — replace all five fields atomically.
///
/// Only the shop name is required; the other fields accept the empty
/// string as "unset".
pub async fn update_settings(
    State(state): State<AppState>,
    Json(input): Json<ShopSettings>,
) -> Result<Json<SuccessResponse>, ApiError> {
    debug!(shop_name = %input.shop_name, "update_settings");

    validate_settings(&input)?;
    state.db.settings().update(&input).await?;

    Ok(Json(SuccessResponse::ok()))
}
