//! # Sales Ledger Routes
//!
//! Listing/filtering the ledger, committing externally-built drafts,
//! receipt payloads, and the CSV download.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use verdant_core::export::{export_csv, export_filename, ExportRange};
use verdant_core::receipt::{normalize_phone, render_receipt, share_links};
use verdant_core::report::{filter_sales, SalesFilter};
use verdant_core::validation::{normalize_optional, validate_sale_draft};
use verdant_core::{Sale, SaleDraft};

use crate::error::ApiError;
use crate::routes::CreatedResponse;
use crate::state::AppState;

// =============================================================================
// Listing & Commit
// =============================================================================

/// `GET /api/sales?q=&start=&end=` — the ledger, newest first.
///
/// All three filter parameters are optional; with none given this is the
/// plain full listing.
pub async fn list_sales(
    State(state): State<AppState>,
    Query(filter): Query<SalesFilter>,
) -> Result<Json<Vec<Sale>>, ApiError> {
    debug!(?filter, "list_sales");

    let sales = state.db.sales().list_newest_first().await?;
    Ok(Json(filter_sales(sales, &filter)))
}

/// `POST /api/sales` — commit a client-built draft.
///
/// The boundary validation rejects malformed drafts (no items, negative
/// amounts, zero quantities) before the ledger sees them. Blank customer
/// strings are stored as absent.
pub async fn commit_sale(
    State(state): State<AppState>,
    Json(mut draft): Json<SaleDraft>,
) -> Result<Json<CreatedResponse>, ApiError> {
    debug!(items = draft.items.len(), "commit_sale");

    draft.customer_name = normalize_optional(draft.customer_name);
    draft.customer_phone = normalize_optional(draft.customer_phone);
    draft.customer_address = normalize_optional(draft.customer_address);
    validate_sale_draft(&draft)?;

    let sale = state.db.sales().insert(&draft).await?;
    info!(sale_id = sale.id, "Sale committed via draft");

    Ok(Json(CreatedResponse { id: sale.id }))
}

// =============================================================================
// Receipt
// =============================================================================

/// Receipt payload: the formatted message body, the normalized recipient
/// number, and the delivery deep-links. Rendering to PDF/print and the
/// actual send stay on the client side.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptResponse {
    pub text: String,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub sms: Option<String>,
    pub email: String,
}

/// `GET /api/sales/{id}/receipt`
pub async fn get_receipt(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ReceiptResponse>, ApiError> {
    debug!(id, "get_receipt");

    let sale = state
        .db
        .sales()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Sale", id))?;
    let settings = state.db.settings().get_or_seed().await?;

    let text = render_receipt(&sale, &settings);
    let links = share_links(&sale, &settings, &state.config.country_code);
    let phone = sale
        .customer_phone
        .as_deref()
        .and_then(|p| normalize_phone(p, &state.config.country_code));

    Ok(Json(ReceiptResponse {
        text,
        phone,
        whatsapp: links.whatsapp,
        sms: links.sms,
        email: links.email,
    }))
}

// =============================================================================
// CSV Export
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    #[serde(default)]
    pub range: Option<String>,
}

/// `GET /api/sales/export?range=1day|1month|6months|all`
///
/// Streams back the CSV as an attachment. An empty range is surfaced as
/// a 422 with code `EXPORT_EMPTY` and no file is produced.
pub async fn export_sales(
    State(state): State<AppState>,
    Query(params): Query<ExportParams>,
) -> Result<Response, ApiError> {
    let range: ExportRange = params.range.as_deref().unwrap_or("all").parse()?;
    debug!(range = range.as_str(), "export_sales");

    let now = Utc::now();
    let sales = state.db.sales().list_newest_first().await?;
    let csv = export_csv(&sales, range, now)?;

    let settings = state.db.settings().get_or_seed().await?;
    let filename = export_filename(&settings.shop_name, range, now);

    info!(filename = %filename, rows = csv.lines().count() - 1, "CSV export");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    )
        .into_response())
}
