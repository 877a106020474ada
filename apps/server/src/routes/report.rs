//! # Reporting Routes
//!
//! Income summary tiles and the chart series behind the history screen.
//! The aggregation itself is pure (`verdant_core::report`); these
//! handlers just fetch the ledger and pass the clock in.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use verdant_core::report::{chart_series, income_totals, ChartBucket, ChartRange, IncomeTotals};

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/reports/income` — the five overlapping summary sums
/// (today / 7 days / 1 month / 1 year / all time).
pub async fn income(State(state): State<AppState>) -> Result<Json<IncomeTotals>, ApiError> {
    debug!("income");

    let sales = state.db.sales().list_newest_first().await?;
    Ok(Json(income_totals(&sales, Utc::now())))
}

#[derive(Debug, Deserialize)]
pub struct ChartParams {
    #[serde(default)]
    pub range: Option<String>,
}

/// `GET /api/reports/chart?range=today|weekly|monthly|yearly|all`
///
/// Buckets ordered oldest to newest, each carrying the sum of
/// `final_amount` for its interval.
pub async fn chart(
    State(state): State<AppState>,
    Query(params): Query<ChartParams>,
) -> Result<Json<Vec<ChartBucket>>, ApiError> {
    let range: ChartRange = params.range.as_deref().unwrap_or("weekly").parse()?;
    debug!(?range, "chart");

    let sales = state.db.sales().list_newest_first().await?;
    Ok(Json(chart_series(&sales, range, Utc::now())))
}
