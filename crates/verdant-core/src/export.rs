//! # CSV Export
//!
//! Renders a range of the sales ledger as a CSV table for download.
//!
//! The table carries a fixed column order and spreadsheet-friendly
//! formatting: phone numbers get a leading `'` marker so spreadsheet
//! tools keep the digit string instead of truncating it to a number, and
//! monetary cells are plain decimals without a currency symbol.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::Sale;

/// Fixed header row of the export table.
const CSV_HEADER: &str = "Bill No,Date,Customer Name,Phone,Address,Total,Discount,Final,Items";

// =============================================================================
// Export Range
// =============================================================================

/// Cutoff selector for the export: sales with `created_at >= cutoff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ExportRange {
    OneDay,
    OneMonth,
    SixMonths,
    All,
}

impl ExportRange {
    /// The keyword form used in the API and in filenames.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportRange::OneDay => "1day",
            ExportRange::OneMonth => "1month",
            ExportRange::SixMonths => "6months",
            ExportRange::All => "all",
        }
    }

    /// The inclusive lower bound, or `None` for the full ledger.
    fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            ExportRange::OneDay => Some(now - Duration::days(1)),
            ExportRange::OneMonth => now.checked_sub_months(Months::new(1)),
            ExportRange::SixMonths => now.checked_sub_months(Months::new(6)),
            ExportRange::All => None,
        }
    }
}

impl FromStr for ExportRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1day" => Ok(ExportRange::OneDay),
            "1month" => Ok(ExportRange::OneMonth),
            "6months" => Ok(ExportRange::SixMonths),
            "all" => Ok(ExportRange::All),
            other => Err(ValidationError::InvalidFormat {
                field: "range".to_string(),
                reason: format!("unknown export range '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Quotes a CSV field when it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders the sales in range as CSV text.
///
/// Fails with [`CoreError::ExportEmpty`] when no sale falls inside the
/// range — the caller surfaces that to the user and produces no file.
pub fn export_csv(sales: &[Sale], range: ExportRange, now: DateTime<Utc>) -> CoreResult<String> {
    let cutoff = range.cutoff(now);
    let in_range: Vec<&Sale> = sales
        .iter()
        .filter(|s| cutoff.map_or(true, |c| s.created_at >= c))
        .collect();

    if in_range.is_empty() {
        return Err(CoreError::ExportEmpty {
            range: range.as_str().to_string(),
        });
    }

    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for sale in in_range {
        let items = sale
            .items
            .iter()
            .map(|i| format!("{}({})", i.name, i.quantity))
            .collect::<Vec<_>>()
            .join("; ");

        let row = [
            sale.id.to_string(),
            sale.created_at.format("%Y-%m-%d %H:%M").to_string(),
            sale.customer_name.clone().unwrap_or_else(|| "Walk-in".to_string()),
            // Leading marker keeps spreadsheet tools from truncating the
            // digit string to a number.
            sale.customer_phone
                .as_deref()
                .map(|p| format!("'{}", p))
                .unwrap_or_default(),
            sale.customer_address.clone().unwrap_or_else(|| "N/A".to_string()),
            sale.total_amount().plain(),
            sale.discount().plain(),
            sale.final_amount().plain(),
            items,
        ]
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",");

        out.push_str(&row);
        out.push('\n');
    }

    Ok(out)
}

/// Builds the download filename: `<shop>_Sales_<range>_<ISO-date>.csv`,
/// with whitespace in the shop name collapsed to underscores.
pub fn export_filename(shop_name: &str, range: ExportRange, now: DateTime<Utc>) -> String {
    let shop = shop_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!(
        "{}_Sales_{}_{}.csv",
        shop,
        range.as_str(),
        now.format("%Y-%m-%d")
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
