//! # Sales Reporting
//!
//! Time-bucketed aggregation of the sales ledger for chart series and
//! summary tiles, plus the history-screen filter.
//!
//! ## Bucketing Overview
//! ```text
//! today    24 buckets   one per hour of the last 24 hours
//! weekly    7 buckets   one per calendar day, last 7 days
//! monthly   6 buckets   rolling 5-day windows back 30 days
//! yearly   12 buckets   one per calendar month, last 12 months
//! all       N buckets   one per distinct calendar year in the data
//! ```
//! Buckets are ordered oldest to newest and each reports the sum of
//! `final_amount` over the matching sales. All calendar arithmetic is in
//! UTC, and "now" is always a caller-supplied argument — these functions
//! never read the clock themselves.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Sale;

// =============================================================================
// Chart Range
// =============================================================================

/// Chart granularity selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ChartRange {
    Today,
    Weekly,
    Monthly,
    Yearly,
    All,
}

impl FromStr for ChartRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(ChartRange::Today),
            "weekly" => Ok(ChartRange::Weekly),
            "monthly" => Ok(ChartRange::Monthly),
            "yearly" => Ok(ChartRange::Yearly),
            "all" => Ok(ChartRange::All),
            other => Err(ValidationError::InvalidFormat {
                field: "range".to_string(),
                reason: format!("unknown chart range '{}'", other),
            }),
        }
    }
}

/// One aggregation interval of a chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChartBucket {
    pub label: String,
    pub total_paise: i64,
}

// =============================================================================
// Chart Series
// =============================================================================

/// Buckets all-time sales' `final_amount` at the requested granularity.
pub fn chart_series(sales: &[Sale], range: ChartRange, now: DateTime<Utc>) -> Vec<ChartBucket> {
    match range {
        ChartRange::Today => hourly_series(sales, now),
        ChartRange::Weekly => daily_series(sales, now),
        ChartRange::Monthly => five_day_series(sales, now),
        ChartRange::Yearly => monthly_series(sales, now),
        ChartRange::All => yearly_series(sales, now),
    }
}

fn sum_where<F: Fn(&Sale) -> bool>(sales: &[Sale], pred: F) -> Money {
    sales
        .iter()
        .filter(|s| pred(s))
        .map(Sale::final_amount)
        .sum()
}

/// 24 buckets, one per hour of the last 24 hours, matched on
/// (calendar day, hour-of-day).
fn hourly_series(sales: &[Sale], now: DateTime<Utc>) -> Vec<ChartBucket> {
    (0..24)
        .rev()
        .map(|offset| {
            let slot = now - Duration::hours(offset);
            let (day, hour) = (slot.date_naive(), slot.hour());
            let total = sum_where(sales, |s| {
                s.created_at.date_naive() == day && s.created_at.hour() == hour
            });
            ChartBucket {
                label: slot.format("%H:00").to_string(),
                total_paise: total.paise(),
            }
        })
        .collect()
}

/// 7 buckets, one per calendar day of the last 7 days.
fn daily_series(sales: &[Sale], now: DateTime<Utc>) -> Vec<ChartBucket> {
    (0..7)
        .rev()
        .map(|offset| {
            let day = (now - Duration::days(offset)).date_naive();
            let total = sum_where(sales, |s| s.created_at.date_naive() == day);
            ChartBucket {
                label: day.format("%d %b").to_string(),
                total_paise: total.paise(),
            }
        })
        .collect()
}

/// 6 buckets of rolling 5-day windows going back 30 days. A sale falls in
/// a window when `start < created_at <= end`.
fn five_day_series(sales: &[Sale], now: DateTime<Utc>) -> Vec<ChartBucket> {
    (0..6)
        .rev()
        .map(|idx| {
            let end = now - Duration::days(idx * 5);
            let start = end - Duration::days(5);
            let total = sum_where(sales, |s| s.created_at > start && s.created_at <= end);
            ChartBucket {
                label: end.format("%d %b").to_string(),
                total_paise: total.paise(),
            }
        })
        .collect()
}

/// 12 buckets, one per calendar month of the last 12 months, matched on
/// (month, year).
fn monthly_series(sales: &[Sale], now: DateTime<Utc>) -> Vec<ChartBucket> {
    (0..12)
        .rev()
        .map(|offset| {
            let slot = now.checked_sub_months(Months::new(offset)).unwrap_or(now);
            let (month, year) = (slot.month(), slot.year());
            let total = sum_where(sales, |s| {
                s.created_at.month() == month && s.created_at.year() == year
            });
            ChartBucket {
                label: slot.format("%b %y").to_string(),
                total_paise: total.paise(),
            }
        })
        .collect()
}

/// One bucket per distinct calendar year present in the data; the current
/// year with a zero total when there is none.
fn yearly_series(sales: &[Sale], now: DateTime<Utc>) -> Vec<ChartBucket> {
    let mut years: BTreeSet<i32> = sales.iter().map(|s| s.created_at.year()).collect();
    if years.is_empty() {
        years.insert(now.year());
    }

    years
        .into_iter()
        .map(|year| {
            let total = sum_where(sales, |s| s.created_at.year() == year);
            ChartBucket {
                label: year.to_string(),
                total_paise: total.paise(),
            }
        })
        .collect()
}

// =============================================================================
// Income Totals
// =============================================================================

/// The five summary-tile sums.
///
/// Each total is computed independently over `created_at >= cutoff` — a
/// sale made today is counted in every one of them. These are not
/// mutually exclusive buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IncomeTotals {
    pub today_paise: i64,
    pub week_paise: i64,
    pub month_paise: i64,
    pub year_paise: i64,
    pub all_time_paise: i64,
}

/// Sums `final_amount` over sales newer than each tile's cutoff.
pub fn income_totals(sales: &[Sale], now: DateTime<Utc>) -> IncomeTotals {
    let start_of_today = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let week_ago = now - Duration::days(7);
    let month_ago = now.checked_sub_months(Months::new(1)).unwrap_or(now);
    let year_ago = now.checked_sub_months(Months::new(12)).unwrap_or(now);

    IncomeTotals {
        today_paise: sum_where(sales, |s| s.created_at >= start_of_today).paise(),
        week_paise: sum_where(sales, |s| s.created_at >= week_ago).paise(),
        month_paise: sum_where(sales, |s| s.created_at >= month_ago).paise(),
        year_paise: sum_where(sales, |s| s.created_at >= year_ago).paise(),
        all_time_paise: sum_where(sales, |_| true).paise(),
    }
}

// =============================================================================
// History Filter
// =============================================================================

/// Predicate for the sales-history screen: free-text AND date range.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct SalesFilter {
    /// Case-insensitive substring over customer name and phone.
    #[serde(default)]
    pub q: Option<String>,
    /// Inclusive lower bound (start of day).
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound (extends to 23:59:59).
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub end: Option<NaiveDate>,
}

impl SalesFilter {
    fn matches(&self, sale: &Sale) -> bool {
        if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let q = q.to_lowercase();
            let name_hit = sale
                .customer_name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&q));
            let phone_hit = sale
                .customer_phone
                .as_deref()
                .is_some_and(|p| p.to_lowercase().contains(&q));
            if !name_hit && !phone_hit {
                return false;
            }
        }

        let day = sale.created_at.date_naive();
        if let Some(start) = self.start {
            if day < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            // Comparing on calendar dates makes the end bound inclusive
            // through 23:59:59.
            if day > end {
                return false;
            }
        }

        true
    }
}

/// Retains the sales matching the filter, preserving order.
pub fn filter_sales(sales: Vec<Sale>, filter: &SalesFilter) -> Vec<Sale> {
    let mut sales = sales;
    sales.retain(|s| filter.matches(s));
    sales
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sale_at(id: i64, created_at: DateTime<Utc>, final_paise: i64) -> Sale {
        Sale {
            id,
            customer_name: None,
            customer_phone: None,
            customer_address: None,
            total_amount_paise: final_paise,
            discount_paise: 0,
            final_amount_paise: final_paise,
            items: vec![],
            created_at,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_chart_range_from_str() {
        assert_eq!("weekly".parse::<ChartRange>().unwrap(), ChartRange::Weekly);
        assert!("fortnight".parse::<ChartRange>().is_err());
    }

    #[test]
    fn test_weekly_excludes_old_sales() {
        // One ₹100 sale today, one ₹50 sale 10 days ago.
        let sales = vec![
            sale_at(1, now(), 10000),
            sale_at(2, now() - Duration::days(10), 5000),
        ];

        let series = chart_series(&sales, ChartRange::Weekly, now());
        assert_eq!(series.len(), 7);

        let sum: i64 = series.iter().map(|b| b.total_paise).sum();
        assert_eq!(sum, 10000);
        // Today is the newest (last) bucket.
        assert_eq!(series[6].total_paise, 10000);
    }

    #[test]
    fn test_today_series_has_24_hourly_buckets() {
        let sales = vec![
            sale_at(1, now(), 10000),
            sale_at(2, now() - Duration::hours(3), 2000),
            sale_at(3, now() - Duration::hours(30), 7000), // outside the window
        ];

        let series = chart_series(&sales, ChartRange::Today, now());
        assert_eq!(series.len(), 24);
        assert_eq!(series[23].label, "14:00");
        assert_eq!(series[23].total_paise, 10000);
        assert_eq!(series[20].total_paise, 2000);

        let sum: i64 = series.iter().map(|b| b.total_paise).sum();
        assert_eq!(sum, 12000);
    }

    #[test]
    fn test_monthly_windows_are_half_open() {
        // Exactly on a window boundary: 5 days back is the end of the
        // second-to-last window (start < t <= end) and excluded from the
        // last one.
        let boundary = now() - Duration::days(5);
        let sales = vec![sale_at(1, boundary, 4000)];

        let series = chart_series(&sales, ChartRange::Monthly, now());
        assert_eq!(series.len(), 6);
        assert_eq!(series[4].total_paise, 4000);
        assert_eq!(series[5].total_paise, 0);
    }

    #[test]
    fn test_yearly_series_matches_month_and_year() {
        let sales = vec![
            sale_at(1, now(), 10000),
            sale_at(2, now() - Duration::days(365), 5000), // same month last year
        ];

        let series = chart_series(&sales, ChartRange::Yearly, now());
        assert_eq!(series.len(), 12);
        assert_eq!(series[11].total_paise, 10000);
        let sum: i64 = series.iter().map(|b| b.total_paise).sum();
        assert_eq!(sum, 10000);
    }

    #[test]
    fn test_all_series_one_bucket_per_year() {
        let sales = vec![
            sale_at(1, Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(), 1000),
            sale_at(2, Utc.with_ymd_and_hms(2026, 1, 2, 10, 0, 0).unwrap(), 2000),
            sale_at(3, Utc.with_ymd_and_hms(2026, 2, 2, 10, 0, 0).unwrap(), 3000),
        ];

        let series = chart_series(&sales, ChartRange::All, now());
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "2024");
        assert_eq!(series[0].total_paise, 1000);
        assert_eq!(series[1].label, "2026");
        assert_eq!(series[1].total_paise, 5000);
    }

    #[test]
    fn test_all_series_defaults_to_current_year_when_empty() {
        let series = chart_series(&[], ChartRange::All, now());
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "2026");
        assert_eq!(series[0].total_paise, 0);
    }

    #[test]
    fn test_income_totals_overlap() {
        let sales = vec![
            sale_at(1, now(), 10000),                       // today
            sale_at(2, now() - Duration::days(3), 5000),    // this week
            sale_at(3, now() - Duration::days(20), 2000),   // this month
            sale_at(4, now() - Duration::days(200), 1000),  // this year
            sale_at(5, now() - Duration::days(2000), 500),  // older
        ];

        let totals = income_totals(&sales, now());
        assert_eq!(totals.today_paise, 10000);
        assert_eq!(totals.week_paise, 15000);
        assert_eq!(totals.month_paise, 17000);
        assert_eq!(totals.year_paise, 18000);
        assert_eq!(totals.all_time_paise, 18500);
    }

    #[test]
    fn test_filter_by_query_case_insensitive() {
        let mut a = sale_at(1, now(), 1000);
        a.customer_name = Some("Rani Kumar".to_string());
        let mut b = sale_at(2, now(), 2000);
        b.customer_phone = Some("9876543210".to_string());
        let c = sale_at(3, now(), 3000);

        let filter = SalesFilter {
            q: Some("rani".to_string()),
            ..Default::default()
        };
        let hits = filter_sales(vec![a.clone(), b.clone(), c.clone()], &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        let filter = SalesFilter {
            q: Some("6543".to_string()),
            ..Default::default()
        };
        let hits = filter_sales(vec![a, b, c], &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn test_filter_date_range_is_inclusive() {
        let sales = vec![
            sale_at(1, Utc.with_ymd_and_hms(2026, 3, 10, 23, 59, 59).unwrap(), 1000),
            sale_at(2, Utc.with_ymd_and_hms(2026, 3, 11, 0, 0, 0).unwrap(), 2000),
        ];

        let filter = SalesFilter {
            q: None,
            start: Some(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()),
            end: Some(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()),
        };
        let hits = filter_sales(sales, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn test_filter_unbounded_sides() {
        let sales = vec![sale_at(1, now(), 1000)];
        let hits = filter_sales(sales, &SalesFilter::default());
        assert_eq!(hits.len(), 1);
    }
}
