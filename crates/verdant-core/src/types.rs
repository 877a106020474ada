//! # Domain Types
//!
//! Core domain types used throughout Verdant POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌───────────────┐   ┌────────────────┐   ┌───────────────┐
//! │   Product     │   │  ShopSettings  │   │     Sale      │
//! │  ───────────  │   │  ────────────  │   │  ───────────  │
//! │  id (i64)     │   │  shop_name     │   │  id (i64)     │
//! │  name         │   │  address       │   │  customer_*   │
//! │  price_paise  │   │  phone/email   │   │  totals       │
//! │  category     │   │  gst_number    │   │  items (snap) │
//! └───────────────┘   └────────────────┘   └───────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A committed [`Sale`] owns its own copy of every line's name, price and
//! quantity. Deleting a [`Product`] never touches historical sales.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog product available for sale.
///
/// Immutable once created except by deletion; there is no update operation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier, assigned by the store on creation.
    pub id: i64,

    /// Display name shown to the operator and on receipts.
    pub name: String,

    /// Unit price in paise.
    pub price_paise: i64,

    /// Optional grouping (e.g. "Indoor", "Succulents").
    pub category: Option<String>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }
}

/// Boundary input for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub price_paise: i64,
    #[serde(default)]
    pub category: Option<String>,
}

// =============================================================================
// Shop Settings
// =============================================================================

/// The singleton shop identity record.
///
/// Exactly one instance exists (row id 1, enforced by the schema). Only
/// `shop_name` is required; the other fields treat the empty string as
/// "unset". Updates always replace all five fields together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ShopSettings {
    pub shop_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub gst_number: String,
}

impl ShopSettings {
    /// A fresh settings record carrying only the shop name.
    pub fn with_name(shop_name: impl Into<String>) -> Self {
        ShopSettings {
            shop_name: shop_name.into(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            gst_number: String::new(),
        }
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item inside a committed sale (or a draft about to commit).
///
/// Uses the snapshot pattern: product name and price are frozen at commit
/// time. `discount_paise` is per unit and defaults to zero so payloads
/// from before per-item discounts existed still deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleItem {
    /// Product this line referenced at sale time.
    pub product_id: i64,
    /// Product name at time of sale (frozen).
    pub name: String,
    /// Unit price in paise at time of sale (frozen).
    pub unit_price_paise: i64,
    /// Quantity sold.
    pub quantity: i64,
    /// Per-unit discount in paise.
    #[serde(default)]
    pub discount_paise: i64,
    /// Line total: quantity × (unit price − per-unit discount).
    pub line_total_paise: i64,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    /// Returns the per-unit discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_paise(self.discount_paise)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_paise(self.line_total_paise)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A committed bill in the append-only sales ledger.
///
/// Never updated or deleted after commit. `discount_paise` is the sum of
/// the order-level discount and all per-item discounts at commit time;
/// `final_amount_paise` is whatever the billing engine settled on (the
/// calculated total, or the operator's manual override).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    /// Unique identifier, assigned on commit, monotonically increasing.
    pub id: i64,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    /// Cart subtotal at commit time, in paise.
    pub total_amount_paise: i64,
    /// Order discount + per-item discounts at commit time, in paise.
    pub discount_paise: i64,
    /// The committed total, in paise.
    pub final_amount_paise: i64,
    /// Immutable snapshot of the cart lines.
    pub items: Vec<SaleItem>,
    /// Server-assigned commit timestamp.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_paise(self.total_amount_paise)
    }

    /// Returns the combined discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_paise(self.discount_paise)
    }

    /// Returns the final amount as Money.
    #[inline]
    pub fn final_amount(&self) -> Money {
        Money::from_paise(self.final_amount_paise)
    }
}

/// A sale ready to persist: everything except the store-assigned id and
/// timestamp.
///
/// Produced by [`crate::cart::Cart::checkout`], or deserialized directly
/// from clients that compute the draft themselves.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleDraft {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_address: Option<String>,
    pub total_amount_paise: i64,
    pub discount_paise: i64,
    pub final_amount_paise: i64,
    pub items: Vec<SaleItem>,
}

// =============================================================================
// Customer Info
// =============================================================================

/// Optional customer details captured at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_price_accessor() {
        let product = Product {
            id: 1,
            name: "Aloe Vera".to_string(),
            price_paise: 15000,
            category: Some("Succulents".to_string()),
        };
        assert_eq!(product.price(), Money::from_rupees(150));
    }

    #[test]
    fn test_settings_with_name() {
        let settings = ShopSettings::with_name("My Nursery");
        assert_eq!(settings.shop_name, "My Nursery");
        assert!(settings.address.is_empty());
        assert!(settings.gst_number.is_empty());
    }

    #[test]
    fn test_sale_item_discount_defaults_on_deserialize() {
        // Payloads from before per-item discounts existed carry no
        // discount field at all.
        let json = r#"{
            "product_id": 1,
            "name": "Aloe Vera",
            "unit_price_paise": 15000,
            "quantity": 2,
            "line_total_paise": 30000
        }"#;
        let item: SaleItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.discount_paise, 0);
        assert_eq!(item.line_total(), Money::from_paise(30000));
    }
}
