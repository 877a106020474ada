//! # Receipt Rendering
//!
//! Formats a committed sale into the message body shared with customers,
//! and builds the delivery deep-links (WhatsApp, SMS, email).
//!
//! Delivery itself — the messaging app, print dialog, PDF writer — is a
//! presentation concern outside this crate. The contract here is: given a
//! [`Sale`] and the current [`ShopSettings`], produce a fully-formatted
//! text payload plus the normalized recipient phone number.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Sale, ShopSettings};

/// Country code prefixed to bare 10-digit numbers.
pub const DEFAULT_COUNTRY_CODE: &str = "91";

/// Divider line used between receipt sections.
const DIVIDER: &str = "--------------------------";

// =============================================================================
// Receipt Text
// =============================================================================

/// Renders the receipt message body.
///
/// ```text
/// *My Nursery*
/// Bill No: 7
/// Date: 15/03/2026
/// Customer: Rani
/// --------------------------
/// Aloe Vera x 2 = ₹300.00
/// --------------------------
/// Subtotal: ₹300.00
/// Discount: ₹20.00
/// *Total: ₹280.00*
/// --------------------------
/// Thank you for shopping with us!
/// ```
/// The shop address and phone follow the footer when set. Asterisk
/// emphasis renders as bold in WhatsApp.
pub fn render_receipt(sale: &Sale, settings: &ShopSettings) -> String {
    let mut lines = Vec::new();

    lines.push(format!("*{}*", settings.shop_name));
    lines.push(format!("Bill No: {}", sale.id));
    lines.push(format!("Date: {}", sale.created_at.format("%d/%m/%Y")));
    lines.push(format!(
        "Customer: {}",
        sale.customer_name.as_deref().unwrap_or("N/A")
    ));
    lines.push(DIVIDER.to_string());

    for item in &sale.items {
        lines.push(format!(
            "{} x {} = {}",
            item.name,
            item.quantity,
            item.line_total()
        ));
    }

    lines.push(DIVIDER.to_string());
    lines.push(format!("Subtotal: {}", sale.total_amount()));
    lines.push(format!("Discount: {}", sale.discount()));
    lines.push(format!("*Total: {}*", sale.final_amount()));
    lines.push(DIVIDER.to_string());
    lines.push("Thank you for shopping with us!".to_string());

    if !settings.address.is_empty() {
        lines.push(settings.address.clone());
    }
    if !settings.phone.is_empty() {
        lines.push(settings.phone.clone());
    }

    lines.join("\n")
}

// =============================================================================
// Phone Normalization
// =============================================================================

/// Normalizes a raw phone string for deep-link delivery.
///
/// Strips non-digits, drops a single leading zero, and prefixes the
/// country code when a bare 10-digit number remains. Returns `None` when
/// no digits survive.
pub fn normalize_phone(raw: &str, country_code: &str) -> Option<String> {
    let mut digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return None;
    }

    if digits.starts_with('0') {
        digits.remove(0);
    }

    if digits.len() == 10 {
        Some(format!("{}{}", country_code, digits))
    } else {
        Some(digits)
    }
}

// =============================================================================
// Share Links
// =============================================================================

/// Delivery deep-links for a rendered receipt.
///
/// WhatsApp and SMS need a recipient number, so they are absent when the
/// sale has no usable customer phone; email always opens a compose window.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShareLinks {
    pub whatsapp: Option<String>,
    pub sms: Option<String>,
    pub email: String,
}

/// Builds the share deep-links for a sale.
pub fn share_links(sale: &Sale, settings: &ShopSettings, country_code: &str) -> ShareLinks {
    let body = render_receipt(sale, settings);
    let encoded = urlencoding::encode(&body).into_owned();

    let phone = sale
        .customer_phone
        .as_deref()
        .and_then(|p| normalize_phone(p, country_code));

    let subject = urlencoding::encode(&format!("Bill from {}", settings.shop_name)).into_owned();

    ShareLinks {
        whatsapp: phone
            .as_deref()
            .map(|p| format!("https://wa.me/{}?text={}", p, encoded)),
        sms: phone
            .as_deref()
            .map(|p| format!("sms:{}?body={}", p, encoded)),
        email: format!("mailto:?subject={}&body={}", subject, encoded),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
