//! # Validation Module
//!
//! Boundary validation for Verdant POS.
//!
//! ## Validation Strategy
//! ```text
//! Layer 1: HTTP boundary (serde)    - type/shape validation
//! Layer 2: THIS MODULE              - business rule validation
//! Layer 3: Database (SQLite)        - NOT NULL / CHECK constraints
//! ```
//!
//! Untyped request bodies are deserialized into the typed entities of
//! [`crate::types`] and then run through these checks before any
//! business logic or storage call sees them.

use crate::error::{ValidationError, ValidationResult};
use crate::types::{NewProduct, SaleDraft, ShopSettings};

/// Longest accepted product or shop name.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name: non-empty after trimming, bounded length.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates the shop name on a settings update.
pub fn validate_shop_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "shop_name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "shop_name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Trims an optional text field, mapping empty strings to `None`.
///
/// Customer fields arrive as empty strings from blank form inputs;
/// storage and receipts treat those as absent.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in paise: zero is allowed (free items), negative is not.
pub fn validate_price_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::NegativeAmount {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a line quantity: must be at least 1.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a non-negative monetary amount under the given field name.
pub fn validate_non_negative(field: &str, paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::NegativeAmount {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates boundary input for a new catalog product.
pub fn validate_new_product(input: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&input.name)?;
    validate_price_paise(input.price_paise)?;
    Ok(())
}

/// Validates a full settings replacement. Only the shop name is required;
/// every other field accepts the empty string as "unset".
pub fn validate_settings(settings: &ShopSettings) -> ValidationResult<()> {
    validate_shop_name(&settings.shop_name)
}

/// Validates a sale draft before it is persisted.
///
/// Drafts arrive either from the in-process billing engine (already
/// well-formed) or straight from a client; both pass through here so a
/// malformed payload never reaches the ledger.
pub fn validate_sale_draft(draft: &SaleDraft) -> ValidationResult<()> {
    if draft.items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    for item in &draft.items {
        validate_product_name(&item.name)?;
        validate_quantity(item.quantity)?;
        validate_non_negative("unit price", item.unit_price_paise)?;
        validate_non_negative("item discount", item.discount_paise)?;
    }

    validate_non_negative("total amount", draft.total_amount_paise)?;
    validate_non_negative("discount", draft.discount_paise)?;
    validate_non_negative("final amount", draft.final_amount_paise)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SaleItem;

    fn draft_with_items(items: Vec<SaleItem>) -> SaleDraft {
        SaleDraft {
            customer_name: None,
            customer_phone: None,
            customer_address: None,
            total_amount_paise: 30000,
            discount_paise: 0,
            final_amount_paise: 30000,
            items,
        }
    }

    fn item() -> SaleItem {
        SaleItem {
            product_id: 1,
            name: "Aloe Vera".to_string(),
            unit_price_paise: 15000,
            quantity: 2,
            discount_paise: 0,
            line_total_paise: 30000,
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Aloe Vera").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_price_paise() {
        assert!(validate_price_paise(0).is_ok()); // free item
        assert!(validate_price_paise(15000).is_ok());
        assert!(validate_price_paise(-1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(None), None);
        assert_eq!(normalize_optional(Some("".to_string())), None);
        assert_eq!(normalize_optional(Some("  ".to_string())), None);
        assert_eq!(
            normalize_optional(Some("  Rani ".to_string())),
            Some("Rani".to_string())
        );
    }

    #[test]
    fn test_validate_sale_draft_rejects_empty_items() {
        let draft = draft_with_items(vec![]);
        assert!(validate_sale_draft(&draft).is_err());
    }

    #[test]
    fn test_validate_sale_draft_rejects_bad_quantity() {
        let mut bad = item();
        bad.quantity = 0;
        assert!(validate_sale_draft(&draft_with_items(vec![bad])).is_err());
    }

    #[test]
    fn test_validate_sale_draft_accepts_well_formed() {
        assert!(validate_sale_draft(&draft_with_items(vec![item()])).is_ok());
    }

    #[test]
    fn test_validate_settings_requires_shop_name() {
        let mut settings = crate::types::ShopSettings::with_name("My Nursery");
        assert!(validate_settings(&settings).is_ok());

        settings.shop_name = " ".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
