//! # Billing Cart
//!
//! The billing engine: a mutable cart for the current billing session.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌──────────┐     ┌──────────┐     ┌────────────┐
//! │  Empty   │────►│ Building │────►│ Committed  │
//! │          │     │          │     │  (Sale)    │
//! └──────────┘     └──────────┘     └────────────┘
//!                       │
//!                  add_product        checkout()
//!                  set_quantity       snapshots lines,
//!                  set_*_discount     caller persists,
//!                  set_manual_total   cart resets
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id` (adding the same product again
//!   increments its quantity instead of duplicating the line)
//! - Every line's quantity is ≥ 1
//! - `line_total = quantity × (unit_price − per-unit discount)`
//! - The manual total override is only valid for the exact cart state it
//!   was set against: every mutation clears it

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CustomerInfo, Product, SaleDraft, SaleItem};
use crate::validation::normalize_optional;

// =============================================================================
// Cart Line
// =============================================================================

/// One line in the billing cart.
///
/// Carries a frozen copy of the product's name and price: the cart keeps
/// billing consistently even if the catalog row is deleted mid-session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product_id: i64,
    /// Product name at time of adding (frozen).
    pub name: String,
    /// Unit price at time of adding (frozen).
    pub unit_price: Money,
    /// Quantity, always ≥ 1.
    pub quantity: i64,
    /// Per-unit discount, never negative.
    pub unit_discount: Money,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price(),
            quantity: 1,
            unit_discount: Money::zero(),
        }
    }

    /// Line total: quantity × (unit price − per-unit discount).
    pub fn line_total(&self) -> Money {
        (self.unit_price - self.unit_discount).multiply_quantity(self.quantity)
    }

    /// Gross amount before any discount: quantity × unit price.
    pub fn gross(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Discount carried by this line: quantity × per-unit discount.
    pub fn discount_total(&self) -> Money {
        self.unit_discount.multiply_quantity(self.quantity)
    }

    fn to_sale_item(&self) -> SaleItem {
        SaleItem {
            product_id: self.product_id,
            name: self.name.clone(),
            unit_price_paise: self.unit_price.paise(),
            quantity: self.quantity,
            discount_paise: self.unit_discount.paise(),
            line_total_paise: self.line_total().paise(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The billing cart for one session.
///
/// All mutating operations clear the manual total override — the override
/// is a statement about a specific cart state, not a standing instruction.
/// Operations addressing a product id that is not in the cart are silent
/// no-ops (and, not being mutations, they leave the override alone).
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    /// Ordered lines, unique by product id.
    lines: Vec<CartLine>,
    /// Order-level discount across the whole bill.
    order_discount: Money,
    /// Operator-declared final total, bypassing the calculation.
    manual_total: Option<Money>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a product to the cart.
    ///
    /// If the product is already present its quantity increments by one
    /// and the line total is recomputed with the existing per-unit
    /// discount; otherwise a new line is appended with quantity 1 and no
    /// discount.
    pub fn add_product(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine::from_product(product));
        }
        self.manual_total = None;
    }

    /// Removes the line for the given product entirely.
    ///
    /// Removing a product that is not in the cart is a no-op.
    pub fn remove(&mut self, product_id: i64) {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() != before {
            self.manual_total = None;
        }
    }

    /// Sets the quantity of a line.
    ///
    /// Quantities below 1 are silently ignored: the cart is unchanged.
    pub fn set_quantity(&mut self, product_id: i64, qty: i64) {
        if qty < 1 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = qty;
            self.manual_total = None;
        }
    }

    /// Sets the per-unit discount of a line.
    ///
    /// Negative amounts are rejected by treating them as zero.
    pub fn set_item_discount(&mut self, product_id: i64, amount: Money) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.unit_discount = amount.clamp_non_negative();
            self.manual_total = None;
        }
    }

    /// Sets the order-level discount across the whole bill.
    ///
    /// Negative amounts are rejected by treating them as zero.
    pub fn set_order_discount(&mut self, amount: Money) {
        self.order_discount = amount.clamp_non_negative();
        self.manual_total = None;
    }

    /// Declares an explicit final total, bypassing the calculation.
    ///
    /// Accepted even when inconsistent with the line items — this is the
    /// operator rounding or honouring a negotiated price. Any later cart
    /// mutation clears it.
    pub fn set_manual_total(&mut self, amount: Money) {
        self.manual_total = Some(amount);
    }

    /// Empties the cart and resets discounts and the override.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.order_discount = Money::zero();
        self.manual_total = None;
    }

    // -------------------------------------------------------------------------
    // Derived values
    // -------------------------------------------------------------------------

    /// The cart lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Subtotal: Σ quantity × unit price, before any discount.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.gross()).sum()
    }

    /// Σ quantity × per-unit discount across all lines.
    pub fn item_discount_total(&self) -> Money {
        self.lines.iter().map(|l| l.discount_total()).sum()
    }

    /// The order-level discount.
    pub fn order_discount(&self) -> Money {
        self.order_discount
    }

    /// The manual override, if one is set.
    pub fn manual_total(&self) -> Option<Money> {
        self.manual_total
    }

    /// subtotal − order discount − item discounts.
    pub fn calculated_total(&self) -> Money {
        self.subtotal() - self.order_discount - self.item_discount_total()
    }

    /// The amount the bill commits at: the manual override when set,
    /// otherwise the calculated total.
    pub fn final_total(&self) -> Money {
        self.manual_total.unwrap_or_else(|| self.calculated_total())
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Snapshots the cart into a [`SaleDraft`] ready to persist.
    ///
    /// Fails with [`CoreError::EmptyCart`] when there is nothing to bill.
    /// The draft's `discount` combines the order-level discount with the
    /// per-item discounts; `total_amount` is the undiscounted subtotal.
    /// The cart itself is untouched — the caller resets it only after the
    /// sale has actually persisted.
    pub fn checkout(&self, customer: CustomerInfo) -> CoreResult<SaleDraft> {
        if self.lines.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        Ok(SaleDraft {
            customer_name: normalize_optional(customer.name),
            customer_phone: normalize_optional(customer.phone),
            customer_address: normalize_optional(customer.address),
            total_amount_paise: self.subtotal().paise(),
            discount_paise: (self.order_discount + self.item_discount_total()).paise(),
            final_amount_paise: self.final_total().paise(),
            items: self.lines.iter().map(CartLine::to_sale_item).collect(),
        })
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for API responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal_paise: i64,
    pub item_discount_paise: i64,
    pub order_discount_paise: i64,
    pub calculated_total_paise: i64,
    pub final_total_paise: i64,
    /// Present only while an override is active.
    pub manual_total_paise: Option<i64>,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            subtotal_paise: cart.subtotal().paise(),
            item_discount_paise: cart.item_discount_total().paise(),
            order_discount_paise: cart.order_discount().paise(),
            calculated_total_paise: cart.calculated_total().paise(),
            final_total_paise: cart.final_total().paise(),
            manual_total_paise: cart.manual_total().map(|m| m.paise()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price_paise: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            price_paise,
            category: None,
        }
    }

    fn aloe_vera() -> Product {
        Product {
            id: 1,
            name: "Aloe Vera".to_string(),
            price_paise: 15000, // ₹150
            category: Some("Succulents".to_string()),
        }
    }

    #[test]
    fn test_add_same_product_increments_quantity() {
        let mut cart = Cart::new();
        let p = aloe_vera();

        cart.add_product(&p);
        cart.add_product(&p);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.lines()[0].line_total(), Money::from_rupees(300));
    }

    #[test]
    fn test_lines_stay_unique_by_product_id() {
        let mut cart = Cart::new();
        let a = product(1, 1000);
        let b = product(2, 2000);

        cart.add_product(&a);
        cart.add_product(&b);
        cart.add_product(&a);
        cart.set_quantity(2, 5);
        cart.remove(1);
        cart.add_product(&a);

        let mut ids: Vec<i64> = cart.lines().iter().map(|l| l.product_id).collect();
        let len = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), len);
    }

    #[test]
    fn test_line_total_tracks_price_minus_discount() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 1000));
        cart.set_quantity(1, 3);
        cart.set_item_discount(1, Money::from_paise(100));

        // 3 × (1000 − 100)
        assert_eq!(cart.lines()[0].line_total(), Money::from_paise(2700));
        assert_eq!(cart.item_discount_total(), Money::from_paise(300));
    }

    #[test]
    fn test_set_quantity_below_one_is_a_noop() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 1000));
        cart.set_quantity(1, 4);

        let snapshot = cart.clone();
        cart.set_quantity(1, 0);
        cart.set_quantity(1, -2);

        assert_eq!(cart.lines()[0].quantity, 4);
        assert_eq!(
            CartTotals::from(&cart).final_total_paise,
            CartTotals::from(&snapshot).final_total_paise
        );
    }

    #[test]
    fn test_negative_item_discount_treated_as_zero() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 1000));
        cart.set_item_discount(1, Money::from_paise(-500));

        assert_eq!(cart.lines()[0].unit_discount, Money::zero());
        assert_eq!(cart.lines()[0].line_total(), Money::from_paise(1000));
    }

    #[test]
    fn test_ops_on_missing_product_are_noops() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 1000));
        cart.set_manual_total(Money::from_paise(900));

        cart.remove(99);
        cart.set_quantity(99, 5);
        cart.set_item_discount(99, Money::from_paise(100));

        assert_eq!(cart.line_count(), 1);
        // Nothing changed, so the override is still in force.
        assert_eq!(cart.final_total(), Money::from_paise(900));
    }

    #[test]
    fn test_aloe_vera_scenario() {
        // Catalog has Aloe Vera at ₹150; add twice, ₹20 order discount.
        let mut cart = Cart::new();
        let p = aloe_vera();

        cart.add_product(&p);
        cart.add_product(&p);
        cart.set_order_discount(Money::from_rupees(20));

        assert_eq!(cart.subtotal(), Money::from_rupees(300));
        assert_eq!(cart.final_total(), Money::from_rupees(280));

        let draft = cart
            .checkout(CustomerInfo {
                name: Some("Rani".to_string()),
                phone: None,
                address: None,
            })
            .unwrap();

        assert_eq!(draft.customer_name.as_deref(), Some("Rani"));
        assert_eq!(draft.total_amount_paise, 30000);
        assert_eq!(draft.discount_paise, 2000);
        assert_eq!(draft.final_amount_paise, 28000);
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].name, "Aloe Vera");
        assert_eq!(draft.items[0].quantity, 2);
        assert_eq!(draft.items[0].line_total_paise, 30000);
    }

    #[test]
    fn test_manual_total_overrides_until_next_mutation() {
        let mut cart = Cart::new();
        let p = aloe_vera();
        cart.add_product(&p);
        cart.add_product(&p);
        cart.set_order_discount(Money::from_rupees(20));

        cart.set_manual_total(Money::from_rupees(250));
        assert_eq!(cart.final_total(), Money::from_rupees(250));

        // Any cart mutation invalidates the override.
        cart.add_product(&p);
        assert!(cart.manual_total().is_none());
        // 3 × 150 − 20
        assert_eq!(cart.final_total(), Money::from_rupees(430));
    }

    #[test]
    fn test_checkout_combines_order_and_item_discounts() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 10000));
        cart.set_quantity(1, 2);
        cart.set_item_discount(1, Money::from_paise(500));
        cart.set_order_discount(Money::from_paise(1000));

        let draft = cart.checkout(CustomerInfo::default()).unwrap();
        // order 1000 + item 2 × 500
        assert_eq!(draft.discount_paise, 2000);
        // 20000 − 1000 − 1000
        assert_eq!(draft.final_amount_paise, 18000);
    }

    #[test]
    fn test_checkout_empty_cart_fails() {
        let cart = Cart::new();
        let err = cart.checkout(CustomerInfo::default()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
    }

    #[test]
    fn test_checkout_blank_customer_fields_become_none() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 1000));

        let draft = cart
            .checkout(CustomerInfo {
                name: Some("  ".to_string()),
                phone: Some("".to_string()),
                address: None,
            })
            .unwrap();

        assert!(draft.customer_name.is_none());
        assert!(draft.customer_phone.is_none());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 1000));
        cart.set_order_discount(Money::from_paise(100));
        cart.set_manual_total(Money::from_paise(500));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.order_discount(), Money::zero());
        assert!(cart.manual_total().is_none());
        assert_eq!(cart.final_total(), Money::zero());
    }
}
