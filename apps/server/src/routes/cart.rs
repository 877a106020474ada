//! # Billing Session Routes
//!
//! The server-held cart for the current billing session: one operator,
//! one till, one cart. Every mutation returns the full updated cart so
//! the frontend can re-render without a second round-trip.
//!
//! ## Session Flow
//! ```text
//! POST /api/cart/items        add product (qty +1 if already present)
//! PUT  .../quantity           set line quantity (silent no-op below 1)
//! PUT  .../discount           per-unit discount (negative → 0)
//! PUT  /api/cart/discount     order-level discount
//! PUT  /api/cart/total        manual override of the final total
//! POST /api/cart/checkout     snapshot → persist → reset to empty
//! ```

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use verdant_core::validation::{validate_non_negative, validate_sale_draft};
use verdant_core::{Cart, CartLine, CartTotals, CustomerInfo, Money, Sale};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request / Response Bodies
// =============================================================================

/// Cart response including lines and derived totals.
#[derive(Debug, Clone, Serialize)]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddCartItem {
    pub product_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SetQuantity {
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct SetAmount {
    pub amount_paise: i64,
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /api/cart` — the current billing session.
pub async fn get_cart(State(state): State<AppState>) -> Json<CartResponse> {
    debug!("get_cart");
    Json(state.cart.with_cart(|cart| CartResponse::from(cart)))
}

/// `POST /api/cart/items` — add a product to the cart.
///
/// The product's name and price are frozen into the line as it is added;
/// if the product is already in the cart its quantity increments instead.
pub async fn add_item(
    State(state): State<AppState>,
    Json(input): Json<AddCartItem>,
) -> Result<Json<CartResponse>, ApiError> {
    debug!(product_id = input.product_id, "add_item");

    let product = state
        .db
        .products()
        .get_by_id(input.product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", input.product_id))?;

    Ok(Json(state.cart.with_cart_mut(|c| {
        c.add_product(&product);
        CartResponse::from(&*c)
    })))
}

/// `DELETE /api/cart/items/{product_id}` — remove a line entirely.
pub async fn remove_item(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Json<CartResponse> {
    debug!(product_id, "remove_item");

    Json(state.cart.with_cart_mut(|c| {
        c.remove(product_id);
        CartResponse::from(&*c)
    }))
}

/// `PUT /api/cart/items/{product_id}/quantity` — set a line's quantity.
///
/// Quantities below 1 are silently ignored: the cart comes back unchanged.
pub async fn set_quantity(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
    Json(input): Json<SetQuantity>,
) -> Json<CartResponse> {
    debug!(product_id, quantity = input.quantity, "set_quantity");

    Json(state.cart.with_cart_mut(|c| {
        c.set_quantity(product_id, input.quantity);
        CartResponse::from(&*c)
    }))
}

/// `PUT /api/cart/items/{product_id}/discount` — per-unit discount.
///
/// Negative amounts are rejected by treating them as zero.
pub async fn set_item_discount(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
    Json(input): Json<SetAmount>,
) -> Json<CartResponse> {
    debug!(product_id, amount_paise = input.amount_paise, "set_item_discount");

    Json(state.cart.with_cart_mut(|c| {
        c.set_item_discount(product_id, Money::from_paise(input.amount_paise));
        CartResponse::from(&*c)
    }))
}

/// `PUT /api/cart/discount` — the order-level discount.
pub async fn set_order_discount(
    State(state): State<AppState>,
    Json(input): Json<SetAmount>,
) -> Json<CartResponse> {
    debug!(amount_paise = input.amount_paise, "set_order_discount");

    Json(state.cart.with_cart_mut(|c| {
        c.set_order_discount(Money::from_paise(input.amount_paise));
        CartResponse::from(&*c)
    }))
}

/// `PUT /api/cart/total` — declare the final total outright.
///
/// Accepted even when inconsistent with the line items (rounding, a
/// negotiated price); the next cart mutation clears it.
pub async fn set_manual_total(
    State(state): State<AppState>,
    Json(input): Json<SetAmount>,
) -> Result<Json<CartResponse>, ApiError> {
    debug!(amount_paise = input.amount_paise, "set_manual_total");

    validate_non_negative("manual total", input.amount_paise)?;

    Ok(Json(state.cart.with_cart_mut(|c| {
        c.set_manual_total(Money::from_paise(input.amount_paise));
        CartResponse::from(&*c)
    })))
}

/// `POST /api/cart/checkout` — commit the session cart as a sale.
///
/// Snapshots the cart into a draft, persists it, and only then resets
/// the session to empty — a failed insert leaves the cart intact.
pub async fn checkout(
    State(state): State<AppState>,
    Json(customer): Json<CustomerInfo>,
) -> Result<Json<Sale>, ApiError> {
    debug!("checkout");

    let draft = state.cart.with_cart(|c| c.checkout(customer))?;
    validate_sale_draft(&draft)?;

    let sale = state.db.sales().insert(&draft).await?;
    state.cart.with_cart_mut(Cart::clear);

    info!(
        sale_id = sale.id,
        final_amount_paise = sale.final_amount_paise,
        items = sale.items.len(),
        "Sale committed"
    );

    Ok(Json(sale))
}
