//! # HTTP Routes
//!
//! All routes exposed to the SPA frontend.
//!
//! ## Route Map
//! ```text
//! /api/products              GET list        POST add
//! /api/products/{id}         DELETE (idempotent)
//! /api/settings              GET singleton   POST replace
//! /api/sales                 GET list+filter POST commit draft
//! /api/sales/{id}/receipt    GET receipt text + share links
//! /api/sales/export          GET CSV download
//! /api/reports/income        GET summary tiles
//! /api/reports/chart         GET bucketed series
//! /api/cart                  GET the billing session
//! /api/cart/items            POST add product
//! /api/cart/items/{id}       DELETE remove line
//! /api/cart/items/{id}/quantity  PUT
//! /api/cart/items/{id}/discount  PUT
//! /api/cart/discount         PUT order-level discount
//! /api/cart/total            PUT manual override
//! /api/cart/checkout         POST commit the session cart
//! ```
//!
//! Handlers stay thin: validate at the boundary, call into
//! `verdant-core`/`verdant-db`, map errors to [`crate::error::ApiError`].

use axum::routing::{delete, get, post, put};
use axum::Router;
use serde::Serialize;

use crate::state::AppState;

pub mod cart;
pub mod product;
pub mod report;
pub mod sale;
pub mod settings;

/// Body of a successful create: `{ "id": 7 }`.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Body of a successful mutation: `{ "success": true }`.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        SuccessResponse { success: true }
    }
}

/// Assembles the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Catalog
        .route(
            "/api/products",
            get(product::list_products).post(product::add_product),
        )
        .route("/api/products/{id}", delete(product::delete_product))
        // Settings
        .route(
            "/api/settings",
            get(settings::get_settings).post(settings::update_settings),
        )
        // Sales ledger
        .route("/api/sales", get(sale::list_sales).post(sale::commit_sale))
        .route("/api/sales/export", get(sale::export_sales))
        .route("/api/sales/{id}/receipt", get(sale::get_receipt))
        // Reporting
        .route("/api/reports/income", get(report::income))
        .route("/api/reports/chart", get(report::chart))
        // Billing session
        .route("/api/cart", get(cart::get_cart))
        .route("/api/cart/items", post(cart::add_item))
        .route("/api/cart/items/{product_id}", delete(cart::remove_item))
        .route(
            "/api/cart/items/{product_id}/quantity",
            put(cart::set_quantity),
        )
        .route(
            "/api/cart/items/{product_id}/discount",
            put(cart::set_item_discount),
        )
        .route("/api/cart/discount", put(cart::set_order_discount))
        .route("/api/cart/total", put(cart::set_manual_total))
        .route("/api/cart/checkout", post(cart::checkout))
        .with_state(state)
}
