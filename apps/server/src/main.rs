//! # Verdant POS Server Entry Point
//!
//! Point-of-sale and billing for a single small retail shop: product
//! catalog, billing cart, append-only sales ledger, shop settings,
//! income reporting, CSV export, and receipt payloads — one operator,
//! one till, one SQLite file.
//!
//! The actual setup lives in `lib.rs` for better testability.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    verdant_server::run().await
}
