//! # verdant-core: Pure Business Logic for Verdant POS
//!
//! This crate is the heart of Verdant POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Frontend (SPA)                              │
//! │   Billing UI ──► Catalog UI ──► History UI ──► Settings UI      │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │ HTTP (JSON)
//! ┌─────────────────────────────▼───────────────────────────────────┐
//! │                     Axum routes (apps/server)                   │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────▼───────────────────────────────────┐
//! │               ★ verdant-core (THIS CRATE) ★                     │
//! │                                                                 │
//! │   types   money   cart   report   export   receipt   validation │
//! │                                                                 │
//! │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────▼───────────────────────────────────┐
//! │                  verdant-db (SQLite layer)                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ShopSettings, Sale, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The billing cart state machine
//! - [`report`] - Chart bucketing, income tiles, history filtering
//! - [`export`] - CSV export rendering
//! - [`receipt`] - Receipt text, phone normalization, share links
//! - [`validation`] - Boundary validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic - the clock is always an argument
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are paise (i64), never floats
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod export;
pub mod money;
pub mod receipt;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use verdant_core::Money` instead of
// `use verdant_core::money::Money`.

pub use cart::{Cart, CartLine, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
