//! # verdant-db: Database Layer for Verdant POS
//!
//! This crate provides database access for the Verdant POS system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! Axum route handler
//!      │
//!      ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │                  verdant-db (THIS CRATE)                  │
//! │                                                           │
//! │   Database        Repositories           Migrations       │
//! │   (pool.rs)       product / settings     (programmatic,   │
//! │   SqlitePool      / sale                 additive)        │
//! └───────────────────────────────────────────────────────────┘
//!      │
//!      ▼
//! SQLite database file (WAL mode)
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Additive, idempotent schema migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, settings, sale)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use verdant_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("verdant.db")).await?;
//! let products = db.products().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::settings::SettingsRepository;
