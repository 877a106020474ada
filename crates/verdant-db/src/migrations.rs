//! # Database Migrations
//!
//! Programmatic, additive, idempotent schema migrations.
//!
//! ## Why not embedded SQL files?
//! SQLite has no `ALTER TABLE ... ADD COLUMN IF NOT EXISTS`, so additive
//! column migrations must consult `PRAGMA table_info` before altering.
//! That check lives in code; every step here is safe to run on every
//! startup against any prior schema version.
//!
//! ## Migration Process
//! ```text
//! App Startup
//!      │
//!      ▼
//! CREATE TABLE IF NOT EXISTS products / settings / sales
//!      │
//!      ▼
//! PRAGMA table_info(sales) ── customer_address present?
//!      │                              │
//!      │ yes: skip                    │ no: ALTER TABLE ADD COLUMN
//!      ▼                              ▼
//! Seed the settings singleton if the table is empty
//! ```
//!
//! ## Adding New Migrations
//! 1. Append a step to [`run_migrations`] - never reorder existing steps
//! 2. Column additions go through [`ensure_column`]
//! 3. Keep every step idempotent (`IF NOT EXISTS` / existence checks)

use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::error::DbResult;

/// Base schema. Note `sales` is created WITHOUT `customer_address`: that
/// column arrived later and is added by the guarded step below, which
/// also upgrades databases created before it existed.
const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    price_paise INTEGER NOT NULL,
    category    TEXT
);

CREATE TABLE IF NOT EXISTS settings (
    id         INTEGER PRIMARY KEY CHECK (id = 1),
    shop_name  TEXT NOT NULL,
    address    TEXT NOT NULL DEFAULT '',
    phone      TEXT NOT NULL DEFAULT '',
    email      TEXT NOT NULL DEFAULT '',
    gst_number TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS sales (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_name      TEXT,
    customer_phone     TEXT,
    total_amount_paise INTEGER NOT NULL,
    discount_paise     INTEGER NOT NULL DEFAULT 0,
    final_amount_paise INTEGER NOT NULL,
    items              TEXT NOT NULL,
    created_at         TEXT NOT NULL
);
"#;

/// Runs all schema migrations.
///
/// Idempotent: safe to run on every startup. A failure here is reported
/// to the caller, which logs it and keeps the server up (degraded) rather
/// than refusing to start.
pub async fn run_migrations(pool: &SqlitePool, default_shop_name: &str) -> DbResult<()> {
    info!("Running database migrations");

    // raw_sql: CREATE_TABLES is a multi-statement script.
    sqlx::raw_sql(CREATE_TABLES).execute(pool).await?;

    ensure_column(pool, "sales", "customer_address", "TEXT").await?;

    seed_settings(pool, default_shop_name).await?;

    info!("Migrations complete");
    Ok(())
}

/// Adds a column if the table doesn't already have it.
///
/// Consults `PRAGMA table_info` first: SQLite has no conditional form of
/// `ADD COLUMN`, and re-adding an existing column is an error.
async fn ensure_column(pool: &SqlitePool, table: &str, column: &str, ty: &str) -> DbResult<()> {
    let rows = sqlx::query(&format!("PRAGMA table_info({table})"))
        .fetch_all(pool)
        .await?;

    let exists = rows
        .iter()
        .any(|row| row.try_get::<String, _>("name").map(|n| n == column).unwrap_or(false));

    if exists {
        debug!(table, column, "Column already present, skipping");
        return Ok(());
    }

    info!(table, column, "Adding column");
    sqlx::query(&format!("ALTER TABLE {table} ADD COLUMN {column} {ty}"))
        .execute(pool)
        .await?;

    Ok(())
}

/// Inserts the default settings row when the table is empty.
///
/// The settings record is a singleton created once at initialization and
/// only ever replaced afterwards, never deleted.
async fn seed_settings(pool: &SqlitePool, default_shop_name: &str) -> DbResult<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings")
        .fetch_one(pool)
        .await?;

    if count == 0 {
        info!(shop_name = default_shop_name, "Seeding default settings");
        sqlx::query("INSERT INTO settings (id, shop_name) VALUES (1, ?1)")
            .bind(default_shop_name)
            .execute(pool)
            .await?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
