//! # Verdant Server Library
//!
//! Core library for the Verdant POS HTTP server: configuration, state,
//! routes, and the run loop.
//!
//! ## Module Organization
//! ```text
//! verdant_server/
//! ├── lib.rs          ◄─── You are here (startup & serve)
//! ├── config.rs       ◄─── Environment-driven ServerConfig
//! ├── state.rs        ◄─── AppState (Database + billing session)
//! ├── error.rs        ◄─── ApiError for handlers
//! └── routes/
//!     ├── product.rs  ◄─── Catalog CRUD
//!     ├── settings.rs ◄─── Shop identity singleton
//!     ├── cart.rs     ◄─── Billing session
//!     ├── sale.rs     ◄─── Ledger, receipt, CSV export
//!     └── report.rs   ◄─── Income tiles, chart series
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (RUST_LOG override, sensible default filter)
//! 2. Load configuration from the environment
//! 3. Connect to SQLite (WAL mode)
//! 4. Run migrations — a failure is logged, not fatal: the tool keeps
//!    running degraded rather than refusing to start
//! 5. Build the router with shared state and serve until ctrl-c

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use state::AppState;
use verdant_db::{Database, DbConfig};

/// Runs the server until shutdown.
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Verdant POS server");

    let config = ServerConfig::load().context("loading configuration")?;
    info!(
        bind_addr = %config.bind_addr,
        db_path = %config.db_path,
        "Configuration loaded"
    );

    let db_config = DbConfig::new(&config.db_path)
        .default_shop_name(config.default_shop_name.as_str())
        .run_migrations(false);
    let db = Database::new(db_config)
        .await
        .context("connecting to database")?;

    // Migration failures are logged and do not block startup: a stale
    // schema degrades some operations, not the whole tool.
    if let Err(e) = db.run_migrations().await {
        error!(error = %e, "Migrations failed, continuing with existing schema");
    }

    let state = AppState::new(db, config.clone());
    let app = routes::router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving")?;

    info!("Server stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - show debug messages
/// - `RUST_LOG=verdant=trace` - trace for verdant crates only
/// - Default: info, with sqlx chatter turned down
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,verdant=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolves when ctrl-c is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install ctrl-c handler");
    } else {
        info!("Shutdown signal received");
    }
}
