//! # Application State
//!
//! State shared across HTTP handlers.
//!
//! ## Why Multiple Focused Pieces?
//! ```text
//! AppState (cloned per request, all fields cheap to clone)
//! ├── Database   connection pool, inherently thread-safe
//! ├── CartState  Arc<Mutex<Cart>> - the billing session
//! └── ServerConfig  read-only after startup
//! ```
//!
//! The system is designed for one operator on one till, so there is one
//! billing session: a single server-held cart. The mutex serializes the
//! (already sequential) cart edits; reporting reads never touch it.

use std::sync::{Arc, Mutex};

use verdant_core::Cart;
use verdant_db::Database;

use crate::config::ServerConfig;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub cart: CartState,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Creates the application state for a connected database.
    pub fn new(db: Database, config: ServerConfig) -> Self {
        AppState {
            db,
            cart: CartState::new(),
            config: Arc::new(config),
        }
    }
}

/// The billing-session cart behind a mutex.
///
/// `Arc` for shared ownership across request tasks, `Mutex` so only one
/// operation mutates the cart at a time. Guards are never held across an
/// await point.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("cart mutex poisoned");
        f(&mut cart)
    }
}
