//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults that suit a single-till development setup.

use std::env;
use std::net::SocketAddr;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Path to the SQLite database file.
    pub db_path: String,

    /// Shop name seeded into the settings singleton on first run.
    pub default_shop_name: String,

    /// Country code prefixed to bare 10-digit customer numbers when
    /// building share links.
    pub country_code: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// ## Environment Variables
    /// - `VERDANT_BIND_ADDR` - listen address (default `0.0.0.0:3000`)
    /// - `VERDANT_DB_PATH` - database file (default `verdant.db`)
    /// - `VERDANT_SHOP_NAME` - seed shop name (default `My Nursery`)
    /// - `VERDANT_COUNTRY_CODE` - phone prefix (default `91`)
    pub fn load() -> Result<Self, ConfigError> {
        let bind_addr = env::var("VERDANT_BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("VERDANT_BIND_ADDR".to_string()))?;

        Ok(ServerConfig {
            bind_addr,
            db_path: env::var("VERDANT_DB_PATH").unwrap_or_else(|_| "verdant.db".to_string()),
            default_shop_name: env::var("VERDANT_SHOP_NAME")
                .unwrap_or_else(|_| "My Nursery".to_string()),
            country_code: env::var("VERDANT_COUNTRY_CODE").unwrap_or_else(|_| "91".to_string()),
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Only exercises the fallback path; the env override branches are
        // plain `env::var` reads.
        let config = ServerConfig::load().unwrap();
        assert!(!config.country_code.is_empty());
        assert!(!config.default_shop_name.is_empty());
    }
}
