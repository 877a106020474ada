//! # Settings Repository
//!
//! Database operations for the settings singleton.
//!
//! Exactly one settings row exists (id = 1, enforced by a CHECK
//! constraint). It is seeded at migration time, re-seeded defensively on
//! read if somehow absent, and only ever replaced wholesale — never
//! deleted.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use verdant_core::ShopSettings;

/// Repository for the settings singleton.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
    default_shop_name: String,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool, default_shop_name: String) -> Self {
        SettingsRepository {
            pool,
            default_shop_name,
        }
    }

    /// Reads the singleton, seeding the default row first if it is absent.
    pub async fn get_or_seed(&self) -> DbResult<ShopSettings> {
        if let Some(settings) = self.get().await? {
            return Ok(settings);
        }

        info!(shop_name = %self.default_shop_name, "Settings row missing, seeding default");
        sqlx::query("INSERT INTO settings (id, shop_name) VALUES (1, ?1)")
            .bind(&self.default_shop_name)
            .execute(&self.pool)
            .await?;

        Ok(ShopSettings::with_name(self.default_shop_name.clone()))
    }

    /// Reads the singleton without seeding.
    async fn get(&self) -> DbResult<Option<ShopSettings>> {
        let settings = sqlx::query_as::<_, ShopSettings>(
            r#"
            SELECT shop_name, address, phone, email, gst_number
            FROM settings
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(settings)
    }

    /// Replaces all five fields atomically.
    ///
    /// Validation (non-empty shop name) happens at the boundary; the
    /// UPDATE here is a single statement, so the replacement is atomic.
    pub async fn update(&self, settings: &ShopSettings) -> DbResult<()> {
        debug!(shop_name = %settings.shop_name, "Updating settings");

        let result = sqlx::query(
            r#"
            UPDATE settings
            SET shop_name = ?1, address = ?2, phone = ?3, email = ?4, gst_number = ?5
            WHERE id = 1
            "#,
        )
        .bind(settings.shop_name.trim())
        .bind(&settings.address)
        .bind(&settings.phone)
        .bind(&settings.email)
        .bind(&settings.gst_number)
        .execute(&self.pool)
        .await?;

        // The row can only be missing on a database that skipped
        // migrations; seed it and retry once.
        if result.rows_affected() == 0 {
            self.get_or_seed().await?;
            sqlx::query(
                r#"
                UPDATE settings
                SET shop_name = ?1, address = ?2, phone = ?3, email = ?4, gst_number = ?5
                WHERE id = 1
                "#,
            )
            .bind(settings.shop_name.trim())
            .bind(&settings.address)
            .bind(&settings.phone)
            .bind(&settings.email)
            .bind(&settings.gst_number)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_seeded_default_is_readable() {
        let db = test_db().await;
        let settings = db.settings().get_or_seed().await.unwrap();

        assert_eq!(settings.shop_name, "My Nursery");
        assert!(settings.address.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let db = test_db().await;
        let repo = db.settings();

        let updated = ShopSettings {
            shop_name: "Greenhouse".to_string(),
            address: "12 Garden Road".to_string(),
            phone: "044-123456".to_string(),
            email: "hello@greenhouse.example".to_string(),
            gst_number: "29ABCDE1234F1Z5".to_string(),
        };
        repo.update(&updated).await.unwrap();

        let read_back = repo.get_or_seed().await.unwrap();
        assert_eq!(read_back, updated);

        // A second update with empty optional fields clears them all.
        let cleared = ShopSettings::with_name("Greenhouse");
        repo.update(&cleared).await.unwrap();
        assert_eq!(repo.get_or_seed().await.unwrap(), cleared);
    }
}
