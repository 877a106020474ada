//! # Product Repository
//!
//! Database operations for the catalog.
//!
//! Products are immutable once created: the operations are list, insert
//! and delete. Historical sales hold their own snapshot of a product's
//! name and price, so deleting a catalog row never cascades anywhere.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use verdant_core::{NewProduct, Product};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products ordered by name ascending.
    ///
    /// No pagination: a single shop's catalog is small.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price_paise, category
            FROM products
            ORDER BY name COLLATE NOCASE ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price_paise, category
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product and returns its store-assigned id.
    ///
    /// Input is validated at the boundary before it reaches here.
    pub async fn insert(&self, input: &NewProduct) -> DbResult<i64> {
        debug!(name = %input.name, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, price_paise, category)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(input.name.trim())
        .bind(input.price_paise)
        .bind(&input.category)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Deletes a product by id.
    ///
    /// Idempotent: deleting a non-existent id is a no-op, not an error.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Counts catalog products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
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

    fn new_product(name: &str, price_paise: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price_paise,
            category: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let db = test_db().await;
        let repo = db.products();

        let first = repo.insert(&new_product("Aloe Vera", 15000)).await.unwrap();
        let second = repo.insert(&new_product("Money Plant", 5000)).await.unwrap();

        assert!(second > first);
    }

    #[tokio::test]
    async fn test_list_orders_by_name() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert(&new_product("Money Plant", 5000)).await.unwrap();
        repo.insert(&new_product("aloe vera", 15000)).await.unwrap();
        repo.insert(&new_product("Fern", 8000)).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["aloe vera", "Fern", "Money Plant"]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let db = test_db().await;
        let repo = db.products();

        let id = repo.insert(&new_product("Aloe Vera", 15000)).await.unwrap();
        repo.delete(id).await.unwrap();
        // Deleting again (or a never-existing id) is still Ok.
        repo.delete(id).await.unwrap();
        repo.delete(9999).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = test_db().await;
        let repo = db.products();

        let id = repo
            .insert(&NewProduct {
                name: "Aloe Vera".to_string(),
                price_paise: 15000,
                category: Some("Succulents".to_string()),
            })
            .await
            .unwrap();

        let product = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.name, "Aloe Vera");
        assert_eq!(product.price_paise, 15000);
        assert_eq!(product.category.as_deref(), Some("Succulents"));

        assert!(repo.get_by_id(9999).await.unwrap().is_none());
    }
}
