//! # Sale Repository
//!
//! Database operations for the append-only sales ledger.
//!
//! ## Ledger Rules
//! ```text
//! 1. COMMIT     insert(draft) → one row, id + created_at assigned here
//! 2. READ       list() newest first / get_by_id()
//! 3. (nothing else — sales are never updated or deleted)
//! ```
//!
//! The line items travel as JSON text in a single column. They are never
//! queried individually, so the opaque column keeps the schema at one
//! row per bill and makes the commit a single atomic insert.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use verdant_core::{Sale, SaleDraft, SaleItem};

/// Row shape of the `sales` table, before the items column is decoded.
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: i64,
    customer_name: Option<String>,
    customer_phone: Option<String>,
    customer_address: Option<String>,
    total_amount_paise: i64,
    discount_paise: i64,
    final_amount_paise: i64,
    items: String,
    created_at: DateTime<Utc>,
}

impl SaleRow {
    fn into_sale(self) -> DbResult<Sale> {
        let items: Vec<SaleItem> = serde_json::from_str(&self.items)?;
        Ok(Sale {
            id: self.id,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_address: self.customer_address,
            total_amount_paise: self.total_amount_paise,
            discount_paise: self.discount_paise,
            final_amount_paise: self.final_amount_paise,
            items,
            created_at: self.created_at,
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, customer_name, customer_phone, customer_address,
           total_amount_paise, discount_paise, final_amount_paise,
           items, created_at
    FROM sales
"#;

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Commits a draft to the ledger.
    ///
    /// Assigns the id (AUTOINCREMENT, monotonically increasing) and the
    /// commit timestamp, and returns the full persisted sale. The item
    /// snapshot rides inside the single inserted row, so the commit
    /// either fully persists or not at all.
    pub async fn insert(&self, draft: &SaleDraft) -> DbResult<Sale> {
        let created_at = Utc::now();
        let items_json = serde_json::to_string(&draft.items)?;

        debug!(
            final_amount_paise = draft.final_amount_paise,
            item_count = draft.items.len(),
            "Inserting sale"
        );

        let result = sqlx::query(
            r#"
            INSERT INTO sales (
                customer_name, customer_phone, customer_address,
                total_amount_paise, discount_paise, final_amount_paise,
                items, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&draft.customer_name)
        .bind(&draft.customer_phone)
        .bind(&draft.customer_address)
        .bind(draft.total_amount_paise)
        .bind(draft.discount_paise)
        .bind(draft.final_amount_paise)
        .bind(&items_json)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(Sale {
            id: result.last_insert_rowid(),
            customer_name: draft.customer_name.clone(),
            customer_phone: draft.customer_phone.clone(),
            customer_address: draft.customer_address.clone(),
            total_amount_paise: draft.total_amount_paise,
            discount_paise: draft.discount_paise,
            final_amount_paise: draft.final_amount_paise,
            items: draft.items.clone(),
            created_at,
        })
    }

    /// Lists all sales, newest first.
    ///
    /// `created_at` is monotonically non-decreasing with id, so id breaks
    /// ties between commits inside the same instant.
    pub async fn list_newest_first(&self) -> DbResult<Vec<Sale>> {
        let rows = sqlx::query_as::<_, SaleRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SaleRow::into_sale).collect()
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let row = sqlx::query_as::<_, SaleRow>(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(SaleRow::into_sale).transpose()
    }

    /// Counts ledger rows (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
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
    use verdant_core::NewProduct;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn draft(name: Option<&str>, final_paise: i64) -> SaleDraft {
        SaleDraft {
            customer_name: name.map(str::to_string),
            customer_phone: None,
            customer_address: None,
            total_amount_paise: final_paise,
            discount_paise: 0,
            final_amount_paise: final_paise,
            items: vec![SaleItem {
                product_id: 1,
                name: "Aloe Vera".to_string(),
                unit_price_paise: 15000,
                quantity: 2,
                discount_paise: 0,
                line_total_paise: 30000,
            }],
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_monotonic_ids_and_timestamps() {
        let db = test_db().await;
        let repo = db.sales();

        let first = repo.insert(&draft(None, 1000)).await.unwrap();
        let second = repo.insert(&draft(None, 2000)).await.unwrap();

        assert!(second.id > first.id);
        assert!(second.created_at >= first.created_at);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let db = test_db().await;
        let repo = db.sales();

        repo.insert(&draft(Some("First"), 1000)).await.unwrap();
        repo.insert(&draft(Some("Second"), 2000)).await.unwrap();

        let sales = repo.list_newest_first().await.unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0].customer_name.as_deref(), Some("Second"));
        assert_eq!(sales[1].customer_name.as_deref(), Some("First"));
    }

    #[tokio::test]
    async fn test_items_round_trip_through_json_column() {
        let db = test_db().await;
        let repo = db.sales();

        let committed = repo.insert(&draft(Some("Rani"), 28000)).await.unwrap();
        let read_back = repo.get_by_id(committed.id).await.unwrap().unwrap();

        assert_eq!(read_back.items, committed.items);
        assert_eq!(read_back.items[0].name, "Aloe Vera");
        assert_eq!(read_back.items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_snapshot_survives_product_deletion() {
        let db = test_db().await;

        let product_id = db
            .products()
            .insert(&NewProduct {
                name: "Aloe Vera".to_string(),
                price_paise: 15000,
                category: None,
            })
            .await
            .unwrap();

        let mut d = draft(Some("Rani"), 30000);
        d.items[0].product_id = product_id;
        let sale = db.sales().insert(&d).await.unwrap();

        db.products().delete(product_id).await.unwrap();

        // The sale's snapshot is untouched by the catalog delete.
        let read_back = db.sales().get_by_id(sale.id).await.unwrap().unwrap();
        assert_eq!(read_back.items[0].name, "Aloe Vera");
        assert_eq!(read_back.items[0].unit_price_paise, 15000);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let db = test_db().await;
        assert!(db.sales().get_by_id(42).await.unwrap().is_none());
    }
}
