//! # Sale Repository
//!
//! Sale recording and the enriched month-window fetch that feeds the
//! report pipeline.
//!
//! ## The Month Fetch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   fetch_month(tenant, window)                           │
//! │                                                                         │
//! │  sales ──JOIN── toys ──LEFT JOIN── stores                              │
//! │    │              └────LEFT JOIN── warehouses                          │
//! │    └───LEFT JOIN── employees                                            │
//! │                                                                         │
//! │  WHERE  tenant_id = ?  AND  sold_at within [start, end]   (inclusive)   │
//! │  ORDER BY sold_at ascending                                             │
//! │                                                                         │
//! │  One round trip; LEFT JOINs keep sales whose toy has no store or        │
//! │  whose employee is unset — the aggregator decides what to skip.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use toywalls_core::{EmployeeRef, EntityRef, MonthWindow, Sale, SaleRecord};

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

    /// Records a sale.
    pub async fn record(&self, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, toy_id = %sale.toy_id, "Recording sale");

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, tenant_id, toy_id, employee_id,
                unit_price, quantity, sold_at, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.tenant_id)
        .bind(&sale.toy_id)
        .bind(&sale.employee_id)
        .bind(sale.unit_price)
        .bind(sale.quantity)
        .bind(sale.sold_at)
        .bind(sale.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Number of sales recorded for a tenant (seed guard, diagnostics).
    pub async fn count_for_tenant(&self, tenant_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales WHERE tenant_id = ?1")
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Fetches every sale of the tenant inside the month window, enriched
    /// with its toy's store/warehouse and its employee, ordered by
    /// timestamp ascending.
    ///
    /// Both window bounds are inclusive. Timestamps are normalized with
    /// SQLite's `datetime()` so the comparison is format-independent.
    pub async fn fetch_month(
        &self,
        tenant_id: &str,
        window: &MonthWindow,
    ) -> DbResult<Vec<SaleRecord>> {
        debug!(
            tenant_id = %tenant_id,
            start = %window.start(),
            end = %window.end(),
            "Fetching month of sales"
        );

        let rows = sqlx::query_as::<_, EnrichedSaleRow>(
            r#"
            SELECT
                s.id,
                s.sold_at,
                s.unit_price,
                s.quantity,
                st.id    AS store_id,
                st.name  AS store_name,
                w.id     AS warehouse_id,
                w.name   AS warehouse_name,
                e.id     AS employee_id,
                e.name   AS employee_name,
                e.code   AS employee_code
            FROM sales s
            JOIN toys t           ON t.id = s.toy_id
            LEFT JOIN stores st   ON st.id = t.store_id
            LEFT JOIN warehouses w ON w.id = t.warehouse_id
            LEFT JOIN employees e ON e.id = s.employee_id
            WHERE s.tenant_id = ?1
              AND datetime(s.sold_at) >= datetime(?2)
              AND datetime(s.sold_at) <= datetime(?3)
            ORDER BY datetime(s.sold_at) ASC
            "#,
        )
        .bind(tenant_id)
        .bind(window.start())
        .bind(window.end())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SaleRecord::from).collect())
    }
}

/// Flat joined row; `From` folds the nullable join columns into the
/// optional relations of the read model.
#[derive(Debug, sqlx::FromRow)]
struct EnrichedSaleRow {
    id: String,
    sold_at: DateTime<Utc>,
    unit_price: Option<f64>,
    quantity: Option<i64>,
    store_id: Option<String>,
    store_name: Option<String>,
    warehouse_id: Option<String>,
    warehouse_name: Option<String>,
    employee_id: Option<String>,
    employee_name: Option<String>,
    employee_code: Option<String>,
}

impl From<EnrichedSaleRow> for SaleRecord {
    fn from(r: EnrichedSaleRow) -> Self {
        SaleRecord {
            id: r.id,
            sold_at: r.sold_at,
            unit_price: r.unit_price,
            quantity: r.quantity,
            store: r.store_id.zip(r.store_name).map(|(id, name)| EntityRef { id, name }),
            warehouse: r
                .warehouse_id
                .zip(r.warehouse_name)
                .map(|(id, name)| EntityRef { id, name }),
            employee: r
                .employee_id
                .zip(r.employee_name)
                .map(|(id, name)| EmployeeRef {
                    id,
                    name,
                    code: r.employee_code,
                }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::TimeZone;
    use toywalls_core::{Employee, Store, Toy};
    use uuid::Uuid;

    const TENANT: &str = "tenant-1";
    const OTHER_TENANT: &str = "tenant-2";

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn ts(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, h, m, s).unwrap()
    }

    async fn seed_store(db: &Database, tenant: &str, name: &str) -> String {
        let id = Uuid::new_v4().to_string();
        db.stores()
            .insert(&Store {
                id: id.clone(),
                tenant_id: tenant.to_string(),
                name: name.to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        id
    }

    async fn seed_employee(db: &Database, tenant: &str, name: &str) -> String {
        let id = Uuid::new_v4().to_string();
        db.employees()
            .insert(&Employee {
                id: id.clone(),
                tenant_id: tenant.to_string(),
                name: name.to_string(),
                code: Some("E-01".to_string()),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        id
    }

    async fn seed_toy(db: &Database, tenant: &str, store_id: Option<&str>) -> String {
        let id = Uuid::new_v4().to_string();
        db.toys()
            .insert(&Toy {
                id: id.clone(),
                tenant_id: tenant.to_string(),
                name: "Cubo mágico".to_string(),
                store_id: store_id.map(str::to_string),
                warehouse_id: None,
                price_cents: 1500,
                quantity: 10,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        id
    }

    async fn seed_sale(
        db: &Database,
        tenant: &str,
        toy_id: &str,
        employee_id: Option<&str>,
        sold_at: DateTime<Utc>,
        price: Option<f64>,
        qty: Option<i64>,
    ) {
        db.sales()
            .record(&Sale {
                id: Uuid::new_v4().to_string(),
                tenant_id: tenant.to_string(),
                toy_id: toy_id.to_string(),
                employee_id: employee_id.map(str::to_string),
                unit_price: price,
                quantity: qty,
                sold_at,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_fetch_month_window_bounds_inclusive() {
        let db = test_db().await;
        let store = seed_store(&db, TENANT, "Tienda Norte").await;
        let toy = seed_toy(&db, TENANT, Some(&store)).await;

        // First instant, last second, and one just outside each bound
        seed_sale(&db, TENANT, &toy, None, ts(2026, 8, 1, 0, 0, 0), Some(1.0), Some(1)).await;
        seed_sale(&db, TENANT, &toy, None, ts(2026, 8, 31, 23, 59, 59), Some(2.0), Some(1)).await;
        seed_sale(&db, TENANT, &toy, None, ts(2026, 7, 31, 23, 59, 59), Some(3.0), Some(1)).await;
        seed_sale(&db, TENANT, &toy, None, ts(2026, 9, 1, 0, 0, 0), Some(4.0), Some(1)).await;

        let window = MonthWindow::containing(ts(2026, 8, 15, 12, 0, 0));
        let rows = db.sales().fetch_month(TENANT, &window).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].unit_price, Some(1.0));
        assert_eq!(rows[1].unit_price, Some(2.0));
    }

    #[tokio::test]
    async fn test_fetch_month_orders_ascending() {
        let db = test_db().await;
        let store = seed_store(&db, TENANT, "Tienda Norte").await;
        let toy = seed_toy(&db, TENANT, Some(&store)).await;

        // Inserted out of order on purpose
        seed_sale(&db, TENANT, &toy, None, ts(2026, 8, 20, 9, 0, 0), Some(1.0), Some(1)).await;
        seed_sale(&db, TENANT, &toy, None, ts(2026, 8, 2, 9, 0, 0), Some(2.0), Some(1)).await;
        seed_sale(&db, TENANT, &toy, None, ts(2026, 8, 11, 9, 0, 0), Some(3.0), Some(1)).await;

        let window = MonthWindow::containing(ts(2026, 8, 15, 12, 0, 0));
        let rows = db.sales().fetch_month(TENANT, &window).await.unwrap();

        let days: Vec<u32> = rows.iter().map(|r| chrono::Datelike::day(&r.sold_at)).collect();
        assert_eq!(days, vec![2, 11, 20]);
    }

    #[tokio::test]
    async fn test_fetch_month_enriches_relations() {
        let db = test_db().await;
        let store = seed_store(&db, TENANT, "Tienda Norte").await;
        let employee = seed_employee(&db, TENANT, "Marta").await;
        let toy = seed_toy(&db, TENANT, Some(&store)).await;

        seed_sale(
            &db,
            TENANT,
            &toy,
            Some(&employee),
            ts(2026, 8, 3, 10, 0, 0),
            Some(99.5),
            None,
        )
        .await;

        let window = MonthWindow::containing(ts(2026, 8, 15, 12, 0, 0));
        let rows = db.sales().fetch_month(TENANT, &window).await.unwrap();

        assert_eq!(rows.len(), 1);
        let record = &rows[0];
        assert_eq!(record.store.as_ref().unwrap().name, "Tienda Norte");
        assert!(record.warehouse.is_none());
        let emp = record.employee.as_ref().unwrap();
        assert_eq!(emp.name, "Marta");
        assert_eq!(emp.code.as_deref(), Some("E-01"));
        assert_eq!(record.quantity, None);
        assert_eq!(record.unit_price, Some(99.5));
    }

    /// A toy with no store assignment still yields its sales; the store
    /// relation is simply None and the aggregator will skip it.
    #[tokio::test]
    async fn test_unassigned_toy_keeps_sale_with_none_store() {
        let db = test_db().await;
        let toy = seed_toy(&db, TENANT, None).await;

        seed_sale(&db, TENANT, &toy, None, ts(2026, 8, 5, 10, 0, 0), Some(5.0), Some(2)).await;

        let window = MonthWindow::containing(ts(2026, 8, 15, 12, 0, 0));
        let rows = db.sales().fetch_month(TENANT, &window).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert!(rows[0].store.is_none());
        assert!(rows[0].employee.is_none());
    }

    #[tokio::test]
    async fn test_fetch_month_is_tenant_scoped() {
        let db = test_db().await;
        let store_a = seed_store(&db, TENANT, "Tienda A").await;
        let store_b = seed_store(&db, OTHER_TENANT, "Tienda B").await;
        let toy_a = seed_toy(&db, TENANT, Some(&store_a)).await;
        let toy_b = seed_toy(&db, OTHER_TENANT, Some(&store_b)).await;

        seed_sale(&db, TENANT, &toy_a, None, ts(2026, 8, 5, 10, 0, 0), Some(5.0), Some(1)).await;
        seed_sale(&db, OTHER_TENANT, &toy_b, None, ts(2026, 8, 5, 11, 0, 0), Some(7.0), Some(1))
            .await;

        let window = MonthWindow::containing(ts(2026, 8, 15, 12, 0, 0));
        let rows = db.sales().fetch_month(TENANT, &window).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].store.as_ref().unwrap().name, "Tienda A");

        assert_eq!(db.sales().count_for_tenant(TENANT).await.unwrap(), 1);
        assert_eq!(db.sales().count_for_tenant(OTHER_TENANT).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_fetch_month_empty_is_ok() {
        let db = test_db().await;
        let window = MonthWindow::containing(ts(2026, 8, 15, 12, 0, 0));
        let rows = db.sales().fetch_month(TENANT, &window).await.unwrap();
        assert!(rows.is_empty());
    }
}
