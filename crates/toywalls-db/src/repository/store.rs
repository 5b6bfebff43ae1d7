//! # Store & Warehouse Repositories
//!
//! Both tables have the same shape (id, tenant, name), so both repositories
//! live here.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use toywalls_core::{Store, Warehouse};

/// Repository for store records.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    /// Creates a new StoreRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StoreRepository { pool }
    }

    /// Inserts a store.
    pub async fn insert(&self, store: &Store) -> DbResult<()> {
        debug!(id = %store.id, name = %store.name, "Inserting store");

        sqlx::query(
            r#"
            INSERT INTO stores (id, tenant_id, name, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&store.id)
        .bind(&store.tenant_id)
        .bind(&store.name)
        .bind(store.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists all stores of a tenant, oldest first.
    pub async fn list_for_tenant(&self, tenant_id: &str) -> DbResult<Vec<Store>> {
        let stores = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT id, tenant_id, name, created_at
            FROM stores
            WHERE tenant_id = ?1
            ORDER BY datetime(created_at)
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stores.into_iter().map(Store::from).collect())
    }
}

/// Repository for warehouse records.
#[derive(Debug, Clone)]
pub struct WarehouseRepository {
    pool: SqlitePool,
}

impl WarehouseRepository {
    /// Creates a new WarehouseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        WarehouseRepository { pool }
    }

    /// Inserts a warehouse.
    pub async fn insert(&self, warehouse: &Warehouse) -> DbResult<()> {
        debug!(id = %warehouse.id, name = %warehouse.name, "Inserting warehouse");

        sqlx::query(
            r#"
            INSERT INTO warehouses (id, tenant_id, name, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&warehouse.id)
        .bind(&warehouse.tenant_id)
        .bind(&warehouse.name)
        .bind(warehouse.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists all warehouses of a tenant, oldest first.
    pub async fn list_for_tenant(&self, tenant_id: &str) -> DbResult<Vec<Warehouse>> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT id, tenant_id, name, created_at
            FROM warehouses
            WHERE tenant_id = ?1
            ORDER BY datetime(created_at)
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Warehouse {
                id: r.id,
                tenant_id: r.tenant_id,
                name: r.name,
                created_at: r.created_at,
            })
            .collect())
    }
}

/// Flat row shared by both tables (identical columns).
#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: String,
    tenant_id: String,
    name: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<StoreRow> for Store {
    fn from(r: StoreRow) -> Self {
        Store {
            id: r.id,
            tenant_id: r.tenant_id,
            name: r.name,
            created_at: r.created_at,
        }
    }
}
