//! # Toy Repository
//!
//! Catalog operations. The store/warehouse assignment set here is what the
//! monthly sales fetch joins through: a sale belongs to a store only
//! indirectly, via its toy.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use toywalls_core::Toy;

/// Repository for the toy catalog.
#[derive(Debug, Clone)]
pub struct ToyRepository {
    pool: SqlitePool,
}

impl ToyRepository {
    /// Creates a new ToyRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ToyRepository { pool }
    }

    /// Inserts a toy.
    pub async fn insert(&self, toy: &Toy) -> DbResult<()> {
        debug!(id = %toy.id, name = %toy.name, "Inserting toy");

        sqlx::query(
            r#"
            INSERT INTO toys (
                id, tenant_id, name, store_id, warehouse_id,
                price_cents, quantity, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&toy.id)
        .bind(&toy.tenant_id)
        .bind(&toy.name)
        .bind(&toy.store_id)
        .bind(&toy.warehouse_id)
        .bind(toy.price_cents)
        .bind(toy.quantity)
        .bind(toy.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists all toys of a tenant, oldest first.
    pub async fn list_for_tenant(&self, tenant_id: &str) -> DbResult<Vec<Toy>> {
        let rows = sqlx::query_as::<_, ToyRow>(
            r#"
            SELECT id, tenant_id, name, store_id, warehouse_id,
                   price_cents, quantity, created_at
            FROM toys
            WHERE tenant_id = ?1
            ORDER BY datetime(created_at)
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Toy::from).collect())
    }

    /// Updates a toy's store and warehouse assignment.
    pub async fn set_assignments(
        &self,
        toy_id: &str,
        store_id: Option<&str>,
        warehouse_id: Option<&str>,
    ) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE toys SET store_id = ?2, warehouse_id = ?3
            WHERE id = ?1
            "#,
        )
        .bind(toy_id)
        .bind(store_id)
        .bind(warehouse_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Toy", toy_id));
        }

        Ok(())
    }

    /// Adjusts stock on hand by a signed delta.
    pub async fn adjust_stock(&self, toy_id: &str, delta: i64) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE toys SET quantity = quantity + ?2
            WHERE id = ?1
            "#,
        )
        .bind(toy_id)
        .bind(delta)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Toy", toy_id));
        }

        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ToyRow {
    id: String,
    tenant_id: String,
    name: String,
    store_id: Option<String>,
    warehouse_id: Option<String>,
    price_cents: i64,
    quantity: i64,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ToyRow> for Toy {
    fn from(r: ToyRow) -> Self {
        Toy {
            id: r.id,
            tenant_id: r.tenant_id,
            name: r.name,
            store_id: r.store_id,
            warehouse_id: r.warehouse_id,
            price_cents: r.price_cents,
            quantity: r.quantity,
            created_at: r.created_at,
        }
    }
}
