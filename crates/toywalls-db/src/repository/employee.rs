//! # Employee Repository

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use toywalls_core::Employee;

/// Repository for employee records.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    /// Creates a new EmployeeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EmployeeRepository { pool }
    }

    /// Inserts an employee.
    pub async fn insert(&self, employee: &Employee) -> DbResult<()> {
        debug!(id = %employee.id, name = %employee.name, "Inserting employee");

        sqlx::query(
            r#"
            INSERT INTO employees (id, tenant_id, name, code, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.tenant_id)
        .bind(&employee.name)
        .bind(&employee.code)
        .bind(employee.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists all employees of a tenant, oldest first.
    pub async fn list_for_tenant(&self, tenant_id: &str) -> DbResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, tenant_id, name, code, created_at
            FROM employees
            WHERE tenant_id = ?1
            ORDER BY datetime(created_at)
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id: String,
    tenant_id: String,
    name: String,
    code: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<EmployeeRow> for Employee {
    fn from(r: EmployeeRow) -> Self {
        Employee {
            id: r.id,
            tenant_id: r.tenant_id,
            name: r.name,
            code: r.code,
            created_at: r.created_at,
        }
    }
}
