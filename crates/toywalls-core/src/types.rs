//! # Domain Types
//!
//! Core domain types used throughout Toys Walls.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Storage rows (mirror the backend tables, tenant-scoped):              │
//! │    Store · Warehouse · Employee · Toy · Sale                           │
//! │                                                                         │
//! │  Enriched read model (one joined row per sale):                        │
//! │    SaleRecord ── store: Option<EntityRef>       (via toy)              │
//! │               ├─ warehouse: Option<EntityRef>   (via toy)              │
//! │               └─ employee: Option<EmployeeRef>                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Optional relations
//! A sale reaches its store indirectly (sale → toy → store) and both hops
//! are nullable in the backend. The read model makes that explicit: `store`
//! is an `Option<EntityRef>` with a defined fallback (the aggregates skip
//! the sale), not a safe-navigation chain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Storage Rows
// =============================================================================

/// A physical store of the tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Tenant this store belongs to.
    pub tenant_id: String,

    /// Display name shown in report legends and summaries.
    pub name: String,

    /// When the store was created.
    pub created_at: DateTime<Utc>,
}

/// A warehouse of the tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Tenant this warehouse belongs to.
    pub tenant_id: String,

    /// Display name.
    pub name: String,

    /// When the warehouse was created.
    pub created_at: DateTime<Utc>,
}

/// An employee record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Tenant this employee belongs to.
    pub tenant_id: String,

    /// Display name shown in the employee report.
    pub name: String,

    /// Business code (badge/payroll number). Optional.
    pub code: Option<String>,

    /// When the employee was created.
    pub created_at: DateTime<Utc>,
}

/// A toy in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Toy {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Tenant this toy belongs to.
    pub tenant_id: String,

    /// Display name.
    pub name: String,

    /// Store the toy is assigned to, if any.
    pub store_id: Option<String>,

    /// Warehouse the toy is assigned to, if any.
    pub warehouse_id: Option<String>,

    /// Catalog price in centavos.
    pub price_cents: i64,

    /// Stock on hand.
    pub quantity: i64,

    /// When the toy was created.
    pub created_at: DateTime<Utc>,
}

/// A recorded sale (storage shape, pre-join).
///
/// `unit_price` and `quantity` are optional on purpose: the backend accepts
/// rows without them and the reporting layer coerces rather than rejects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Tenant this sale belongs to.
    pub tenant_id: String,

    /// Toy that was sold.
    pub toy_id: String,

    /// Employee who made the sale, if recorded.
    pub employee_id: Option<String>,

    /// Unit price at sale time, major units. Nullable in the backend.
    pub unit_price: Option<f64>,

    /// Units sold. Nullable in the backend; treated as 1 when absent.
    pub quantity: Option<i64>,

    /// When the sale happened.
    pub sold_at: DateTime<Utc>,

    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Enriched Read Model
// =============================================================================

/// Reference to a named entity (store or warehouse) reached through a join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: String,
    pub name: String,
}

/// Reference to the employee on a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRef {
    pub id: String,
    pub name: String,
    pub code: Option<String>,
}

/// One sale enriched with its toy's store/warehouse and its employee.
///
/// This is the read model of the monthly fetch: every row the aggregator
/// consumes has this shape. Relations that did not resolve are `None`, and
/// the aggregates decide what that means (skip, with a count).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Sale id.
    pub id: String,

    /// When the sale happened. Drives the day-of-month and hour buckets.
    pub sold_at: DateTime<Utc>,

    /// Unit price at sale time (major units), if recorded.
    pub unit_price: Option<f64>,

    /// Units sold, if recorded.
    pub quantity: Option<i64>,

    /// Store reached via the toy, if assigned.
    pub store: Option<EntityRef>,

    /// Warehouse reached via the toy, if assigned.
    pub warehouse: Option<EntityRef>,

    /// Employee on the sale, if recorded.
    pub employee: Option<EmployeeRef>,
}

impl SaleRecord {
    /// Units this sale contributes to a bucket. Missing quantity counts as 1.
    #[inline]
    pub fn effective_quantity(&self) -> i64 {
        self.quantity.unwrap_or(1)
    }

    /// Unit price with the coercion policy applied: missing or non-finite
    /// prices count as zero.
    #[inline]
    pub fn effective_unit_price(&self) -> f64 {
        match self.unit_price {
            Some(p) if p.is_finite() => p,
            _ => 0.0,
        }
    }

    /// Monetary contribution of this sale: price × quantity.
    pub fn line_total(&self) -> Money {
        Money::from_backend_amount(self.effective_unit_price()) * self.effective_quantity()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(price: Option<f64>, qty: Option<i64>) -> SaleRecord {
        SaleRecord {
            id: "s1".to_string(),
            sold_at: Utc.with_ymd_and_hms(2026, 8, 3, 10, 0, 0).unwrap(),
            unit_price: price,
            quantity: qty,
            store: None,
            warehouse: None,
            employee: None,
        }
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        assert_eq!(record(Some(99.5), None).effective_quantity(), 1);
        assert_eq!(record(Some(99.5), Some(4)).effective_quantity(), 4);
    }

    #[test]
    fn test_price_coercion() {
        assert_eq!(record(None, Some(2)).effective_unit_price(), 0.0);
        assert_eq!(record(Some(f64::NAN), Some(2)).effective_unit_price(), 0.0);
        assert_eq!(record(Some(10.0), Some(2)).effective_unit_price(), 10.0);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(record(Some(10.0), Some(2)).line_total().cents(), 2000);
        // Missing quantity: price 99.5 contributes exactly 99.50
        assert_eq!(record(Some(99.5), None).line_total().cents(), 9950);
        assert_eq!(record(None, Some(7)).line_total().cents(), 0);
    }
}
