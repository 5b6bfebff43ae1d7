//! # toywalls-db: Database Layer for Toys Walls
//!
//! This crate provides database access for the Toys Walls reporting system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Toys Walls Data Flow                               │
//! │                                                                         │
//! │  ReportRunner (toywalls-reports)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   toywalls-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │   (sale.rs)   │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ SaleRepo      │    │ 001_init.sql │  │   │
//! │  │   │ WAL, FKs on   │    │ StoreRepo ... │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database (one file per deployment; :memory: in tests)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (store, employee, toy, sale)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use toywalls_db::{Database, DbConfig};
//! use toywalls_core::MonthWindow;
//!
//! let db = Database::new(DbConfig::new("path/to/toywalls.db")).await?;
//!
//! let window = MonthWindow::containing(chrono::Utc::now());
//! let sales = db.sales().fetch_month("tenant-id", &window).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::employee::EmployeeRepository;
pub use repository::sale::SaleRepository;
pub use repository::store::{StoreRepository, WarehouseRepository};
pub use repository::toy::ToyRepository;
