//! # toywalls-core: Pure Business Logic for Toys Walls
//!
//! This crate is the heart of the Toys Walls monthly reporting pipeline.
//! Everything here is a pure function over its inputs: no database, no
//! network, no rendering.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Toys Walls Report Pipeline                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 toywalls-db (Database Layer)                    │   │
//! │  │     fetch_month: tenant + window → Vec<SaleRecord>              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ toywalls-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ calendar  │  │ aggregate │  │   chart   │  │  summary  │  │   │
//! │  │   │MonthWindow│  │  by_store │  │ChartConfig│  │best group │  │   │
//! │  │   │ day/hour  │  │by_employee│  │  palette  │  │  es-CO    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO RENDERING • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               toywalls-reports (Service Layer)                  │   │
//! │  │     runner: fetch → aggregate → (render chart, summarize)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Store, Employee, Toy, Sale, SaleRecord)
//! - [`money`] - Money type with integer centavos and es-CO formatting
//! - [`calendar`] - Month window math (bounds, day/hour bucket indices)
//! - [`aggregate`] - The dimensional aggregator (by store/day, store/hour,
//!   employee)
//! - [`chart`] - Declarative chart configuration builders
//! - [`summary`] - Best-performer scan and localized summary sentence
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, every time
//! 2. **Coerce, don't reject**: missing quantity is 1, missing price is 0;
//!    a dashboard never errors over a sloppy row
//! 3. **Integer Money**: backend floats convert to centavos once, at the
//!    boundary
//! 4. **Insertion order is contract**: legend order mirrors first-seen order

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod calendar;
pub mod chart;
pub mod money;
pub mod summary;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use aggregate::{Aggregate, Bucket, Group, TimeDimension};
pub use calendar::MonthWindow;
pub use chart::ChartConfig;
pub use money::Money;
pub use summary::{BestPerformer, ReportSubject};
pub use types::*;
