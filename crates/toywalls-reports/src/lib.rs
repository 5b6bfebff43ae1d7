//! # toywalls-reports: Monthly Report Pipeline for Toys Walls
//!
//! Ties the reporting pipeline together for one tenant dashboard:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Monthly Report Pipeline                           │
//! │                                                                         │
//! │   toywalls-db              toywalls-core            THIS CRATE         │
//! │  ┌────────────┐   rows   ┌────────────────┐  agg   ┌───────────────┐   │
//! │  │ fetch_month│ ───────► │ aggregate      │ ─────► │ ReportRunner  │   │
//! │  │ (SQLite)   │          │ chart builders │        │  • staleness  │   │
//! │  └────────────┘          │ summary        │        │  • degrade    │   │
//! │                          └────────────────┘        │  • ChartSlot  │   │
//! │                                                     └───────┬───────┘   │
//! │                                                             │           │
//! │                                                             ▼           │
//! │                                              ChartBackend (external     │
//! │                                              charting library seam)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`render`] - Chart backend seam and the owned chart lifecycle
//! - [`runner`] - Per-view orchestration: fetch, aggregate, render, summarize
//!
//! ## Usage
//!
//! ```rust,ignore
//! use toywalls_reports::{ReportRunner, ReportView};
//!
//! let runner = ReportRunner::new(db, backend);
//! let outcome = runner
//!     .run(ReportView::SalesByStoreByDay, tenant_id, chrono::Utc::now())
//!     .await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod render;
pub mod runner;

// =============================================================================
// Re-exports
// =============================================================================

pub use render::{ChartBackend, ChartHandle, ChartSlot, RenderError};
pub use runner::{ReportOutcome, ReportRunner, ReportView};
