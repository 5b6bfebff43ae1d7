//! # Report Runner
//!
//! Executes one report view end to end:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     run(view, tenant, now)                              │
//! │                                                                         │
//! │  1. bump the view's generation counter (this request is now "latest")  │
//! │  2. fetch the month of sales        ── failure? warn + empty rows      │
//! │  3. stale check                     ── a newer request started? STOP   │
//! │  4. aggregate + build chart config + format summary (pure, core)       │
//! │  5. under the slot lock: stale check again, then                       │
//! │       non-empty → draw, destroy-and-replace the view's chart           │
//! │       empty     → clear the view's chart (placeholder territory)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Degradation policy
//! A reporting widget must never block or crash the surrounding page. A
//! failed fetch resolves to an empty result set ("no data"), a missing
//! render target is a silent no-op, and nothing here returns an error to
//! the caller.
//!
//! ## Staleness
//! The surrounding application does not normally issue concurrent runs of
//! the same view, but if it does, the later request wins: each view keeps
//! a generation counter, and a run whose generation is no longer current
//! discards its result instead of overwriting a newer chart.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::render::{ChartBackend, ChartHandle, ChartSlot, RenderError};
use toywalls_core::{aggregate, chart, summary, MonthWindow, ReportSubject, TimeDimension};
use toywalls_db::Database;

// =============================================================================
// Views
// =============================================================================

/// The three report views of the monthly dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportView {
    /// Units per store per day of the month.
    SalesByStoreByDay,
    /// Units per store per hour of the day.
    SalesByStoreByHour,
    /// Units and money per employee, dual axis.
    SalesByEmployee,
}

impl ReportView {
    /// All views, in dashboard order.
    pub const ALL: [ReportView; 3] = [
        ReportView::SalesByStoreByDay,
        ReportView::SalesByStoreByHour,
        ReportView::SalesByEmployee,
    ];

    /// Render target the view's chart mounts onto.
    pub fn target(&self) -> &'static str {
        match self {
            ReportView::SalesByStoreByDay => "chart-store-by-day",
            ReportView::SalesByStoreByHour => "chart-store-by-hour",
            ReportView::SalesByEmployee => "chart-by-employee",
        }
    }

    /// Chart title, localized.
    pub fn title(&self) -> &'static str {
        match self {
            ReportView::SalesByStoreByDay => "Ventas del mes por tienda (por día)",
            ReportView::SalesByStoreByHour => "Ventas del mes por tienda (por hora)",
            ReportView::SalesByEmployee => "Ventas del mes por empleado",
        }
    }

    fn subject(&self) -> ReportSubject {
        match self {
            ReportView::SalesByStoreByDay | ReportView::SalesByStoreByHour => ReportSubject::Store,
            ReportView::SalesByEmployee => ReportSubject::Employee,
        }
    }

    fn index(&self) -> usize {
        match self {
            ReportView::SalesByStoreByDay => 0,
            ReportView::SalesByStoreByHour => 1,
            ReportView::SalesByEmployee => 2,
        }
    }
}

// =============================================================================
// Outcome
// =============================================================================

/// What a report run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The run completed and its result is on screen.
    Rendered {
        /// Localized one-line summary (or the "no data" sentence).
        summary: String,
        /// Whether a chart was mounted. False when the month was empty or
        /// the render target is absent; the caller shows a placeholder.
        chart_drawn: bool,
        /// Sales fetched for the month.
        sales: usize,
        /// Sales dropped for lacking the view's grouping key.
        skipped: usize,
    },
    /// A newer request for the same view started while this one was in
    /// flight; this result was discarded.
    Stale,
}

// =============================================================================
// Runner
// =============================================================================

/// One slot per view; at most one live chart per render target.
struct ViewSlots<H: ChartHandle> {
    slots: [ChartSlot<H>; 3],
}

impl<H: ChartHandle> ViewSlots<H> {
    fn new() -> Self {
        ViewSlots {
            slots: [ChartSlot::new(), ChartSlot::new(), ChartSlot::new()],
        }
    }

    fn slot_mut(&mut self, view: ReportView) -> &mut ChartSlot<H> {
        &mut self.slots[view.index()]
    }
}

/// Orchestrates the monthly report pipeline for one tenant dashboard.
pub struct ReportRunner<B: ChartBackend> {
    db: Database,
    backend: B,
    /// Per-view request generations; see module docs on staleness.
    generations: [AtomicU64; 3],
    slots: Mutex<ViewSlots<B::Handle>>,
}

impl<B: ChartBackend> ReportRunner<B> {
    /// Creates a runner over a database handle and a chart backend.
    pub fn new(db: Database, backend: B) -> Self {
        ReportRunner {
            db,
            backend,
            generations: [AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0)],
            slots: Mutex::new(ViewSlots::new()),
        }
    }

    /// Runs one view for the month containing `now`.
    pub async fn run(&self, view: ReportView, tenant_id: &str, now: DateTime<Utc>) -> ReportOutcome {
        let generation = self.next_generation(view);
        self.run_at_generation(generation, view, tenant_id, now).await
    }

    /// Marks a new request for the view and returns its generation.
    fn next_generation(&self, view: ReportView) -> u64 {
        self.generations[view.index()].fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True while no newer request for the view has started.
    fn is_current(&self, view: ReportView, generation: u64) -> bool {
        self.generations[view.index()].load(Ordering::SeqCst) == generation
    }

    async fn run_at_generation(
        &self,
        generation: u64,
        view: ReportView,
        tenant_id: &str,
        now: DateTime<Utc>,
    ) -> ReportOutcome {
        let window = MonthWindow::containing(now);

        // Fetch failure degrades to "no data"; the dashboard never errors.
        let rows = match self.db.sales().fetch_month(tenant_id, &window).await {
            Ok(rows) => rows,
            Err(err) => {
                warn!(view = ?view, error = %err, "Sales fetch failed; rendering empty report");
                Vec::new()
            }
        };

        if !self.is_current(view, generation) {
            debug!(view = ?view, generation, "Discarding stale report run");
            return ReportOutcome::Stale;
        }

        let (agg, config) = match view {
            ReportView::SalesByStoreByDay => {
                let agg = aggregate::by_store(&rows, TimeDimension::DayOfMonth, &window);
                let config =
                    chart::store_time_chart(&agg, TimeDimension::DayOfMonth, &window, view.title());
                (agg, config)
            }
            ReportView::SalesByStoreByHour => {
                let agg = aggregate::by_store(&rows, TimeDimension::HourOfDay, &window);
                let config =
                    chart::store_time_chart(&agg, TimeDimension::HourOfDay, &window, view.title());
                (agg, config)
            }
            ReportView::SalesByEmployee => {
                let agg = aggregate::by_employee(&rows);
                let config = chart::employee_chart(&agg, view.title());
                (agg, config)
            }
        };

        let summary = summary::format_summary(&agg, view.subject());

        let mut slots = self.slots.lock().await;

        // Re-check under the lock: a newer run may have rendered meanwhile.
        if !self.is_current(view, generation) {
            debug!(view = ?view, generation, "Discarding stale report run (post-lock)");
            return ReportOutcome::Stale;
        }

        let chart_drawn = match config {
            Some(config) => match self.backend.draw(view.target(), &config) {
                Ok(handle) => {
                    slots.slot_mut(view).replace(handle);
                    true
                }
                Err(RenderError::TargetMissing { target }) => {
                    // Page without this widget: a no-op, not an error
                    debug!(view = ?view, target = %target, "Render target absent; skipping");
                    false
                }
                Err(err) => {
                    warn!(view = ?view, error = %err, "Chart backend failed; skipping render");
                    false
                }
            },
            None => {
                // Empty month: destroy any previous chart so a stale one
                // does not linger behind the placeholder
                slots.slot_mut(view).clear();
                false
            }
        };

        info!(
            view = ?view,
            sales = rows.len(),
            skipped = agg.skipped(),
            chart_drawn,
            "Report run complete"
        );

        ReportOutcome::Rendered {
            summary,
            chart_drawn,
            sales: rows.len(),
            skipped: agg.skipped(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use toywalls_core::{summary::NO_DATA_MESSAGE, ChartConfig, Employee, Sale, Store, Toy};
    use toywalls_db::DbConfig;
    use uuid::Uuid;

    const TENANT: &str = "tenant-1";

    // -------------------------------------------------------------------
    // Mock chart backend
    // -------------------------------------------------------------------

    struct MockHandle {
        live: Arc<AtomicUsize>,
        destroyed: bool,
    }

    impl ChartHandle for MockHandle {
        fn destroy(&mut self) {
            if !self.destroyed {
                self.destroyed = true;
                self.live.fetch_sub(1, Ordering::SeqCst);
            }
        }
    }

    struct MockBackend {
        live: Arc<AtomicUsize>,
        draws: Arc<AtomicUsize>,
        missing_target: bool,
    }

    impl MockBackend {
        fn new() -> (Self, Arc<AtomicUsize>) {
            let live = Arc::new(AtomicUsize::new(0));
            let backend = MockBackend {
                live: Arc::clone(&live),
                draws: Arc::new(AtomicUsize::new(0)),
                missing_target: false,
            };
            (backend, live)
        }
    }

    impl ChartBackend for MockBackend {
        type Handle = MockHandle;

        fn draw(&self, target: &str, _config: &ChartConfig) -> Result<MockHandle, RenderError> {
            if self.missing_target {
                return Err(RenderError::TargetMissing {
                    target: target.to_string(),
                });
            }
            self.draws.fetch_add(1, Ordering::SeqCst);
            self.live.fetch_add(1, Ordering::SeqCst);
            Ok(MockHandle {
                live: Arc::clone(&self.live),
                destroyed: false,
            })
        }
    }

    // -------------------------------------------------------------------
    // Fixtures
    // -------------------------------------------------------------------

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap()
    }

    async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let store_id = Uuid::new_v4().to_string();
        db.stores()
            .insert(&Store {
                id: store_id.clone(),
                tenant_id: TENANT.to_string(),
                name: "Tienda Norte".to_string(),
                created_at: now(),
            })
            .await
            .unwrap();

        let employee_id = Uuid::new_v4().to_string();
        db.employees()
            .insert(&Employee {
                id: employee_id.clone(),
                tenant_id: TENANT.to_string(),
                name: "Marta Ruiz".to_string(),
                code: Some("E-001".to_string()),
                created_at: now(),
            })
            .await
            .unwrap();

        let toy_id = Uuid::new_v4().to_string();
        db.toys()
            .insert(&Toy {
                id: toy_id.clone(),
                tenant_id: TENANT.to_string(),
                name: "Cubo mágico".to_string(),
                store_id: Some(store_id),
                warehouse_id: None,
                price_cents: 1500,
                quantity: 10,
                created_at: now(),
            })
            .await
            .unwrap();

        for (day, qty, price) in [(3u32, 2i64, 10.0f64), (3, 1, 5.0), (5, 4, 20.0)] {
            db.sales()
                .record(&Sale {
                    id: Uuid::new_v4().to_string(),
                    tenant_id: TENANT.to_string(),
                    toy_id: toy_id.clone(),
                    employee_id: Some(employee_id.clone()),
                    unit_price: Some(price),
                    quantity: Some(qty),
                    sold_at: Utc.with_ymd_and_hms(2026, 8, day, 10, 0, 0).unwrap(),
                    created_at: now(),
                })
                .await
                .unwrap();
        }

        db
    }

    // -------------------------------------------------------------------
    // Tests
    // -------------------------------------------------------------------

    #[tokio::test]
    async fn test_run_renders_and_summarizes() {
        let (backend, live) = MockBackend::new();
        let runner = ReportRunner::new(seeded_db().await, backend);

        let outcome = runner.run(ReportView::SalesByStoreByDay, TENANT, now()).await;

        match outcome {
            ReportOutcome::Rendered {
                summary,
                chart_drawn,
                sales,
                skipped,
            } => {
                assert!(chart_drawn);
                assert_eq!(sales, 3);
                assert_eq!(skipped, 0);
                assert!(summary.contains("Tienda Norte"), "got: {summary}");
                assert!(summary.contains("$105,00"), "got: {summary}"); // 2×10 + 1×5 + 4×20
            }
            ReportOutcome::Stale => panic!("unexpected stale outcome"),
        }
        assert_eq!(live.load(Ordering::SeqCst), 1);
    }

    /// Two runs of the same view leave exactly one live chart.
    #[tokio::test]
    async fn test_rerender_is_idempotent() {
        let (backend, live) = MockBackend::new();
        let runner = ReportRunner::new(seeded_db().await, backend);

        runner.run(ReportView::SalesByStoreByHour, TENANT, now()).await;
        runner.run(ReportView::SalesByStoreByHour, TENANT, now()).await;

        assert_eq!(live.load(Ordering::SeqCst), 1);
    }

    /// Different views own different slots: three charts total.
    #[tokio::test]
    async fn test_views_have_independent_slots() {
        let (backend, live) = MockBackend::new();
        let runner = ReportRunner::new(seeded_db().await, backend);

        for view in ReportView::ALL {
            runner.run(view, TENANT, now()).await;
        }

        assert_eq!(live.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_month_renders_no_chart() {
        let (backend, live) = MockBackend::new();
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let runner = ReportRunner::new(db, backend);

        let outcome = runner.run(ReportView::SalesByEmployee, TENANT, now()).await;

        assert_eq!(
            outcome,
            ReportOutcome::Rendered {
                summary: NO_DATA_MESSAGE.to_string(),
                chart_drawn: false,
                sales: 0,
                skipped: 0,
            }
        );
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    /// An empty month clears the previously mounted chart.
    #[tokio::test]
    async fn test_empty_month_clears_previous_chart() {
        let (backend, live) = MockBackend::new();
        let runner = ReportRunner::new(seeded_db().await, backend);

        runner.run(ReportView::SalesByStoreByDay, TENANT, now()).await;
        assert_eq!(live.load(Ordering::SeqCst), 1);

        // A month with no sales
        let next_month = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap();
        let outcome = runner.run(ReportView::SalesByStoreByDay, TENANT, next_month).await;

        match outcome {
            ReportOutcome::Rendered { chart_drawn, .. } => assert!(!chart_drawn),
            ReportOutcome::Stale => panic!("unexpected stale outcome"),
        }
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    /// A closed pool makes the fetch fail; the report degrades to "no
    /// data" instead of erroring.
    #[tokio::test]
    async fn test_fetch_failure_degrades_to_empty() {
        let (backend, live) = MockBackend::new();
        let db = seeded_db().await;
        db.close().await;
        let runner = ReportRunner::new(db, backend);

        let outcome = runner.run(ReportView::SalesByStoreByDay, TENANT, now()).await;

        assert_eq!(
            outcome,
            ReportOutcome::Rendered {
                summary: NO_DATA_MESSAGE.to_string(),
                chart_drawn: false,
                sales: 0,
                skipped: 0,
            }
        );
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    /// A run superseded before it finishes discards its result.
    #[tokio::test]
    async fn test_stale_generation_is_discarded() {
        let (backend, live) = MockBackend::new();
        let runner = ReportRunner::new(seeded_db().await, backend);
        let view = ReportView::SalesByStoreByDay;

        let old_generation = runner.next_generation(view);
        let new_generation = runner.next_generation(view);

        let outcome = runner
            .run_at_generation(old_generation, view, TENANT, now())
            .await;
        assert_eq!(outcome, ReportOutcome::Stale);
        assert_eq!(live.load(Ordering::SeqCst), 0, "stale run must not render");

        let outcome = runner
            .run_at_generation(new_generation, view, TENANT, now())
            .await;
        assert!(matches!(outcome, ReportOutcome::Rendered { .. }));
        assert_eq!(live.load(Ordering::SeqCst), 1);
    }

    /// Generations are per view: a request for one view does not stale
    /// another view's in-flight run.
    #[tokio::test]
    async fn test_generations_are_per_view() {
        let (backend, _live) = MockBackend::new();
        let runner = ReportRunner::new(seeded_db().await, backend);

        let day_generation = runner.next_generation(ReportView::SalesByStoreByDay);
        runner.next_generation(ReportView::SalesByEmployee);

        let outcome = runner
            .run_at_generation(day_generation, ReportView::SalesByStoreByDay, TENANT, now())
            .await;
        assert!(matches!(outcome, ReportOutcome::Rendered { .. }));
    }

    /// A page without the widget: silent no-op, summary still produced.
    #[tokio::test]
    async fn test_missing_target_is_noop() {
        let (mut backend, live) = MockBackend::new();
        backend.missing_target = true;
        let runner = ReportRunner::new(seeded_db().await, backend);

        let outcome = runner.run(ReportView::SalesByEmployee, TENANT, now()).await;

        match outcome {
            ReportOutcome::Rendered {
                summary,
                chart_drawn,
                ..
            } => {
                assert!(!chart_drawn);
                assert!(summary.contains("Marta Ruiz"), "got: {summary}");
            }
            ReportOutcome::Stale => panic!("unexpected stale outcome"),
        }
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }
}
