//! # Summary Formatter
//!
//! One pass over an aggregate to find the best-performing group and render
//! a single localized sentence for the dashboard header.
//!
//! ## Tie-break contract
//! The winner is the group whose cumulative count is **strictly greater**
//! than the running best. Ties therefore go to the first-inserted group.
//! This matches the observable behavior of the production dashboards and
//! must not be "fixed" into a greater-or-equal or stable-sort rule.

use crate::aggregate::Aggregate;
use crate::money::Money;

/// What kind of entity a report ranks. Picks the noun of the sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSubject {
    Store,
    Employee,
}

/// The winning group of a summary scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestPerformer {
    /// Grouping key (store id or employee id).
    pub key: String,
    /// Display name.
    pub name: String,
    /// Cumulative units across all buckets.
    pub count: i64,
    /// Cumulative money across all buckets.
    pub total: Money,
}

/// Scans the aggregate once and returns the group with the highest
/// cumulative count, or `None` when no group sold a single unit.
///
/// Strictly-greater comparison: first-seen wins ties, and a group with a
/// zero count can never win.
pub fn best_performer(agg: &Aggregate) -> Option<BestPerformer> {
    let mut best: Option<BestPerformer> = None;

    for group in agg.groups() {
        let count = group.cumulative_count();
        if count > best.as_ref().map_or(0, |b| b.count) {
            best = Some(BestPerformer {
                key: group.key().to_string(),
                name: group.name().to_string(),
                count,
                total: group.cumulative_total(),
            });
        }
    }

    best
}

/// Sentence shown when the month has no usable data.
pub const NO_DATA_MESSAGE: &str = "No hay datos disponibles para este mes.";

/// Renders the one-line Spanish summary for a report.
///
/// ## Example
/// ```rust
/// use toywalls_core::{aggregate, summary, ReportSubject};
///
/// let agg = aggregate::by_employee(&[]);
/// assert_eq!(
///     summary::format_summary(&agg, ReportSubject::Employee),
///     "No hay datos disponibles para este mes."
/// );
/// ```
pub fn format_summary(agg: &Aggregate, subject: ReportSubject) -> String {
    let Some(best) = best_performer(agg) else {
        return NO_DATA_MESSAGE.to_string();
    };

    let noun = match subject {
        ReportSubject::Store => "La tienda con mejor desempeño es",
        ReportSubject::Employee => "El empleado con mejor desempeño es",
    };

    format!(
        "{noun} {}, con {} unidades vendidas y un total de {}.",
        best.name,
        best.count,
        best.total.format_es_co()
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
