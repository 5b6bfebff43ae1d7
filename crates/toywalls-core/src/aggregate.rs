//! # Dimensional Aggregator
//!
//! Folds a month of enriched sales into nested count/total mappings, ready
//! for charting and summarizing.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       One Aggregation Pass                              │
//! │                                                                         │
//! │  Vec<SaleRecord> ──► by_store(DayOfMonth)  ──► Aggregate               │
//! │                  ──► by_store(HourOfDay)   ──► Aggregate               │
//! │                  ──► by_employee()         ──► Aggregate               │
//! │                                                                         │
//! │  Aggregate = insertion-ordered groups, each with dense buckets:        │
//! │                                                                         │
//! │    Group "store-a"  [d1][d2][d3]...[dN]   (N = days in month)          │
//! │    Group "store-b"  [d1][d2][d3]...[dN]                                │
//! │                      │                                                  │
//! │                      └── Bucket { count, total }                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contracts
//! - Single linear pass over the input; no sorting, no second scan.
//! - Group iteration order is **insertion order**. Chart legends show it,
//!   so it is part of the public contract.
//! - Every time bucket is pre-initialized to zero the moment its group is
//!   created, so sparse data still yields a complete axis.
//! - A sale with no resolvable outer key is skipped and counted in
//!   [`Aggregate::skipped`]; an out-of-range time subkey is ignored.

use crate::calendar::MonthWindow;
use crate::money::Money;
use crate::types::SaleRecord;

// =============================================================================
// Dimensions
// =============================================================================

/// Time dimension of a by-store report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeDimension {
    /// One bucket per day of the month, 1..=days-in-month.
    DayOfMonth,
    /// One bucket per hour of the day, 0..=23.
    HourOfDay,
}

impl TimeDimension {
    /// Number of buckets each group carries for this dimension.
    pub fn bucket_count(&self, window: &MonthWindow) -> usize {
        match self {
            TimeDimension::DayOfMonth => window.days() as usize,
            TimeDimension::HourOfDay => 24,
        }
    }
}

// =============================================================================
// Buckets and Groups
// =============================================================================

/// Accumulator for one time slot (or one whole entity): units and money.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bucket {
    /// Units sold into this slot.
    pub count: i64,
    /// Monetary total of this slot.
    pub total: Money,
}

impl Bucket {
    fn absorb(&mut self, sale: &SaleRecord) {
        self.count += sale.effective_quantity();
        self.total += sale.line_total();
    }
}

/// One outer key of an aggregate: a store or an employee, with its buckets.
#[derive(Debug, Clone)]
pub struct Group {
    key: String,
    name: String,
    buckets: Vec<Bucket>,
}

impl Group {
    fn new(key: &str, name: &str, bucket_count: usize) -> Self {
        Group {
            key: key.to_string(),
            name: name.to_string(),
            buckets: vec![Bucket::default(); bucket_count],
        }
    }

    /// Grouping key (store id or employee id).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display name for legends and summaries.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dense bucket slice; index 0 is day 1 / hour 0.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Units across all buckets of the group.
    pub fn cumulative_count(&self) -> i64 {
        self.buckets.iter().map(|b| b.count).sum()
    }

    /// Money across all buckets of the group.
    pub fn cumulative_total(&self) -> Money {
        self.buckets.iter().map(|b| b.total).sum()
    }
}

// =============================================================================
// Aggregate
// =============================================================================

/// The full result of one aggregation pass.
///
/// Groups are held in the order they were first seen. Lookups scan
/// linearly; a report never has more than a handful of stores or employees,
/// so an index structure would cost more than it saves.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    groups: Vec<Group>,
    skipped: usize,
}

impl Aggregate {
    /// True when no sale produced a group.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in insertion order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Sales dropped because their outer key did not resolve
    /// (toy without a store, sale without an employee).
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Looks a group up by key.
    pub fn get(&self, key: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.key == key)
    }

    /// Returns the group for `key`, creating it (with zeroed buckets) on
    /// first sight. Creation order is preserved.
    fn group_mut(&mut self, key: &str, name: &str, bucket_count: usize) -> &mut Group {
        let pos = match self.groups.iter().position(|g| g.key == key) {
            Some(pos) => pos,
            None => {
                self.groups.push(Group::new(key, name, bucket_count));
                self.groups.len() - 1
            }
        };
        &mut self.groups[pos]
    }
}

// =============================================================================
// Aggregation Passes
// =============================================================================

/// Groups sales by store, bucketed by the given time dimension.
///
/// A sale whose toy has no store assignment is skipped (and counted).
/// A sale whose subkey falls outside the bucket domain is ignored after its
/// group exists; with a correctly windowed fetch this cannot happen.
pub fn by_store(sales: &[SaleRecord], dim: TimeDimension, window: &MonthWindow) -> Aggregate {
    let bucket_count = dim.bucket_count(window);
    let mut agg = Aggregate::default();

    for sale in sales {
        let Some(store) = &sale.store else {
            agg.skipped += 1;
            continue;
        };

        let group = agg.group_mut(&store.id, &store.name, bucket_count);

        let idx = match dim {
            TimeDimension::DayOfMonth => match window.day_index(sale.sold_at) {
                Some(idx) => idx,
                None => continue,
            },
            TimeDimension::HourOfDay => MonthWindow::hour_index(sale.sold_at),
        };

        if let Some(bucket) = group.buckets.get_mut(idx) {
            bucket.absorb(sale);
        }
    }

    agg
}

/// Groups sales by employee: one bucket per employee, no time subkey.
///
/// A sale without an employee is skipped (and counted).
pub fn by_employee(sales: &[SaleRecord]) -> Aggregate {
    let mut agg = Aggregate::default();

    for sale in sales {
        let Some(employee) = &sale.employee else {
            agg.skipped += 1;
            continue;
        };

        let group = agg.group_mut(&employee.id, &employee.name, 1);
        group.buckets[0].absorb(sale);
    }

    agg
}

// =============================================================================
// Unit Tests
// =============================================================================
