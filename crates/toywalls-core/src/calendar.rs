//! # Month Window
//!
//! Calendar math for the monthly report window.
//!
//! Every report run covers exactly one calendar month: from the first
//! instant of day 1 to the last whole second of the last day, inclusive.
//! The window also tells the aggregator how many day buckets to
//! pre-initialize, so charts always render a complete x-axis even when no
//! sale fell on a given day.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

/// The inclusive bounds of one calendar month, plus its length in days.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use toywalls_core::MonthWindow;
///
/// let now = Utc.with_ymd_and_hms(2026, 2, 14, 9, 30, 0).unwrap();
/// let window = MonthWindow::containing(now);
///
/// assert_eq!(window.days(), 28);
/// assert_eq!(window.start().to_rfc3339(), "2026-02-01T00:00:00+00:00");
/// assert_eq!(window.end().to_rfc3339(), "2026-02-28T23:59:59+00:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    days: u32,
}

impl MonthWindow {
    /// Builds the window of the month containing `now`.
    pub fn containing(now: DateTime<Utc>) -> Self {
        let year = now.year();
        let month = now.month();
        let days = days_in_month(year, month);

        // The Utc mapping of a valid calendar date is always unambiguous,
        // so `single()` cannot miss; `now` is a non-panicking fallback.
        let start = Utc
            .with_ymd_and_hms(year, month, 1, 0, 0, 0)
            .single()
            .unwrap_or(now);
        let end = Utc
            .with_ymd_and_hms(year, month, days, 23, 59, 59)
            .single()
            .unwrap_or(now);

        MonthWindow { start, end, days }
    }

    /// First instant of the month (day 1, 00:00:00).
    #[inline]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Last whole second of the month (last day, 23:59:59), inclusive.
    #[inline]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Number of days in the month (28..=31). Sizes the day-bucket axis.
    #[inline]
    pub fn days(&self) -> u32 {
        self.days
    }

    /// Zero-based day bucket index for a timestamp, or `None` when the
    /// timestamp's day falls outside `1..=days`.
    ///
    /// Out-of-range days cannot occur for rows fetched with this window's
    /// bounds, but the aggregator ignores them rather than panicking.
    pub fn day_index(&self, ts: DateTime<Utc>) -> Option<usize> {
        let day = ts.day();
        if (1..=self.days).contains(&day) {
            Some(day as usize - 1)
        } else {
            None
        }
    }

    /// Zero-based hour bucket index (0..=23) for a timestamp.
    #[inline]
    pub fn hour_index(ts: DateTime<Utc>) -> usize {
        ts.hour() as usize
    }
}

/// Days in a given calendar month, Gregorian rules.
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        // Unreachable for chrono months; 30 keeps the function total.
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

// =============================================================================
// Unit Tests
// =============================================================================
