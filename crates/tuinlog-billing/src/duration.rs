//! Work/break durations derived from raw segments.
//!
//! A work log stores nothing but its segments; every duration shown on a
//! timer, a logbook row or a settlement summary is re-derived here. Open
//! segments are measured up to the supplied clock reading so a running
//! timer ticks without any stored counter.

use serde::{Deserialize, Serialize};

use rust_decimal::Decimal;

use tuinlog_core::{billable_hours, Log, SegmentKind, Timestamp};

/// Total work and break time across a log's segments.
///
/// Durations are in milliseconds and never negative: a segment whose end
/// precedes its start contributes zero rather than pulling the total down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentTotals {
    /// Milliseconds spent in work segments
    pub work_ms: i64,
    /// Milliseconds spent in break segments
    pub break_ms: i64,
}

impl SegmentTotals {
    /// Derives totals from a log's segments.
    ///
    /// Open segments (no end) are measured up to `now`.
    #[must_use]
    pub fn from_log(log: &Log, now: Timestamp) -> Self {
        let mut totals = Self::default();
        for segment in &log.segments {
            let span = segment.span_ms(now);
            match segment.kind {
                SegmentKind::Work => totals.work_ms += span,
                SegmentKind::Break => totals.break_ms += span,
            }
        }
        totals
    }

    /// Combined work and break time in milliseconds.
    #[must_use]
    pub fn total_ms(&self) -> i64 {
        self.work_ms + self.break_ms
    }

    /// Work time converted to billable hours, rounded to two decimals.
    #[must_use]
    pub fn billable_hours(&self) -> Decimal {
        billable_hours(self.work_ms)
    }
}

/// Derives work and break totals from a log's segments.
#[must_use]
pub fn segment_totals(log: &Log, now: Timestamp) -> SegmentTotals {
    SegmentTotals::from_log(log, now)
}

/// Milliseconds spent in work segments, open segments measured up to `now`.
#[must_use]
pub fn work_duration_ms(log: &Log, now: Timestamp) -> i64 {
    segment_totals(log, now).work_ms
}

/// Milliseconds spent in break segments, open segments measured up to `now`.
#[must_use]
pub fn break_duration_ms(log: &Log, now: Timestamp) -> i64 {
    segment_totals(log, now).break_ms
}
