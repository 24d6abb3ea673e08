//! # Tuinlog Billing
//!
//! Settlement reconciliation and status derivation for the tuinlog ledger.
//!
//! This crate turns raw ledger records into the numbers and statuses the
//! ledger displays. Nothing here is ever stored: durations, totals, payment
//! state and work log status are recomputed from segments, items and lines
//! on every call.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All derivations are stateless with explicit inputs
//! - **Derive, never store**: Totals and statuses are projections of the records
//! - **Tolerant arithmetic**: Missing quantities and rates fall back to zero or
//!   configured defaults instead of failing
//! - **Rounding at each step**: Currency amounts pass through
//!   [`round2`](tuinlog_core::round2) at every derivation step, so sums only
//!   ever see whole cents
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tuinlog_billing::prelude::*;
//!
//! // Durations from raw segments
//! let totals = segment_totals(&log, Timestamp::now());
//!
//! // Recompose settlement lines from linked logs
//! let composed = compose_lines(&settlement.log_ids, &logs, &products, &settings, now);
//! let lines = merge_lines(composed.lines, &settlement.lines);
//!
//! // Payment state across both buckets
//! let state = payment_state(&settlement, settings.default_tax_rate);
//! assert_eq!(state.grand_total(), dec!(221.92));
//! ```
//!
//! ## Module Overview
//!
//! - [`compose`] - Settlement line composition from linked work logs
//! - [`duration`] - Work/break durations from raw segments
//! - [`merge`] - Merge of recomposed lines with operator bucket edits
//! - [`payment`] - Per-bucket totals rollup and the paid predicate
//! - [`status`] - Work log status projection
//! - [`summary`] - Logbook summaries over a settlement's linked logs
//! - [`totals`] - Line arithmetic and per-bucket settlement totals

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

// Module declarations
pub mod compose;
pub mod duration;
pub mod merge;
pub mod payment;
pub mod status;
pub mod summary;
pub mod totals;

// Re-export duration types and functions
pub use duration::{break_duration_ms, segment_totals, work_duration_ms, SegmentTotals};

// Re-export totals types and functions
pub use totals::{bucket_totals, items_amount, line_amount, line_tax, BucketTotals};

// Re-export composition types and functions
pub use compose::{compose_lines, ComposedLines};

// Re-export merge functions
pub use merge::merge_lines;

// Re-export payment types and functions
pub use payment::{is_settlement_paid, payment_state, PaymentState};

// Re-export status functions
pub use status::log_status;

// Re-export summary types and functions
pub use summary::{logbook_summary, LogbookSummary};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use tuinlog_billing::prelude::*;
/// ```
pub mod prelude {
    // Duration derivation
    pub use crate::duration::{segment_totals, work_duration_ms, SegmentTotals};

    // Line arithmetic and bucket totals
    pub use crate::totals::{bucket_totals, items_amount, BucketTotals};

    // Composition and merge
    pub use crate::compose::{compose_lines, ComposedLines};
    pub use crate::merge::merge_lines;

    // Payment and status projection
    pub use crate::payment::{is_settlement_paid, payment_state, PaymentState};
    pub use crate::status::log_status;

    // Summaries
    pub use crate::summary::{logbook_summary, LogbookSummary};

    // Re-export commonly used types from dependencies
    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
    pub use tuinlog_core::{
        billable_hours, round2, Bucket, LedgerSettings, Log, LogStatus, Product, Settlement,
        SettlementLine, Timestamp,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tuinlog_core::Bucket;

    #[test]
    fn test_crate_compiles() {
        // Basic smoke test
        let totals = bucket_totals(&[], Bucket::Invoice, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }
}
